//! Display projection of a [`GeoRecord`] into labelled sections.
//!
//! Shared by the TUI and the `lookup` command so both show the same rows.

use super::types::GeoRecord;

/// A titled group of `(label, value)` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSection {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

impl InfoSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    /// Adds a row unless the value is missing or empty.
    fn row(mut self, label: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.rows.push((label, value.to_string()));
        }
        self
    }

    fn flag(self, label: &'static str, value: bool) -> Self {
        self.row(label, Some(if value { "Yes" } else { "No" }))
    }
}

impl GeoRecord {
    /// Projects the record into display sections.
    ///
    /// Each row appears only when its value is present, so a record with a
    /// country but no city still shows its country. Empty sections are
    /// omitted.
    pub fn sections(&self) -> Vec<InfoSection> {
        let mut sections = vec![
            InfoSection::new("IP Details")
                .row("IP Address", Some(&self.ip))
                .row("Hostname", self.hostname.as_deref()),
        ];

        sections.push(
            InfoSection::new("Location")
                .row("City", self.city.as_deref())
                .row("Region", self.region.as_deref())
                .row("Country", self.country.as_deref())
                .row("Postal Code", self.postal.as_deref())
                .row("Timezone", self.timezone.as_deref())
                .row("Coordinates", self.loc.as_deref()),
        );

        sections.push(InfoSection::new("Organization").row("Organization", self.org.as_deref()));

        if let Some(asn) = &self.asn {
            sections.push(
                InfoSection::new("ASN Information")
                    .row("ASN", Some(&asn.asn))
                    .row("Name", Some(&asn.name))
                    .row("Domain", Some(&asn.domain))
                    .row("Type", Some(&asn.kind)),
            );
        }

        if let Some(company) = &self.company {
            sections.push(
                InfoSection::new("Company")
                    .row("Name", Some(&company.name))
                    .row("Domain", Some(&company.domain))
                    .row("Type", Some(&company.kind)),
            );
        }

        if let Some(privacy) = &self.privacy {
            sections.push(
                InfoSection::new("Privacy Detection")
                    .flag("VPN", privacy.vpn)
                    .flag("Proxy", privacy.proxy)
                    .flag("Tor", privacy.tor)
                    .flag("Relay", privacy.relay)
                    .flag("Hosting", privacy.hosting),
            );
        }

        if self.bogon {
            sections.push(InfoSection::new("Notes").row("Bogon", Some("Private or reserved range")));
        }

        sections.retain(|section| !section.rows.is_empty());
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{AsnInfo, PrivacyInfo};

    fn titles(sections: &[InfoSection]) -> Vec<&'static str> {
        sections.iter().map(|s| s.title).collect()
    }

    #[test]
    fn test_minimal_record_has_only_ip_details() {
        let record = GeoRecord {
            ip: "8.8.8.8".to_string(),
            ..GeoRecord::default()
        };
        let sections = record.sections();
        assert_eq!(titles(&sections), vec!["IP Details"]);
        assert_eq!(sections[0].rows, vec![("IP Address", "8.8.8.8".to_string())]);
    }

    #[test]
    fn test_location_rows_do_not_depend_on_city() {
        let record = GeoRecord {
            ip: "1.1.1.1".to_string(),
            country: Some("AU".to_string()),
            timezone: Some("Australia/Sydney".to_string()),
            ..GeoRecord::default()
        };
        let sections = record.sections();
        let location = sections.iter().find(|s| s.title == "Location").unwrap();
        assert_eq!(
            location.rows,
            vec![
                ("Country", "AU".to_string()),
                ("Timezone", "Australia/Sydney".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_record_section_order_and_flags() {
        let record = GeoRecord {
            ip: "8.8.8.8".to_string(),
            hostname: Some("dns.google".to_string()),
            city: Some("Mountain View".to_string()),
            org: Some("AS15169 Google LLC".to_string()),
            asn: Some(AsnInfo {
                asn: "AS15169".to_string(),
                name: "Google LLC".to_string(),
                domain: "google.com".to_string(),
                route: "8.8.8.0/24".to_string(),
                kind: "hosting".to_string(),
            }),
            privacy: Some(PrivacyInfo {
                hosting: true,
                ..PrivacyInfo::default()
            }),
            ..GeoRecord::default()
        };

        let sections = record.sections();
        assert_eq!(
            titles(&sections),
            vec![
                "IP Details",
                "Location",
                "Organization",
                "ASN Information",
                "Privacy Detection"
            ]
        );

        let privacy = sections.last().unwrap();
        assert_eq!(privacy.rows[0], ("VPN", "No".to_string()));
        assert_eq!(privacy.rows[4], ("Hosting", "Yes".to_string()));
    }
}
