//! Geolocation record shapes returned by the provider.

use serde::{Deserialize, Serialize};

/// Lookup result for a single IP address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeoRecord {
    /// The IP address the record describes. Absent only on error bodies;
    /// the client rejects a record without one.
    #[serde(default)]
    pub ip: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Country as an ISO code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Coordinates as "lat,lon".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<AsnInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacyInfo>,

    /// Set by the provider for private or reserved ranges.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bogon: bool,

    /// Present when the provider refused the lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Autonomous system details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AsnInfo {
    /// The AS number (format "AS{u32}").
    pub asn: String,
    pub name: String,
    pub domain: String,
    pub route: String,
    /// Entity type (business, education, hosting, isp).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Details about the entity owning the address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Anonymisation signals for the address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PrivacyInfo {
    pub vpn: bool,
    pub proxy: bool,
    pub tor: bool,
    pub relay: bool,
    pub hosting: bool,
    /// Name of the privacy service, if known.
    pub service: String,
}

/// Error object embedded in a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorInfo {
    pub title: String,
    pub message: String,
}
