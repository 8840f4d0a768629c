//! Non-interactive lookup.
//!
//! Needs only the geolocation settings; the identity service is never
//! contacted and nothing is appended to the log table.

use std::io::{self, Write};

use anyhow::{Context, Result};
use ipgeo_core::config::Config;
use ipgeo_core::geo::GeoRecord;
use ipgeo_core::services;
use ipgeo_core::shared::http_client;

/// Width of the label column.
const LABEL_WIDTH: usize = 14;

pub async fn run(config: &Config, ip: &str, json: bool) -> Result<()> {
    let geo = services::geo_client(config, http_client()?)?;
    let record = geo.lookup(ip).await?;
    tracing::debug!(ip = %record.ip, "lookup finished");

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &record).context("write record")?;
        writeln!(out)?;
    } else {
        write_sections(&mut out, &record)?;
    }
    Ok(())
}

fn write_sections(out: &mut impl Write, record: &GeoRecord) -> io::Result<()> {
    for (i, section) in record.sections().iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", section.title)?;
        for (label, value) in &section.rows {
            let label = format!("{label}:");
            writeln!(out, "  {label:<width$}{value}", width = LABEL_WIDTH)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_are_separated_and_aligned() {
        let record = GeoRecord {
            ip: "8.8.8.8".to_string(),
            hostname: Some("dns.google".to_string()),
            country: Some("US".to_string()),
            ..GeoRecord::default()
        };
        let mut out = Vec::new();
        write_sections(&mut out, &record).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "IP Details\n  IP Address:   8.8.8.8\n  Hostname:     dns.google\n\nLocation\n  Country:      US\n"
        );
    }
}
