//! Remote lookup log (PostgREST insert into a user-owned table).
//!
//! Append-only: one row per self-lookup, written with the user's access
//! token so row-level security attributes it to them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::auth::Session;
use crate::geo::GeoRecord;
use crate::shared::error_message_from_body;

/// Log table errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The table endpoint refused the insert.
    #[error("Log insert rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
}

/// One persisted lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub user_id: String,
    pub ip_address: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    /// Coordinates as "lat,lon".
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub org: Option<String>,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub logged_at: String,
}

impl LogEntry {
    pub fn from_record(user_id: &str, record: &GeoRecord, logged_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            ip_address: record.ip.clone(),
            city: record.city.clone(),
            region: record.region.clone(),
            country: record.country.clone(),
            location: record.loc.clone(),
            timezone: record.timezone.clone(),
            org: record.org.clone(),
            logged_at: logged_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Writer for the remote log table.
#[derive(Debug, Clone)]
pub struct LogStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl LogStore {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Inserts one row on behalf of the session's user.
    ///
    /// # Errors
    /// Returns an error when the insert is refused or the service is
    /// unreachable. Nothing is retried.
    pub async fn append(&self, session: &Session, entry: &LogEntry) -> Result<(), StoreError> {
        let response = self
            .http
            .post(format!("{}/rest/v1/{}", self.base_url, self.table))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.access_token)
            .json(entry)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body).unwrap_or(body);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(table = %self.table, ip = %entry.ip_address, "lookup logged");
        Ok(())
    }
}
