//! IP geolocation client (ipinfo-style REST).
//!
//! `GET {base}/json?token=...` looks up the caller's own address,
//! `GET {base}/{ip}?token=...` looks up an explicit one.

mod display;
mod types;

pub use display::InfoSection;
use reqwest::StatusCode;
use thiserror::Error;
pub use types::{AsnInfo, CompanyInfo, ErrorInfo, GeoRecord, PrivacyInfo};

use crate::shared::error_message_from_body;

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

/// Message used when the provider gives no usable error text.
pub const GENERIC_LOOKUP_ERROR: &str = "Invalid IP address or API error";

/// Path segment that selects the caller's own address.
const SELF_SEGMENT: &str = "json";

/// Geolocation lookup errors.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Input was whitespace only; no request was sent.
    #[error("Please enter a valid IP address")]
    InvalidInput,

    /// No access token is configured; no request was sent.
    #[error("No geolocation token configured. Set IPINFO_TOKEN or token in [geo].")]
    MissingToken,

    /// Non-success status, or a success body carrying an `error` object.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not a geolocation record.
    #[error("Unexpected response from geolocation provider: {0}")]
    Parse(String),
}

/// What to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget<'a> {
    /// The caller's own public address.
    SelfAddress,
    /// An explicit, already trimmed address.
    Address(&'a str),
}

impl<'a> LookupTarget<'a> {
    /// Classifies raw user input.
    ///
    /// Empty input means the caller's own address; whitespace-only input is
    /// rejected.
    ///
    /// # Errors
    /// Returns `InvalidInput` for whitespace-only input.
    pub fn parse(input: &'a str) -> Result<Self, LookupError> {
        if input.is_empty() {
            return Ok(Self::SelfAddress);
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LookupError::InvalidInput);
        }
        Ok(Self::Address(trimmed))
    }

    fn path_segment(self) -> &'a str {
        match self {
            Self::SelfAddress => SELF_SEGMENT,
            Self::Address(ip) => ip,
        }
    }
}

/// Client for the geolocation provider.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GeoClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token,
        }
    }

    /// Looks up `ip_or_empty`; an empty string looks up the caller.
    ///
    /// # Errors
    /// See [`LookupError`]. Validation errors are returned before any request.
    pub async fn lookup(&self, ip_or_empty: &str) -> Result<GeoRecord, LookupError> {
        let target = LookupTarget::parse(ip_or_empty)?;
        let token = self.token.as_deref().ok_or(LookupError::MissingToken)?;
        let url = self.lookup_url(target, token)?;

        tracing::debug!(target = target.path_segment(), "geolocation lookup");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let record = parse_lookup_body(status, &body)?;
        tracing::debug!(ip = %record.ip, country = ?record.country, "geolocation lookup done");
        Ok(record)
    }

    fn lookup_url(&self, target: LookupTarget<'_>, token: &str) -> Result<url::Url, LookupError> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| LookupError::Parse(format!("invalid base URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| LookupError::Parse(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push(target.path_segment());
        url.query_pairs_mut().append_pair("token", token);
        Ok(url)
    }
}

/// Turns a provider response into a record or a `Provider` error.
fn parse_lookup_body(status: StatusCode, body: &str) -> Result<GeoRecord, LookupError> {
    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "geolocation provider error");
        return Err(LookupError::Provider {
            status: status.as_u16(),
            message: error_message_from_body(body)
                .unwrap_or_else(|| GENERIC_LOOKUP_ERROR.to_string()),
        });
    }

    let record: GeoRecord =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;

    if let Some(error) = &record.error {
        tracing::debug!(title = %error.title, "geolocation provider error in success body");
        let message = error.message.trim();
        return Err(LookupError::Provider {
            status: status.as_u16(),
            message: if message.is_empty() {
                GENERIC_LOOKUP_ERROR.to_string()
            } else {
                message.to_string()
            },
        });
    }

    if record.ip.trim().is_empty() {
        return Err(LookupError::Parse("record has no ip address".to_string()));
    }
    Ok(record)
}
