//! Helpers shared by the HTTP clients.

use anyhow::{Context, Result};
use serde_json::Value;

/// Standard User-Agent header for ipgeo requests.
pub const USER_AGENT: &str = concat!("ipgeo/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Config resolution helpers
// ============================================================================

/// Resolves an optional secret with precedence: config > env.
///
/// Blank values count as unset.
pub fn resolve_secret(config_value: Option<&str>, env_var: &str) -> Option<String> {
    if let Some(value) = config_value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    std::env::var(env_var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolves a required secret with precedence: config > env.
///
/// # Errors
/// Returns an error naming both sources when neither is set.
pub fn resolve_api_key(
    config_value: Option<&str>,
    env_var: &str,
    config_section: &str,
) -> Result<String> {
    resolve_secret(config_value, env_var).with_context(|| {
        format!("No key available. Set {env_var} or the key in [{config_section}].")
    })
}

/// Resolves a base URL with precedence: env > config > default.
///
/// A `None` default makes the URL required.
///
/// # Errors
/// Returns an error if the resolved URL is malformed or a required URL is missing.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: Option<&str>,
    service_name: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trim_trailing_slash(trimmed));
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trim_trailing_slash(trimmed));
        }
    }

    default_url
        .map(trim_trailing_slash)
        .with_context(|| format!("No {service_name} URL configured. Set {env_var}."))
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str, service_name: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid {service_name} base URL: {url}"))?;
    Ok(())
}

fn trim_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// ============================================================================
// HTTP helpers
// ============================================================================

/// Builds the shared HTTP client.
///
/// No timeout is configured: requests use the transport defaults.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialised.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Extracts a human-readable message from a JSON error body.
///
/// Understands the shapes used by the identity service (`msg`,
/// `error_description`), the REST layer (`message`) and the geolocation
/// provider (`error.message` or a bare `error` string).
pub fn error_message_from_body(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    error_message_from_json(&json)
}

fn error_message_from_json(json: &Value) -> Option<String> {
    let non_empty = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(error) = json.get("error")
        && error.is_object()
    {
        if let Some(message) = non_empty(error.get("message")) {
            return Some(message);
        }
        return non_empty(error.get("title"));
    }

    non_empty(json.get("msg"))
        .or_else(|| non_empty(json.get("error_description")))
        .or_else(|| non_empty(json.get("message")))
        .or_else(|| non_empty(json.get("error")))
}
