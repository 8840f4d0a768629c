use ipgeo_core::geo::{GeoClient, LookupError};

use crate::events::{GeoUiEvent, UiEvent};

pub const SELF_LOOKUP_FAILED: &str = "Failed to fetch current IP address";

/// Looks up the caller's own address.
///
/// Provider rejections collapse to one fixed message; configuration and
/// transport errors keep their own text so the user can act on them.
pub async fn lookup_self(geo: GeoClient) -> UiEvent {
    let result = geo.lookup("").await.map_err(|e| {
        tracing::warn!(error = %e, "self lookup failed");
        match e {
            LookupError::Provider { .. } | LookupError::Parse(_) => SELF_LOOKUP_FAILED.to_string(),
            other => other.to_string(),
        }
    });
    UiEvent::Geo(GeoUiEvent::SelfLoaded(result))
}

/// Looks up an explicit address typed by the user.
pub async fn lookup_ip(geo: GeoClient, ip: String) -> UiEvent {
    let result = geo.lookup(&ip).await.map_err(|e| {
        tracing::info!(ip = %ip, error = %e, "search failed");
        e.to_string()
    });
    UiEvent::Geo(GeoUiEvent::SearchLoaded(result))
}
