//! Service handles resolved from configuration.
//!
//! `Services` is passed explicitly to whoever needs network access; there
//! is no global client.

use anyhow::Result;

use crate::auth::AuthClient;
use crate::config::{Config, paths};
use crate::geo::{self, GeoClient};
use crate::shared::{http_client, resolve_api_key, resolve_base_url, resolve_secret};
use crate::store::LogStore;

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const IPINFO_BASE_URL_ENV: &str = "IPINFO_BASE_URL";
pub const IPINFO_TOKEN_ENV: &str = "IPINFO_TOKEN";

/// Clients for every remote service the app talks to.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthClient,
    pub geo: GeoClient,
    pub store: LogStore,
}

impl Services {
    /// Builds all clients from `config` and the environment.
    ///
    /// # Errors
    /// Returns an error if the identity project URL or anon key is missing,
    /// or a configured URL is malformed. A missing geolocation token is not
    /// an error; lookups report it instead.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = http_client()?;

        let supabase_url = resolve_base_url(
            config.supabase.url.as_deref(),
            SUPABASE_URL_ENV,
            None,
            "identity service",
        )?;
        let anon_key = resolve_api_key(
            config.supabase.anon_key.as_deref(),
            SUPABASE_ANON_KEY_ENV,
            "supabase",
        )?;

        let auth = AuthClient::new(
            http.clone(),
            supabase_url.clone(),
            anon_key.clone(),
            paths::session_path(),
        );
        let store = LogStore::new(
            http.clone(),
            supabase_url,
            anon_key,
            config.log_store.table.clone(),
        );
        let geo = geo_client(config, http)?;

        Ok(Self { auth, geo, store })
    }
}

/// Builds only the geolocation client.
///
/// # Errors
/// Returns an error if the configured base URL is malformed.
pub fn geo_client(config: &Config, http: reqwest::Client) -> Result<GeoClient> {
    let base_url = resolve_base_url(
        config.geo.base_url.as_deref(),
        IPINFO_BASE_URL_ENV,
        Some(geo::DEFAULT_BASE_URL),
        "geolocation",
    )?;
    let token = resolve_secret(config.geo.token.as_deref(), IPINFO_TOKEN_ENV);
    if token.is_none() {
        tracing::warn!("no geolocation token configured; lookups will fail");
    }

    Ok(GeoClient::new(http, base_url, token))
}
