//! Configuration management for ipgeo.
//!
//! Loads configuration from ${IPGEO_HOME}/config.toml with sensible defaults.
//! Secrets (anon key, geolocation token) may come from the environment instead.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for ipgeo configuration and data files.
    //!
    //! IPGEO_HOME resolution order:
    //! 1. IPGEO_HOME environment variable (if set)
    //! 2. ~/.config/ipgeo (default)

    use std::path::PathBuf;

    /// Returns the ipgeo home directory.
    pub fn ipgeo_home() -> PathBuf {
        if let Ok(home) = std::env::var("IPGEO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("ipgeo")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        ipgeo_home().join("config.toml")
    }

    /// Returns the path to the identity session cache.
    pub fn session_path() -> PathBuf {
        ipgeo_home().join("session.json")
    }

    /// Returns the default log file path.
    pub fn log_path() -> PathBuf {
        ipgeo_home().join("logs").join("ipgeo.log")
    }
}

/// Identity service and log table project settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project base URL (`SUPABASE_URL` wins when set).
    pub url: Option<String>,
    /// Public anon key (falls back to `SUPABASE_ANON_KEY`).
    pub anon_key: Option<String>,
}

/// Geolocation provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Provider base URL (`IPINFO_BASE_URL` wins when set).
    pub base_url: Option<String>,
    /// Access token (falls back to `IPINFO_TOKEN`).
    pub token: Option<String>,
}

/// Remote log table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogStoreConfig {
    pub table: String,
}

impl Default for LogStoreConfig {
    fn default() -> Self {
        Self {
            table: Config::DEFAULT_LOG_TABLE.to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`IPGEO_LOG` wins when set).
    pub level: String,
    /// Log file path; `None` means `$IPGEO_HOME/logs/ipgeo.log`.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Config::DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Resolves the log file path.
    pub fn file_path(&self) -> PathBuf {
        match self.file.as_deref().map(str::trim) {
            Some(file) if !file.is_empty() => PathBuf::from(file),
            _ => paths::log_path(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub supabase: SupabaseConfig,
    pub geo: GeoConfig,
    pub log_store: LogStoreConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub const DEFAULT_LOG_TABLE: &'static str = "user_ip_logs";
    pub const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Loads configuration from the default config path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default config template to `path`.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
