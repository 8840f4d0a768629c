//! Interactive app command handler.

use anyhow::{Context, Result};
use ipgeo_core::config::Config;
use ipgeo_core::services::Services;

pub async fn run(config: &Config) -> Result<()> {
    let services = Services::from_config(config).context("configure services")?;
    tracing::info!("starting interactive app");
    ipgeo_tui::run_app(services)
        .await
        .context("interactive app failed")
}
