//! Full-screen TUI for ipgeo: login form and IP lookup screen.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use ipgeo_core::services::Services;
pub use runtime::TuiRuntime;

use crate::mutations::RouteRequest;

/// Runs the interactive app until the user quits.
///
/// Starts on the home screen when a session is cached, otherwise on login.
/// Must be awaited inside a multi-threaded tokio runtime: the event loop
/// blocks its thread while effects run on the others.
pub async fn run_app(services: Services) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive app requires a terminal.\n\
             Use `ipgeo lookup [IP]` for non-interactive lookups."
        );
    }

    let start = if services.auth.has_cached_session() {
        RouteRequest::Home
    } else {
        RouteRequest::Login
    };
    tracing::info!(?start, "starting tui");

    let mut runtime = TuiRuntime::new(services, start)?;
    runtime.run()?;

    tracing::info!("tui exited");
    Ok(())
}
