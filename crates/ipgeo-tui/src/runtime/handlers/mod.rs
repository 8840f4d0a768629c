//! Effect handlers for the TUI runtime.
//!
//! Handlers perform I/O and never touch state. Each one is a plain async
//! function that returns the `UiEvent` for its result; the runtime spawns
//! it and forwards the event to the inbox.
//!
//! ```ignore
//! // Handler: pure async, returns UiEvent
//! pub async fn lookup_ip(geo: GeoClient, ip: String) -> UiEvent { ... }
//!
//! // Runtime: spawns and sends to inbox
//! self.spawn_task(TaskKind::Search, task, move || handlers::lookup_ip(geo, ip));
//! ```

pub mod auth;
pub mod geo;
pub mod log_store;

pub use auth::*;
pub use geo::*;
pub use log_store::*;

#[cfg(test)]
mod tests;
