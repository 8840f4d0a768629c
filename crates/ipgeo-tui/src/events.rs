//! UI event types.
//!
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`
//!
//! Completions are always applied, in arrival order. There is no latest-only
//! gating: a slow search that finishes after a newer action still lands.

use crossterm::event::Event as CrosstermEvent;
use ipgeo_core::auth::{Session, SignUpOutcome};
use ipgeo_core::geo::GeoRecord;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Identity results. Errors are already rendered to display strings.
#[derive(Debug)]
pub enum AuthUiEvent {
    SignedIn(Result<Session, String>),
    SignedUp(Result<SignUpOutcome, String>),
    SessionChecked(Result<Option<Session>, String>),
    SignedOut(Result<(), String>),
}

/// Geolocation results.
#[derive(Debug)]
pub enum GeoUiEvent {
    /// Lookup of the caller's own address finished.
    SelfLoaded(Result<GeoRecord, String>),
    /// User-initiated search finished.
    SearchLoaded(Result<GeoRecord, String>),
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// A spawned task has started.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// A spawned task finished; `result` is the event it produced.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    Auth(AuthUiEvent),

    Geo(GeoUiEvent),
}
