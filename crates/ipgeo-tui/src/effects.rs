//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use ipgeo_core::auth::Session;
use ipgeo_core::geo::GeoRecord;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Sign in with email and password.
    SignIn {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Register a new account.
    SignUp {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Load and verify the current session.
    CheckSession { task: TaskId },

    /// Look up the caller's own address.
    LookupSelf { task: TaskId },

    /// Look up an explicit address.
    LookupIp { task: TaskId, ip: String },

    /// Append a self-lookup to the remote log. Detached; never reports back.
    AppendLog { session: Session, record: GeoRecord },

    /// End the current session.
    SignOut { task: TaskId },
}

impl UiEffect {
    /// The task this effect spawns, if it spawns a tracked one.
    pub fn task(&self) -> Option<(TaskKind, TaskId)> {
        match self {
            UiEffect::SignIn { task, .. } => Some((TaskKind::SignIn, *task)),
            UiEffect::SignUp { task, .. } => Some((TaskKind::SignUp, *task)),
            UiEffect::CheckSession { task } => Some((TaskKind::SessionCheck, *task)),
            UiEffect::LookupSelf { task } => Some((TaskKind::SelfLookup, *task)),
            UiEffect::LookupIp { task, .. } => Some((TaskKind::Search, *task)),
            UiEffect::SignOut { task } => Some((TaskKind::SignOut, *task)),
            UiEffect::Quit | UiEffect::AppendLog { .. } => None,
        }
    }
}
