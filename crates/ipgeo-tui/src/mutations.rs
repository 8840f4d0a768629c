//! Cross-slice state mutations.
//!
//! Feature reducers return these mutations to request changes outside their
//! own slice. The main reducer applies them in order.

use crate::overlays::AlertState;

/// Route the app should switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequest {
    Login,
    Home,
}

/// Mutations for cross-slice state changes.
#[derive(Debug, PartialEq, Eq)]
pub enum StateMutation {
    /// Replace the current route; the old route's state is discarded.
    Navigate(RouteRequest),
    /// Open a modal alert.
    ShowAlert(AlertState),
}

impl StateMutation {
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ShowAlert(AlertState::new(title, message))
    }
}
