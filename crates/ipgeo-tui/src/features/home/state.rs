//! Home route state.

use ipgeo_core::auth::Session;
use ipgeo_core::geo::GeoRecord;

use crate::common::TextField;

/// Lifecycle of the home route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HomePhase {
    /// Session check and self-lookup are in flight; nothing to show yet.
    #[default]
    Authenticating,
    /// Session verified; the search box is live.
    Ready,
}

/// State of the main lookup screen.
///
/// `self_record` is written only by the self-lookup completion; `display`
/// is what the screen shows and is reset to `self_record` on clear.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub phase: HomePhase,
    pub session: Option<Session>,
    pub search: TextField,
    pub display: Option<GeoRecord>,
    pub self_record: Option<GeoRecord>,
}

impl HomeState {
    pub fn user_email(&self) -> &str {
        self.session.as_ref().map_or("", Session::email)
    }

    /// The caller's own address, once known.
    pub fn current_ip(&self) -> Option<&str> {
        self.self_record.as_ref().map(|record| record.ip.as_str())
    }

    pub fn is_ready(&self) -> bool {
        self.phase == HomePhase::Ready
    }

    /// Restores the self-lookup result and empties the search box.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.display.clone_from(&self.self_record);
    }
}
