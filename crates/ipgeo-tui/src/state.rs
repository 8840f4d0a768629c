//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── route: Route          (login form or home screen)
//! │   ├── task_seq: TaskSeq     (async task id generator)
//! │   ├── tasks: Tasks          (task lifecycle state)
//! │   └── spinner_frame         (animation counter)
//! └── overlay: Option<Overlay>  (modal alert)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers and route reducers can borrow each half independently.

use crate::common::{TaskSeq, Tasks};
use crate::features::home::HomeState;
use crate::features::login::LoginState;
use crate::mutations::RouteRequest;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Creates state for the given start route.
    ///
    /// Starting on home requires running the effects of
    /// [`crate::features::home::mount`]; see [`crate::update::start`].
    pub fn new(start: RouteRequest) -> Self {
        Self {
            tui: TuiState::new(start),
            overlay: None,
        }
    }
}

/// The two screens. Leaving a route discards its state.
#[derive(Debug, Clone)]
pub enum Route {
    Login(LoginState),
    Home(HomeState),
}

impl Route {
    pub fn from_request(request: RouteRequest) -> Self {
        match request {
            RouteRequest::Login => Route::Login(LoginState::default()),
            RouteRequest::Home => Route::Home(HomeState::default()),
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home(_))
    }
}

/// Non-overlay UI state.
pub struct TuiState {
    pub should_quit: bool,
    pub route: Route,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(start: RouteRequest) -> Self {
        Self {
            should_quit: false,
            route: Route::from_request(start),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    pub fn home(&self) -> Option<&HomeState> {
        match &self.route {
            Route::Home(home) => Some(home),
            Route::Login(_) => None,
        }
    }

    pub fn login(&self) -> Option<&LoginState> {
        match &self.route {
            Route::Login(login) => Some(login),
            Route::Home(_) => None,
        }
    }
}
