//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::style::Color;

use crate::common::TaskKind;
use crate::features::{home, login};
use crate::overlays::OverlayExt;
use crate::state::{AppState, Route};

/// Accent color used for borders, titles, and focused controls.
pub const BRAND: Color = Color::Rgb(116, 97, 244);

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 4;

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[(frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    match &state.route {
        Route::Login(login_state) => {
            login::render_login(frame, login_state, state.tasks.is_auth_running(), area);
        }
        Route::Home(home_state) => home::render_home(
            frame,
            home_state,
            state.tasks.state(TaskKind::Search).is_running(),
            state.spinner_frame,
            area,
        ),
    }

    // Overlay last so it draws on top.
    app.overlay.render(frame, area);
}
