//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! - `alert.rs`: Title + message modal dismissed with Enter or Esc
//! - `render_utils.rs`: Shared rendering utilities for overlays and forms

pub mod alert;
pub mod render_utils;

pub use alert::AlertState;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

/// Transition returned by overlay key handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self { transition }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Overlay {
    Alert(AlertState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Alert(alert) => alert.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Alert(alert) => alert.handle_key(key),
        }
    }
}

/// Routes a key to the active overlay, closing it when asked.
///
/// Returns `false` when no overlay is open so the caller can handle the key.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> bool {
    let Some(active) = overlay.as_mut() else {
        return false;
    };

    if active.handle_key(key).transition == OverlayTransition::Close {
        *overlay = None;
    }
    true
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}
