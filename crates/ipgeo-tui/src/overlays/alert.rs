//! Modal alert with a title and a message.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_overlay_container,
};
use crate::render::BRAND;

const MIN_WIDTH: u16 = 36;
const MAX_WIDTH: u16 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub title: String,
    pub message: String,
}

impl AlertState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Enter or Esc dismisses; every other key is swallowed.
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text_width = self.message.width().max(self.title.width() + 4) as u16 + 4;
        let width = text_width.clamp(MIN_WIDTH, MAX_WIDTH);
        let inner_width = width.saturating_sub(4).max(1);
        let message_lines = (self.message.width() as u16).div_ceil(inner_width).max(1);
        let height = message_lines + 5;

        let popup = calculate_overlay_area(area, width, height);
        let color = if self.title == "Error" || self.title.ends_with("Failed") {
            Color::Red
        } else {
            BRAND
        };
        let title = if self.title.is_empty() {
            "Notice"
        } else {
            self.title.as_str()
        };
        render_overlay_container(frame, popup, title, color);

        let inner = Rect::new(
            popup.x + 2,
            popup.y + 1,
            popup.width.saturating_sub(4),
            popup.height.saturating_sub(2),
        );
        let body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height.saturating_sub(2));
        frame.render_widget(
            Paragraph::new(Line::styled(self.message.as_str(), Style::default()))
                .wrap(Wrap { trim: true }),
            body,
        );

        render_hints(frame, inner, &[InputHint::new("Enter", "OK")], color);
    }
}
