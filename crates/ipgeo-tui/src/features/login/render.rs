//! Login feature view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{LoginFocus, LoginState};
use crate::overlays::render_utils::{
    InputHint, InputLine, calculate_overlay_area, render_hints, render_input_line,
};
use crate::render::BRAND;

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 16;

pub const TITLE: &str = "Instant Geolocation & IP Look-up";
pub const SUBTITLE: &str = "Find your IP and its precise location.";

/// Renders the sign-in form centered in `area`.
///
/// `busy` dims both buttons while a request is in flight.
pub fn render_login(frame: &mut Frame, state: &LoginState, busy: bool, area: Rect) {
    let card = calculate_overlay_area(area, CARD_WIDTH, CARD_HEIGHT);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND)),
        card,
    );

    let inner = Rect::new(
        card.x + 2,
        card.y + 1,
        card.width.saturating_sub(4),
        card.height.saturating_sub(2),
    );
    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);

    frame.render_widget(
        Paragraph::new(Line::styled(
            TITLE,
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        row(0),
    );
    frame.render_widget(
        Paragraph::new(Line::styled(SUBTITLE, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        row(1),
    );

    render_field_label(frame, row(3), "Email", state.focus == LoginFocus::Email);
    render_input_line(
        frame,
        row(4),
        &InputLine {
            value: state.email.text(),
            placeholder: Some("you@example.com"),
            prompt: "> ",
            focused: state.focus == LoginFocus::Email,
            text_color: Color::White,
            accent_color: BRAND,
        },
    );

    let masked = "•".repeat(state.password.text().chars().count());
    render_field_label(
        frame,
        row(6),
        "Password",
        state.focus == LoginFocus::Password,
    );
    render_input_line(
        frame,
        row(7),
        &InputLine {
            value: &masked,
            placeholder: Some("password"),
            prompt: "> ",
            focused: state.focus == LoginFocus::Password,
            text_color: Color::White,
            accent_color: BRAND,
        },
    );

    frame.render_widget(
        Paragraph::new(button_line(state.focus, busy)).alignment(Alignment::Center),
        row(9),
    );

    if busy {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Please wait...",
                Style::default().fg(Color::Yellow),
            ))
            .alignment(Alignment::Center),
            row(11),
        );
    }

    render_hints(
        frame,
        inner,
        &[
            InputHint::new("Tab", "next"),
            InputHint::new("Enter", "submit"),
            InputHint::new("Ctrl+C", "quit"),
        ],
        BRAND,
    );
}

fn render_field_label(frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    let color = if focused { BRAND } else { Color::Gray };
    frame.render_widget(
        Paragraph::new(Line::styled(label.to_string(), Style::default().fg(color))),
        area,
    );
}

fn button_line(focus: LoginFocus, busy: bool) -> Line<'static> {
    let button = |label: &'static str, focused: bool| {
        let style = if busy {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default()
                .fg(Color::White)
                .bg(BRAND)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(BRAND)
        };
        Span::styled(format!("[ {label} ]"), style)
    };

    Line::from(vec![
        button("Sign In", focus == LoginFocus::SignIn),
        Span::raw("   "),
        button("Sign Up", focus == LoginFocus::SignUp),
    ])
}
