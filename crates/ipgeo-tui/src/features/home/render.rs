//! Home feature view.

use ipgeo_core::geo::{GeoRecord, InfoSection};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::HomeState;
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputHint, InputLine, render_hints, render_input_line};
use crate::render::{BRAND, spinner};

pub const HEADER_TITLE: &str = "IP Information Lookup";
const LOADING_TEXT: &str = "Authenticating and fetching IP...";

/// Width of the label column in the record view.
const LABEL_WIDTH: usize = 14;

/// Renders the main lookup screen.
pub fn render_home(
    frame: &mut Frame,
    state: &HomeState,
    search_running: bool,
    spinner_frame: usize,
    area: Rect,
) {
    if !state.is_ready() {
        render_loading(frame, spinner_frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // Record
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_header(frame, state, chunks[0]);
    render_search(frame, state, search_running, spinner_frame, chunks[1]);
    render_record(frame, state.display.as_ref(), chunks[2]);
    render_hints(
        frame,
        chunks[3],
        &[
            InputHint::new("Enter", "search"),
            InputHint::new("Esc", "clear"),
            InputHint::new("Ctrl+L", "log out"),
            InputHint::new("Ctrl+C", "quit"),
        ],
        BRAND,
    );
}

fn render_loading(frame: &mut Frame, spinner_frame: usize, area: Rect) {
    let y = area.y + area.height / 2;
    let line = Line::from(vec![
        Span::styled(spinner(spinner_frame), Style::default().fg(BRAND)),
        Span::raw(" "),
        Span::styled(LOADING_TEXT, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 1),
    );
}

fn render_header(frame: &mut Frame, state: &HomeState, area: Rect) {
    let ip = state.current_ip().unwrap_or("unknown");
    let right = format!("{}  Your IP: {ip}", state.user_email());
    let title_width = HEADER_TITLE.len() + 2;
    let right = truncate_with_ellipsis(
        &right,
        (area.width as usize).saturating_sub(title_width + 4),
    );

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width as u16), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::styled(
            HEADER_TITLE,
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        )),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(right, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_search(
    frame: &mut Frame,
    state: &HomeState,
    search_running: bool,
    spinner_frame: usize,
    area: Rect,
) {
    let title = if search_running {
        format!(" Search {} ", spinner(spinner_frame))
    } else {
        " Search ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BRAND))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_input_line(
        frame,
        inner,
        &InputLine {
            value: state.search.text(),
            placeholder: Some("Enter IP address..."),
            prompt: "> ",
            focused: true,
            text_color: Color::White,
            accent_color: BRAND,
        },
    );
}

fn render_record(frame: &mut Frame, record: Option<&GeoRecord>, area: Rect) {
    let lines = match record {
        Some(record) => record_lines(&record.sections()),
        None => vec![Line::styled(
            "No IP information available.",
            Style::default().fg(Color::DarkGray),
        )],
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        Rect::new(
            area.x + 1,
            area.y,
            area.width.saturating_sub(2),
            area.height,
        ),
    );
}

/// Flattens sections into styled lines, one blank line between sections.
pub fn record_lines(sections: &[InfoSection]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(
            section.title,
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ));
        for (label, value) in &section.rows {
            let label = format!("{label}:");
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {label:<width$}", width = LABEL_WIDTH),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ]));
        }
    }
    lines
}
