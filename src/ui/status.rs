//! Status bar rendering.
//!
//! Shows the newest notification, or key hints for the current mode.

use crate::app::{App, UiMode};
use crate::notify::Level;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

fn key_hints(mode: UiMode) -> &'static str {
    match mode {
        UiMode::List => {
            "q quit · j/k move · n/p page · a add · Enter actions · e edit · t retire · d delete · r refresh"
        }
        UiMode::ActionsMenu => "j/k move · Enter select · Esc close",
        UiMode::Form => "Tab/Shift-Tab field · Enter save · Ctrl-R reset · Esc cancel",
        UiMode::ConfirmDelete => "y delete · f force delete · Esc cancel",
    }
}

/// Render the status bar.
pub fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let line = match app.notifications.latest() {
        Some(note) => {
            let (prefix, color) = match note.level {
                Level::Success => ("✔ ", Color::Green),
                Level::Error => ("✖ ", Color::Red),
            };
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::styled(note.message.as_str(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(
            key_hints(app.mode),
            Style::default().fg(Color::Gray),
        )),
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    Widget::render(paragraph, area, buf);
}
