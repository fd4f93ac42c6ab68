//! Screen header rendering.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the header with the screen title, current route and add action.
pub fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled(
            "Button Management",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(app.route.to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled("   ", Style::default()),
        Span::styled("[a] + Add Button", Style::default().fg(Color::Green)),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    Widget::render(paragraph, area, buf);
}
