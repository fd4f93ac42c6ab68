//! Pagination footer rendering.

use crate::app::{App, PER_PAGE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Number of page links shown around the current page.
const WINDOW: u32 = 5;

/// First and last page number to show as links.
///
/// # Details
/// Keeps the current page inside a window of [`WINDOW`] links, clamped to
/// `1..=total`.
pub fn page_window(current: u32, total: u32) -> (u32, u32) {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let half = WINDOW / 2;
    let start = current.saturating_sub(half).max(1);
    let end = (start + WINDOW - 1).min(total);
    let start = end.saturating_sub(WINDOW - 1).max(1);
    (start, end)
}

/// Render the pagination controls.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows total count and page size on the left, and previous, page links and
/// next on the right. The current page is highlighted; controls that cannot
/// move are grayed out.
pub fn render_pagination(app: &App, area: Rect, buf: &mut Buffer) {
    let page = app.route.page;
    let total = app.total_pages();
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(
            format!("{} buttons · {} per page   ", app.total_count(), PER_PAGE),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("◀ [p] ", if page > 1 { enabled } else { disabled }),
    ];

    let (start, end) = page_window(page, total);
    for n in start..=end {
        let style = if n == page {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            enabled
        };
        spans.push(Span::styled(format!(" {} ", n), style));
    }
    if page > total {
        spans.push(Span::styled(format!(" ({}) ", page), Style::default().fg(Color::Yellow)));
    }

    spans.push(Span::styled(
        " [n] ▶",
        if page < total { enabled } else { disabled },
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Page {} of {}", page, total)),
        );
    Widget::render(paragraph, area, buf);
}
