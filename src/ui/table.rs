//! Button table rendering.
//!
//! Displays the current page of buttons, or a loading, empty or error state.

use crate::app::{App, PER_PAGE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

const COLUMNS: [&str; 7] = ["ID", "Title", "Type", "Duration", "Description", "Uses", "Status"];

fn column_widths() -> [Constraint; 7] {
    [
        Constraint::Length(10),
        Constraint::Percentage(25),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Percentage(30),
        Constraint::Length(6),
        Constraint::Length(8),
    ]
}

/// Render the button table.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// - First load in flight: skeleton rows
/// - Empty page: empty-state message
/// - Failed first load: error message with retry hint
/// - Rows from the previous page while the next one loads are dimmed
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!("Buttons ({})", app.total_count()))
        .borders(Borders::ALL);

    if app.is_loading() {
        render_skeleton(block, area, buf);
        return;
    }

    let rows = app.rows();
    if rows.is_empty() {
        let lines = match &app.list_error {
            Some(error) if app.total_count() == 0 => vec![
                Line::from(Span::styled(
                    "Failed to load buttons",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    "Press 'r' to retry",
                    Style::default().fg(Color::Yellow),
                )),
            ],
            _ => vec![
                Line::from(Span::styled(
                    "No buttons have been added yet",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Add a new button to get started",
                    Style::default().fg(Color::Gray),
                )),
            ],
        };
        let top_pad = area.height.saturating_sub(2 + lines.len() as u16) / 2;
        let mut padded = vec![Line::default(); top_pad as usize];
        padded.extend(lines);
        let paragraph = Paragraph::new(padded)
            .alignment(Alignment::Center)
            .block(block);
        Widget::render(paragraph, area, buf);
        return;
    }

    let row_style = if app.is_placeholder() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|button| {
            let description = match button.description.as_deref() {
                Some(text) if !text.is_empty() => Cell::from(text.to_string()),
                _ => Cell::from(Span::styled("N/A", Style::default().fg(Color::Gray))),
            };
            let status = if button.is_retired() {
                Cell::from(Span::styled("Retired", Style::default().fg(Color::Red)))
            } else {
                Cell::from(Span::styled("Active", Style::default().fg(Color::Green)))
            };

            Row::new(vec![
                Cell::from(button.short_id()),
                Cell::from(button.title.clone()),
                Cell::from(button.button_type.clone()),
                Cell::from(button.format_duration()),
                description,
                Cell::from(button.usage_count.to_string()),
                status,
            ])
            .style(row_style)
        })
        .collect();

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(table_rows, column_widths())
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(app.selected_index.min(rows.len() - 1)));
    StatefulWidget::render(table, area, buf, &mut state);
}

/// Placeholder rows shown while the first page loads.
fn render_skeleton(block: Block, area: Rect, buf: &mut Buffer) {
    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let skeleton = Style::default().fg(Color::DarkGray);
    let rows = (0..PER_PAGE).map(|_| {
        Row::new(vec![
            Cell::from("░░░░░░"),
            Cell::from("░░░░░░░░░░░░"),
            Cell::from("░░░"),
            Cell::from("░░░"),
            Cell::from("░░░░░░░░░░"),
            Cell::from("░"),
            Cell::from("░░░░"),
        ])
        .style(skeleton)
    });

    let table = Table::new(rows, column_widths())
        .header(header)
        .block(block.title_bottom(Line::from(" Loading buttons... ").alignment(Alignment::Right)));
    Widget::render(table, area, buf);
}
