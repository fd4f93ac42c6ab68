//! Actions menu and delete confirmation rendering.

use crate::app::{App, DeleteDialog};
use crate::ui::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

/// Render the per-row actions menu for the selected button.
pub fn render_actions_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(button) = app.selected_button() else {
        return;
    };
    let actions = app.menu_actions();

    let items: Vec<ListItem> = actions
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();

    let popup = centered_rect(36, actions.len() as u16 + 2, area);
    Widget::render(Clear, popup, buf);

    let mut state = ListState::default();
    state.select(Some(app.menu_index.min(actions.len().saturating_sub(1))));

    let list = List::new(items)
        .block(
            Block::default()
                .title(button.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    StatefulWidget::render(list, popup, buf, &mut state);
}

/// Render the delete confirmation modal.
pub fn render_delete_confirm(dialog: &DeleteDialog, area: Rect, buf: &mut Buffer) {
    let action_line = if dialog.pending {
        Line::from(Span::styled("Deleting...", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled("[y] Delete", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[f] Force delete", Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::White)),
        ])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(dialog.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::from(Span::styled(
            "This button will be permanently deleted. Force delete also removes its usage and retirement history.",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
    ];
    if let Some(error) = &dialog.error {
        lines.push(Line::from(Span::styled(
            format!("✖ {}", error),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::default());
    }
    lines.push(action_line);

    let height = if dialog.error.is_some() { 11 } else { 8 };
    let popup = centered_rect(64, height, area);
    Widget::render(Clear, popup, buf);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Delete Button")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    Widget::render(paragraph, popup, buf);
}
