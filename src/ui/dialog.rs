//! Create/edit dialog rendering.

use crate::app::FormDialog;
use crate::form::{Field, FormMode};
use crate::ui::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Render the form dialog as a modal over `area`.
///
/// # Arguments
/// * `dialog` - Open dialog state
/// * `area` - Full screen area; the dialog is centered in it
/// * `buf` - Buffer to render to
///
/// # Details
/// Each field shows its label (required ones marked `*`), the input text with
/// a cursor on the focused field, and its validation error below when present.
/// The save action is grayed out while submission is not allowed.
pub fn render_form_dialog(dialog: &FormDialog, area: Rect, buf: &mut Buffer) {
    let form = &dialog.form;
    let (title, intro) = match form.mode {
        FormMode::Create => ("Add Button", "Fill in the details to add a new button."),
        FormMode::Edit => ("Edit Button", "Update the button details below."),
    };

    let mut lines = vec![
        Line::from(Span::styled(intro, Style::default().fg(Color::Gray))),
        Line::default(),
    ];

    for field in Field::ALL {
        let focused = field == form.focus;
        let required = match field {
            Field::Title => true,
            Field::Type => form.mode == FormMode::Create,
            _ => false,
        };
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let value = form.values.get(field);
        let value_span = if value.is_empty() && !focused {
            Span::styled(field.label(), Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(value.to_string(), Style::default().fg(Color::White))
        };

        let mut spans = vec![
            Span::styled(
                format!("{:<12}", format!("{}{}", field.label(), if required { " *" } else { "" })),
                label_style,
            ),
            value_span,
        ];
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));

        if let Some(error) = form.errors.get(&field) {
            lines.push(Line::from(Span::styled(
                format!("{:<12}{}", "", error),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::default());
    let save_style = if dialog.can_submit() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cancel_style = if dialog.pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let mut footer = vec![
        Span::styled(
            if dialog.pending { "Saving..." } else { "[Enter] Save" },
            save_style,
        ),
        Span::raw("   "),
        Span::styled("[Esc] Cancel", cancel_style),
        Span::raw("   "),
        Span::styled("[Tab] Next field", Style::default().fg(Color::Gray)),
    ];
    if form.mode == FormMode::Edit && form.is_dirty() {
        footer.push(Span::styled("   (modified)", Style::default().fg(Color::Magenta)));
    }
    lines.push(Line::from(footer));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect(72, height, area);
    Widget::render(Clear, popup, buf);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    Widget::render(paragraph, popup, buf);
}
