//! UI components module.
//!
//! Contains ratatui widgets for the buttons screen and its dialogs.

pub mod dialog;
pub mod header;
pub mod menu;
pub mod pagination;
pub mod status;
pub mod table;

pub use dialog::render_form_dialog;
pub use header::render_header;
pub use menu::{render_actions_menu, render_delete_confirm};
pub use pagination::render_pagination;
pub use status::render_status;
pub use table::render_table;

use ratatui::layout::Rect;

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
