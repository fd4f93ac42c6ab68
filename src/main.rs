//! Button Admin - terminal admin screen for managing broadcast buttons.
//!
//! Main entry point and event loop for the application.

mod api;
mod app;
mod cache;
mod config;
mod form;
mod logging;
mod notify;
mod route;
mod ui;

use api::ButtonClient;
use app::{App, UiMode};
use clap::Parser;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};
use route::Route;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "button-admin", version, about = "Manage buttons from the terminal")]
struct Cli {
    /// Path to config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL from the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Start on this page; invalid values fall back to 1
    #[arg(long)]
    page: Option<String>,

    /// Start at a route such as `?page=3`
    #[arg(long)]
    route: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Initial route from `--route`, then `--page`.
    fn initial_route(&self) -> Route {
        let route = self
            .route
            .as_deref()
            .map(Route::parse)
            .unwrap_or_default();
        match self.page.as_deref() {
            Some(page) => route.to_page(route::parse_page(page)),
            None => route,
        }
    }
}

/// Main application entry point.
///
/// # Details
/// Loads configuration, sets up logging and the HTTP client, requests the
/// initial page and runs the event loop until the user quits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url.clone() {
        config.api_url = api_url;
    }

    if cli.write_config {
        config.validate()?;
        config.save(cli.config.as_deref())?;
        return Ok(());
    }

    let log_path = config.log_file_path()?;
    let logging_enabled = logging::init(&log_path);

    let client = ButtonClient::new(&config)?;
    let route = cli.initial_route();
    info!(
        event = "app.start_completed",
        api_url = %config.api_url,
        page = route.page,
        logging = logging_enabled
    );

    let mut app = App::new(
        Arc::new(client),
        route,
        Duration::from_secs(config.notification_secs),
    );
    app.ensure_page();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(event = "app.exit_completed");
    result
}

/// Split the screen into header, table, pagination and status rows.
fn screen_layout(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Button table
            Constraint::Length(3), // Pagination
            Constraint::Length(3), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Render the complete UI, including any open modal.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let area = f.area();
    let [header, table, pagination, status] = screen_layout(area);
    let buf = f.buffer_mut();

    ui::render_header(app, header, buf);
    ui::render_table(app, table, buf);
    ui::render_pagination(app, pagination, buf);
    ui::render_status(app, status, buf);

    match app.mode {
        UiMode::ActionsMenu => ui::render_actions_menu(app, area, buf),
        UiMode::Form => {
            if let Some(dialog) = &app.form_dialog {
                ui::render_form_dialog(dialog, area, buf);
            }
        }
        UiMode::ConfirmDelete => {
            if let Some(dialog) = &app.delete_dialog {
                ui::render_delete_confirm(dialog, area, buf);
            }
        }
        UiMode::List => {}
    }
}

/// Main event loop.
///
/// # Details
/// Each tick applies finished backend calls, prunes notifications, redraws,
/// and polls for input with a short timeout so responses show up promptly.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let mut table_area = Rect::default();

    loop {
        app.drain_outcomes();
        app.tick();

        terminal.draw(|f| {
            table_area = screen_layout(f.area())[1];
            render_ui(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key(app, key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, table_area),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Dispatch a key press for the current mode.
///
/// # Returns
/// * `bool` - True when the app should quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        UiMode::List => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => app.next_page(),
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => app.prev_page(),
            KeyCode::Char('a') => app.open_create(),
            KeyCode::Enter | KeyCode::Char('.') => app.open_menu(),
            KeyCode::Char('e') => app.open_edit(),
            KeyCode::Char('d') => app.open_delete(),
            KeyCode::Char('t') => {
                app.toggle_retire();
            }
            KeyCode::Char('r') => app.refresh(),
            _ => {}
        },
        UiMode::ActionsMenu => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_menu(),
            KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
            KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
            KeyCode::Enter => app.activate_menu(),
            _ => {}
        },
        UiMode::Form => {
            let pending = app.form_dialog.as_ref().is_some_and(|d| d.pending);
            match key.code {
                KeyCode::Esc => app.close_form(),
                KeyCode::Enter => {
                    app.submit_form();
                }
                _ if pending => {}
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(dialog) = app.form_dialog.as_mut() {
                        dialog.form.focus_next();
                    }
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(dialog) = app.form_dialog.as_mut() {
                        dialog.form.focus_prev();
                    }
                }
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(dialog) = app.form_dialog.as_mut() {
                        dialog.form.reset();
                    }
                }
                KeyCode::Backspace => {
                    if let Some(dialog) = app.form_dialog.as_mut() {
                        dialog.form.backspace();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(dialog) = app.form_dialog.as_mut() {
                        dialog.form.input_char(c);
                    }
                }
                _ => {}
            }
        }
        UiMode::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.confirm_delete(false);
            }
            KeyCode::Char('f') => {
                app.confirm_delete(true);
            }
            KeyCode::Char('n') | KeyCode::Esc => app.close_delete(),
            _ => {}
        },
    }

    false
}

/// Handle mouse events (scroll and click).
///
/// # Details
/// Scrolling moves the selection; a left click on a table row selects it.
/// The table has a one-line border and a one-line header above the rows.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, table_area: Rect) {
    if app.mode != UiMode::List {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::Down(MouseButton::Left) => {
            let first_row = table_area.y + 2;
            if mouse.column > table_area.x
                && mouse.column < table_area.x + table_area.width
                && mouse.row >= first_row
                && mouse.row < table_area.y + table_area.height.saturating_sub(1)
            {
                let index = (mouse.row - first_row) as usize;
                if index < app.rows().len() {
                    app.selected_index = index;
                }
            }
        }
        _ => {}
    }
}
