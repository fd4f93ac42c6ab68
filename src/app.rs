//! Application state management.
//!
//! Owns the list view, the query cache, dialog state and notifications.
//! Backend calls run as spawned tasks that report back over a channel; the
//! event loop applies their outcomes with [`App::drain_outcomes`].

use crate::api::{ApiError, Button, ButtonService, ButtonsPage};
use crate::cache::{BUTTONS_KIND, QueryCache, QueryKey};
use crate::form::{ButtonForm, FormMode};
use crate::notify::Notifications;
use crate::route::Route;
use std::cmp;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};
use uuid::Uuid;

/// Rows per page.
pub const PER_PAGE: u64 = 5;

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Table navigation
    List,
    /// Per-row actions menu
    ActionsMenu,
    /// Create or edit dialog
    Form,
    /// Delete confirmation
    ConfirmDelete,
}

/// Entries of the per-row actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Edit,
    Retire,
    Unretire,
    Delete,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Edit => "Edit Button",
            MenuAction::Retire => "Retire Button",
            MenuAction::Unretire => "Unretire Button",
            MenuAction::Delete => "Delete Button",
        }
    }
}

/// Open create or edit dialog.
#[derive(Debug, Clone)]
pub struct FormDialog {
    pub form: ButtonForm,
    /// Record being edited, `None` when creating
    pub target: Option<Uuid>,
    /// A submission is in flight
    pub pending: bool,
}

impl FormDialog {
    /// Whether the save action is currently allowed.
    pub fn can_submit(&self) -> bool {
        if self.pending {
            return false;
        }
        match self.form.mode {
            FormMode::Create => self.form.is_valid(),
            FormMode::Edit => true,
        }
    }
}

/// Open delete confirmation.
#[derive(Debug, Clone)]
pub struct DeleteDialog {
    pub id: Uuid,
    pub title: String,
    pub pending: bool,
    /// Backend message from the last failed attempt
    pub error: Option<String>,
}

/// Result of a spawned backend call.
#[derive(Debug)]
pub enum Outcome {
    PageLoaded {
        page: u32,
        /// Cache generation the request was issued under
        generation: u64,
        result: Result<ButtonsPage, ApiError>,
    },
    Created(Result<Button, ApiError>),
    Updated {
        id: Uuid,
        result: Result<Button, ApiError>,
    },
    Deleted {
        id: Uuid,
        result: Result<(), ApiError>,
    },
    Retired {
        id: Uuid,
        retire: bool,
        result: Result<Button, ApiError>,
    },
}

/// Main application state.
pub struct App {
    service: Arc<dyn ButtonService>,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    /// Current route (page number)
    pub route: Route,
    /// Page results keyed by page number
    pub cache: QueryCache<ButtonsPage>,
    /// Rows currently displayed
    page_data: Option<ButtonsPage>,
    /// Page the displayed rows belong to
    page_data_for: u32,
    /// Pages with a list request in flight, and the generation requested
    in_flight: HashMap<u32, u64>,
    /// Last list failure for the current page
    pub list_error: Option<String>,
    /// Selected row on the current page
    pub selected_index: usize,
    /// Selected entry in the actions menu
    pub menu_index: usize,
    pub mode: UiMode,
    /// Draft of the create form, kept across open/close
    create_draft: ButtonForm,
    /// Per-record edit forms, kept across open/close
    edit_drafts: HashMap<Uuid, ButtonForm>,
    pub form_dialog: Option<FormDialog>,
    pub delete_dialog: Option<DeleteDialog>,
    /// Record with a retire/unretire call in flight
    pub retire_pending: Option<Uuid>,
    pub notifications: Notifications,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `service` - Backend used for every request
    /// * `route` - Initial route
    /// * `notification_ttl` - How long notifications stay visible
    pub fn new(service: Arc<dyn ButtonService>, route: Route, notification_ttl: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            service,
            outcome_tx,
            outcome_rx,
            route,
            cache: QueryCache::new(),
            page_data: None,
            page_data_for: route.page,
            in_flight: HashMap::new(),
            list_error: None,
            selected_index: 0,
            menu_index: 0,
            mode: UiMode::List,
            create_draft: ButtonForm::create(),
            edit_drafts: HashMap::new(),
            form_dialog: None,
            delete_dialog: None,
            retire_pending: None,
            notifications: Notifications::new(notification_ttl),
        }
    }

    // ---- list view ----------------------------------------------------

    /// Show the current route's page, fetching it when missing or stale.
    ///
    /// # Details
    /// A fresh cache entry is shown without a request. A stale entry is shown
    /// while it re-fetches. Without an entry, previously shown rows stay up as
    /// placeholder data until the new page arrives.
    pub fn ensure_page(&mut self) {
        let page = self.route.page;
        let key = QueryKey::buttons(page);

        if let Some(value) = self.cache.get(&key).map(|entry| entry.value.clone()) {
            self.page_data = Some(value);
            self.page_data_for = page;
            self.clamp_selection();
        }

        if !self.cache.is_fresh(&key) {
            self.fetch_page(page);
        }
    }

    /// Request a page unless a request of the current generation is in flight.
    ///
    /// # Details
    /// A request issued before the last invalidation does not count: its
    /// answer may predate a mutation, so a new one is sent.
    fn fetch_page(&mut self, page: u32) {
        let generation = self.cache.generation(BUTTONS_KIND);
        if self.in_flight.get(&page) == Some(&generation) {
            return;
        }
        self.in_flight.insert(page, generation);

        let skip = u64::from(page - 1) * PER_PAGE;
        info!(
            event = "button.list_started",
            page = page,
            skip = skip,
            generation = generation
        );

        let service = Arc::clone(&self.service);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = service.list(skip, PER_PAGE).await;
            let _ = tx.send(Outcome::PageLoaded {
                page,
                generation,
                result,
            });
        });
    }

    /// Re-request the current page.
    pub fn refresh(&mut self) {
        self.list_error = None;
        self.fetch_page(self.route.page);
    }

    /// Navigate to `page` and show it.
    pub fn set_page(&mut self, page: u32) {
        let route = self.route.to_page(page);
        if route == self.route {
            return;
        }
        self.route = route;
        self.selected_index = 0;
        self.list_error = None;
        self.ensure_page();
    }

    pub fn next_page(&mut self) {
        if self.route.page < self.total_pages() {
            self.set_page(self.route.page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.route.page > 1 {
            self.set_page(self.route.page - 1);
        }
    }

    /// Rows to render, capped at the page size.
    pub fn rows(&self) -> &[Button] {
        match &self.page_data {
            Some(page) => {
                let len = cmp::min(page.data.len(), PER_PAGE as usize);
                &page.data[..len]
            }
            None => &[],
        }
    }

    /// Total record count from the displayed page.
    pub fn total_count(&self) -> u64 {
        self.page_data.as_ref().map_or(0, |page| page.count)
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count().div_ceil(PER_PAGE).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Nothing has loaded yet and a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.page_data.is_none() && self.in_flight.contains_key(&self.route.page)
    }

    /// Displayed rows belong to a different page than the route.
    pub fn is_placeholder(&self) -> bool {
        self.page_data.is_some() && self.page_data_for != self.route.page
    }

    pub fn selected_button(&self) -> Option<&Button> {
        self.rows().get(self.selected_index)
    }

    pub fn move_up(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    pub fn move_down(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    fn clamp_selection(&mut self) {
        self.selected_index = cmp::min(self.selected_index, self.rows().len().saturating_sub(1));
    }

    /// Mark all button pages stale and re-fetch the one on screen.
    fn invalidate_buttons(&mut self) {
        let marked = self.cache.invalidate(BUTTONS_KIND);
        info!(event = "button.cache_invalidated", pages = marked);
        self.ensure_page();
    }

    // ---- actions menu -------------------------------------------------

    /// Actions available for the selected row.
    pub fn menu_actions(&self) -> Vec<MenuAction> {
        match self.selected_button() {
            Some(button) => vec![
                MenuAction::Edit,
                if button.is_retired() {
                    MenuAction::Unretire
                } else {
                    MenuAction::Retire
                },
                MenuAction::Delete,
            ],
            None => Vec::new(),
        }
    }

    pub fn open_menu(&mut self) {
        if self.selected_button().is_some() {
            self.menu_index = 0;
            self.mode = UiMode::ActionsMenu;
        }
    }

    pub fn close_menu(&mut self) {
        self.mode = UiMode::List;
    }

    pub fn menu_up(&mut self) {
        let len = self.menu_actions().len();
        if len > 0 {
            self.menu_index = (self.menu_index + len - 1) % len;
        }
    }

    pub fn menu_down(&mut self) {
        let len = self.menu_actions().len();
        if len > 0 {
            self.menu_index = (self.menu_index + 1) % len;
        }
    }

    /// Run the highlighted menu entry.
    pub fn activate_menu(&mut self) {
        let Some(action) = self.menu_actions().get(self.menu_index).copied() else {
            self.close_menu();
            return;
        };
        self.mode = UiMode::List;
        match action {
            MenuAction::Edit => self.open_edit(),
            MenuAction::Retire | MenuAction::Unretire => {
                self.toggle_retire();
            }
            MenuAction::Delete => self.open_delete(),
        }
    }

    // ---- create / edit ------------------------------------------------

    pub fn open_create(&mut self) {
        self.form_dialog = Some(FormDialog {
            form: self.create_draft.clone(),
            target: None,
            pending: false,
        });
        self.mode = UiMode::Form;
    }

    /// Open the edit dialog for the selected row.
    ///
    /// # Details
    /// A record edited earlier in this session reopens with its last form
    /// state; otherwise the form is pre-filled from the row.
    pub fn open_edit(&mut self) {
        let Some(button) = self.selected_button() else {
            return;
        };
        let form = self
            .edit_drafts
            .get(&button.id)
            .cloned()
            .unwrap_or_else(|| ButtonForm::edit(button));
        let dialog = FormDialog {
            form,
            target: Some(button.id),
            pending: false,
        };
        self.form_dialog = Some(dialog);
        self.mode = UiMode::Form;
    }

    /// Close the form dialog unless a submission is pending.
    pub fn close_form(&mut self) {
        if self.form_dialog.as_ref().is_some_and(|d| d.pending) {
            return;
        }
        if let Some(dialog) = self.form_dialog.take() {
            match dialog.target {
                None => self.create_draft = dialog.form,
                Some(id) => {
                    self.edit_drafts.insert(id, dialog.form);
                }
            }
        }
        self.mode = UiMode::List;
    }

    /// Validate and submit the open form.
    ///
    /// # Returns
    /// * `bool` - Whether a backend request was issued
    pub fn submit_form(&mut self) -> bool {
        let Some(dialog) = self.form_dialog.as_mut() else {
            return false;
        };
        if dialog.pending {
            return false;
        }

        match dialog.target {
            None => {
                let body = match dialog.form.to_create() {
                    Ok(body) => body,
                    Err(errors) => {
                        info!(event = "button.create_invalid", fields = errors.len());
                        return false;
                    }
                };
                dialog.pending = true;
                info!(event = "button.create_started", title = %body.title);

                let service = Arc::clone(&self.service);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let result = service.create(&body).await;
                    let _ = tx.send(Outcome::Created(result));
                });
            }
            Some(id) => {
                let body = match dialog.form.to_update() {
                    Ok(body) => body,
                    Err(errors) => {
                        info!(event = "button.update_invalid", id = %id, fields = errors.len());
                        return false;
                    }
                };
                dialog.pending = true;
                info!(event = "button.update_started", id = %id);

                let service = Arc::clone(&self.service);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let result = service.update(id, &body).await;
                    let _ = tx.send(Outcome::Updated { id, result });
                });
            }
        }
        true
    }

    // ---- delete / retire ----------------------------------------------

    pub fn open_delete(&mut self) {
        let Some(button) = self.selected_button() else {
            return;
        };
        let dialog = DeleteDialog {
            id: button.id,
            title: button.title.clone(),
            pending: false,
            error: None,
        };
        self.delete_dialog = Some(dialog);
        self.mode = UiMode::ConfirmDelete;
    }

    pub fn close_delete(&mut self) {
        if self.delete_dialog.as_ref().is_some_and(|d| d.pending) {
            return;
        }
        self.delete_dialog = None;
        self.mode = UiMode::List;
    }

    /// Send the delete for the confirmed record.
    ///
    /// # Arguments
    /// * `force` - Also remove usage and retirement history
    pub fn confirm_delete(&mut self, force: bool) -> bool {
        let Some(dialog) = self.delete_dialog.as_mut() else {
            return false;
        };
        if dialog.pending {
            return false;
        }
        dialog.pending = true;
        dialog.error = None;
        let id = dialog.id;
        info!(event = "button.delete_started", id = %id, force = force);

        let service = Arc::clone(&self.service);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = service.delete(id, force).await;
            let _ = tx.send(Outcome::Deleted { id, result });
        });
        true
    }

    /// Retire or unretire the selected record, depending on its state.
    pub fn toggle_retire(&mut self) -> bool {
        if self.retire_pending.is_some() {
            return false;
        }
        let Some(button) = self.selected_button() else {
            return false;
        };
        let id = button.id;
        let retire = !button.is_retired();
        self.retire_pending = Some(id);
        info!(event = "button.retire_started", id = %id, retire = retire);

        let service = Arc::clone(&self.service);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = service.retire(id, retire).await;
            let _ = tx.send(Outcome::Retired { id, retire, result });
        });
        true
    }

    // ---- outcomes -----------------------------------------------------

    /// Apply every outcome that has already arrived.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
        }
    }

    /// Wait for the next outcome and apply it.
    #[cfg(test)]
    pub async fn settle_one(&mut self) {
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.apply(outcome);
        }
    }

    /// Drop expired notifications.
    pub fn tick(&mut self) {
        self.notifications.prune(Instant::now());
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PageLoaded {
                page,
                generation,
                result,
            } => self.on_page_loaded(page, generation, result),
            Outcome::Created(result) => self.on_created(result),
            Outcome::Updated { id, result } => self.on_updated(id, result),
            Outcome::Deleted { id, result } => self.on_deleted(id, result),
            Outcome::Retired { id, retire, result } => self.on_retired(id, retire, result),
        }
    }

    fn on_page_loaded(
        &mut self,
        page: u32,
        generation: u64,
        result: Result<ButtonsPage, ApiError>,
    ) {
        if self.in_flight.get(&page) == Some(&generation) {
            self.in_flight.remove(&page);
        }
        match result {
            Ok(data) => {
                info!(
                    event = "button.list_completed",
                    page = page,
                    generation = generation,
                    rows = data.data.len(),
                    count = data.count
                );
                let key = QueryKey::buttons(page);
                if !self.cache.insert(key, data.clone(), generation) {
                    return;
                }
                if page == self.route.page {
                    self.page_data = Some(data);
                    self.page_data_for = page;
                    self.list_error = None;
                    self.clamp_selection();
                    if !self.cache.is_fresh(&key) {
                        self.fetch_page(page);
                    }
                }
            }
            Err(e) => {
                warn!(event = "button.list_failed", page = page, error = %e);
                if page == self.route.page {
                    self.list_error = Some(e.user_message());
                }
                self.notifications.error(e.user_message());
            }
        }
    }

    fn on_created(&mut self, result: Result<Button, ApiError>) {
        let Some(dialog) = self.form_dialog.as_mut() else {
            return;
        };
        dialog.pending = false;
        match result {
            Ok(button) => {
                info!(event = "button.create_completed", id = %button.id);
                self.notifications.success("Button created successfully.");
                self.create_draft = ButtonForm::create();
                self.form_dialog = None;
                self.mode = UiMode::List;
                self.invalidate_buttons();
            }
            Err(e) => {
                warn!(event = "button.create_failed", error = %e);
                self.notifications.error(e.user_message());
            }
        }
    }

    fn on_updated(&mut self, id: Uuid, result: Result<Button, ApiError>) {
        let Some(dialog) = self.form_dialog.as_mut() else {
            return;
        };
        dialog.pending = false;
        match result {
            Ok(_) => {
                info!(event = "button.update_completed", id = %id);
                dialog.form.commit_baseline();
                let form = dialog.form.clone();
                self.edit_drafts.insert(id, form);
                self.notifications.success("Button updated successfully.");
                self.form_dialog = None;
                self.mode = UiMode::List;
                self.invalidate_buttons();
            }
            Err(e) => {
                warn!(event = "button.update_failed", id = %id, error = %e);
                self.notifications.error(e.user_message());
            }
        }
    }

    fn on_deleted(&mut self, id: Uuid, result: Result<(), ApiError>) {
        if let Some(dialog) = self.delete_dialog.as_mut() {
            dialog.pending = false;
        }
        match result {
            Ok(()) => {
                info!(event = "button.delete_completed", id = %id);
                self.notifications.success("Button deleted successfully.");
                self.edit_drafts.remove(&id);
                self.delete_dialog = None;
                if self.mode == UiMode::ConfirmDelete {
                    self.mode = UiMode::List;
                }
                self.invalidate_buttons();
            }
            Err(e) => {
                warn!(event = "button.delete_failed", id = %id, error = %e);
                if let Some(dialog) = self.delete_dialog.as_mut() {
                    dialog.error = Some(e.user_message());
                }
                self.notifications.error(e.user_message());
            }
        }
    }

    fn on_retired(&mut self, id: Uuid, retire: bool, result: Result<Button, ApiError>) {
        self.retire_pending = None;
        match result {
            Ok(_) => {
                info!(event = "button.retire_completed", id = %id, retire = retire);
                self.notifications.success(if retire {
                    "Button retired."
                } else {
                    "Button unretired."
                });
                self.invalidate_buttons();
            }
            Err(e) => {
                warn!(event = "button.retire_failed", id = %id, error = %e);
                self.notifications.error(e.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeButtonService;
    use crate::form::Field;
    use crate::notify::Level;

    fn new_app(service: Arc<FakeButtonService>, page: u32) -> App {
        App::new(service, Route::with_page(page), Duration::from_secs(5))
    }

    async fn load(app: &mut App) {
        app.ensure_page();
        app.settle_one().await;
    }

    fn type_into(app: &mut App, field: Field, text: &str) {
        let dialog = app.form_dialog.as_mut().unwrap();
        dialog.form.focus = field;
        for ch in text.chars() {
            dialog.form.input_char(ch);
        }
    }

    fn latest(app: &App) -> (Level, String) {
        let note = app.notifications.latest().unwrap();
        (note.level, note.message.clone())
    }

    #[tokio::test]
    async fn test_first_load_shows_loading_then_rows() {
        let service = Arc::new(FakeButtonService::seeded(7));
        let mut app = new_app(service.clone(), 1);

        app.ensure_page();
        assert!(app.is_loading());
        assert!(app.rows().is_empty());

        app.settle_one().await;
        assert!(!app.is_loading());
        assert_eq!(app.rows().len(), 5);
        assert_eq!(app.total_count(), 7);
        assert_eq!(app.total_pages(), 2);
        assert_eq!(FakeButtonService::calls(&service.list_calls), 1);
    }

    #[tokio::test]
    async fn test_page_change_keeps_placeholder_rows() {
        let service = Arc::new(FakeButtonService::seeded(7));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.next_page();
        assert_eq!(app.route.page, 2);
        assert!(!app.is_loading());
        assert!(app.is_placeholder());
        assert_eq!(app.rows()[0].title, "Button 1");

        app.settle_one().await;
        assert!(!app.is_placeholder());
        assert_eq!(app.rows().len(), 2);
        assert_eq!(app.rows()[0].title, "Button 6");

        // Going back is served from the cache without a request
        app.prev_page();
        assert!(!app.is_placeholder());
        assert_eq!(app.rows()[0].title, "Button 1");
        assert_eq!(FakeButtonService::calls(&service.list_calls), 2);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_not_error() {
        let service = Arc::new(FakeButtonService::seeded(5));
        let mut app = new_app(service.clone(), 2);
        load(&mut app).await;

        assert!(app.rows().is_empty());
        assert_eq!(app.total_count(), 5);
        assert!(app.list_error.is_none());
        assert!(app.notifications.latest().is_none());
    }

    #[tokio::test]
    async fn test_next_page_stops_at_last_page() {
        let service = Arc::new(FakeButtonService::seeded(3));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;
        app.next_page();
        assert_eq!(app.route.page, 1);
        app.prev_page();
        assert_eq!(app.route.page, 1);
    }

    #[tokio::test]
    async fn test_list_failure_is_reported_once() {
        let service = Arc::new(FakeButtonService::seeded(2));
        service.fail_next(500, "Database unavailable");
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        assert_eq!(app.list_error.as_deref(), Some("Database unavailable"));
        assert_eq!(latest(&app), (Level::Error, "Database unavailable".to_string()));
        assert_eq!(app.notifications.iter().count(), 1);
        assert_eq!(FakeButtonService::calls(&service.list_calls), 1);

        app.refresh();
        app.settle_one().await;
        assert!(app.list_error.is_none());
        assert_eq!(app.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_create_scenario_appears_on_refetch() {
        let service = Arc::new(FakeButtonService::default());
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;
        assert!(app.rows().is_empty());

        app.open_create();
        type_into(&mut app, Field::Title, "Intro PSA");
        type_into(&mut app, Field::Duration, "30");
        assert!(app.form_dialog.as_ref().unwrap().can_submit());
        assert!(app.submit_form());
        assert!(!app.form_dialog.as_ref().unwrap().can_submit());

        app.settle_one().await; // created
        assert!(app.form_dialog.is_none());
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.cache.invalidations(), 1);
        assert_eq!(
            latest(&app),
            (Level::Success, "Button created successfully.".to_string())
        );

        app.settle_one().await; // re-fetch of page 1
        let row = &app.rows()[0];
        assert_eq!(row.title, "Intro PSA");
        assert_eq!(row.button_type, "PSA");
        assert_eq!(row.duration, Some(30.0));
        assert_eq!(app.cache.invalidations(), 1);

        // Draft was reset
        app.open_create();
        assert!(app.form_dialog.as_ref().unwrap().form.values.title.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_create_never_calls_backend() {
        let service = Arc::new(FakeButtonService::default());
        let mut app = new_app(service.clone(), 1);

        app.open_create();
        assert!(!app.submit_form()); // empty title

        type_into(&mut app, Field::Title, "Sting");
        app.form_dialog.as_mut().unwrap().form.values.button_type.clear();
        assert!(!app.submit_form()); // empty type

        app.form_dialog.as_mut().unwrap().form.values.button_type = "SFX".to_string();
        type_into(&mut app, Field::Duration, "0");
        assert!(!app.submit_form()); // non-positive duration

        let errors = &app.form_dialog.as_ref().unwrap().form.errors;
        assert_eq!(
            errors.get(&Field::Duration).map(String::as_str),
            Some("Duration must be a positive number.")
        );
        assert_eq!(FakeButtonService::calls(&service.create_calls), 0);
        assert_eq!(app.cache.invalidations(), 0);
    }

    #[tokio::test]
    async fn test_pending_submit_is_not_repeated() {
        let service = Arc::new(FakeButtonService::default());
        let mut app = new_app(service.clone(), 1);
        app.open_create();
        type_into(&mut app, Field::Title, "Sting");
        assert!(app.submit_form());
        assert!(!app.submit_form());
        app.close_form();
        assert_eq!(app.mode, UiMode::Form);

        app.settle_one().await;
        assert_eq!(FakeButtonService::calls(&service.create_calls), 1);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_dialog_and_values() {
        let service = Arc::new(FakeButtonService::default());
        service.fail_next(400, "Insufficient permissions");
        let mut app = new_app(service.clone(), 1);

        app.open_create();
        type_into(&mut app, Field::Title, "Intro PSA");
        assert!(app.submit_form());
        app.settle_one().await;

        let dialog = app.form_dialog.as_ref().unwrap();
        assert!(!dialog.pending);
        assert_eq!(dialog.form.values.title, "Intro PSA");
        assert_eq!(app.mode, UiMode::Form);
        assert_eq!(
            latest(&app),
            (Level::Error, "Insufficient permissions".to_string())
        );
        assert_eq!(app.cache.invalidations(), 0);
    }

    #[tokio::test]
    async fn test_closed_create_draft_is_kept() {
        let service = Arc::new(FakeButtonService::default());
        let mut app = new_app(service, 1);
        app.open_create();
        type_into(&mut app, Field::Title, "Half typed");
        app.close_form();
        app.open_create();
        assert_eq!(
            app.form_dialog.as_ref().unwrap().form.values.title,
            "Half typed"
        );
    }

    #[tokio::test]
    async fn test_edit_unchanged_values_succeeds() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.open_menu();
        assert_eq!(app.mode, UiMode::ActionsMenu);
        app.activate_menu(); // Edit Button
        let dialog = app.form_dialog.as_ref().unwrap();
        assert_eq!(dialog.form.values.title, "Button 1");
        assert_eq!(dialog.form.values.button_type, "PSA");

        assert!(app.submit_form());
        app.settle_one().await;
        assert!(app.form_dialog.is_none());
        assert_eq!(
            latest(&app),
            (Level::Success, "Button updated successfully.".to_string())
        );
        assert_eq!(app.cache.invalidations(), 1);
        assert_eq!(FakeButtonService::calls(&service.update_calls), 1);
        assert_eq!(service.buttons()[0].title, "Button 1");
    }

    #[tokio::test]
    async fn test_edit_changes_title() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.open_edit();
        app.form_dialog.as_mut().unwrap().form.values.title = "Renamed".to_string();
        assert!(app.submit_form());
        app.settle_one().await; // updated

        // Submitted values became the form baseline
        app.open_edit();
        let form = &app.form_dialog.as_ref().unwrap().form;
        assert_eq!(form.values.title, "Renamed");
        assert!(!form.is_dirty());
        app.close_form();

        app.settle_one().await; // re-fetch
        assert_eq!(app.rows()[0].title, "Renamed");
    }

    #[tokio::test]
    async fn test_edit_failure_keeps_dialog_open() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.open_edit();
        service.fail_next(404, "Button not found");
        assert!(app.submit_form());
        app.settle_one().await;
        assert!(app.form_dialog.is_some());
        assert_eq!(latest(&app), (Level::Error, "Button not found".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_record_from_list() {
        let service = Arc::new(FakeButtonService::seeded(2));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.open_delete();
        assert_eq!(app.mode, UiMode::ConfirmDelete);
        assert!(app.confirm_delete(true));
        app.settle_one().await; // deleted
        assert!(app.delete_dialog.is_none());
        assert_eq!(
            latest(&app),
            (Level::Success, "Button deleted successfully.".to_string())
        );

        app.settle_one().await; // re-fetch
        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.rows()[0].title, "Button 2");
        assert_eq!(app.total_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_refused_keeps_confirmation() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.open_delete();
        assert!(app.confirm_delete(false));
        app.settle_one().await;
        assert!(app.delete_dialog.is_some());
        assert_eq!(app.mode, UiMode::ConfirmDelete);
        let (level, message) = latest(&app);
        assert_eq!(level, Level::Error);
        assert!(message.starts_with("Button must be retired"));
        assert_eq!(
            app.delete_dialog.as_ref().unwrap().error.as_deref(),
            Some(message.as_str())
        );

        assert_eq!(app.cache.invalidations(), 0);
        assert_eq!(service.buttons().len(), 1);

        // A new attempt clears the previous error
        assert!(app.confirm_delete(true));
        assert!(app.delete_dialog.as_ref().unwrap().error.is_none());
        app.settle_one().await;
        assert!(app.delete_dialog.is_none());
        assert!(service.buttons().is_empty());
    }

    #[tokio::test]
    async fn test_invalidation_refetches_over_pending_request() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        // A refresh is still pending when a retire completes
        app.refresh();
        let before = app.cache.get(&QueryKey::buttons(1)).unwrap().value.clone();
        let id = app.rows()[0].id;
        let retired = service.retire(id, true).await.unwrap();
        app.apply(Outcome::Retired {
            id,
            retire: true,
            result: Ok(retired),
        });

        // The pending request answers with rows from before the retire
        app.apply(Outcome::PageLoaded {
            page: 1,
            generation: 0,
            result: Ok(before),
        });
        assert!(!app.cache.is_fresh(&QueryKey::buttons(1)));
        assert!(!app.rows()[0].is_retired());

        // The real refresh, then the re-fetch sent by the invalidation
        app.settle_one().await;
        app.settle_one().await;
        assert!(app.cache.is_fresh(&QueryKey::buttons(1)));
        assert!(app.rows()[0].is_retired());
        assert!(app.in_flight.is_empty());
        assert_eq!(FakeButtonService::calls(&service.list_calls), 3);
    }

    #[tokio::test]
    async fn test_retire_then_menu_offers_unretire() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        assert_eq!(app.menu_actions()[1], MenuAction::Retire);
        assert!(app.toggle_retire());
        assert!(!app.toggle_retire());
        app.settle_one().await; // retired
        assert_eq!(latest(&app), (Level::Success, "Button retired.".to_string()));
        app.settle_one().await; // re-fetch
        assert!(app.rows()[0].is_retired());
        assert_eq!(app.menu_actions()[1], MenuAction::Unretire);

        // Retired records delete without force
        app.open_delete();
        assert!(app.confirm_delete(false));
        app.settle_one().await;
        app.settle_one().await;
        assert!(app.rows().is_empty());
    }

    #[tokio::test]
    async fn test_menu_navigation_wraps() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service, 1);
        load(&mut app).await;
        app.open_menu();
        app.menu_up();
        assert_eq!(app.menu_index, 2);
        app.menu_down();
        assert_eq!(app.menu_index, 0);
        app.close_menu();
        assert_eq!(app.mode, UiMode::List);
    }

    #[tokio::test]
    async fn test_menu_retire_entry_retires_selected_row() {
        let service = Arc::new(FakeButtonService::seeded(1));
        let mut app = new_app(service.clone(), 1);
        load(&mut app).await;

        app.open_menu();
        app.menu_down();
        app.activate_menu();
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.retire_pending, Some(app.rows()[0].id));

        app.settle_one().await;
        assert_eq!(app.retire_pending, None);
        assert_eq!(FakeButtonService::calls(&service.retire_calls), 1);
        assert!(service.buttons()[0].is_retired());
    }

    #[tokio::test]
    async fn test_selection_wraps_within_page() {
        let service = Arc::new(FakeButtonService::seeded(3));
        let mut app = new_app(service, 1);
        load(&mut app).await;
        app.move_up();
        assert_eq!(app.selected_index, 2);
        app.move_down();
        assert_eq!(app.selected_index, 0);
    }
}
