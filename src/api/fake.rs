//! In-memory [`ButtonService`] used by tests.

use crate::api::models::{Button, ButtonCreate, ButtonUpdate, ButtonsPage};
use crate::api::service::{ApiError, ApiResult, ButtonService};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Records kept in insertion order, with call counters and an injectable failure.
#[derive(Debug, Default)]
pub struct FakeButtonService {
    buttons: Mutex<Vec<Button>>,
    fail_next: Mutex<Option<ApiError>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub retire_calls: AtomicUsize,
}

impl FakeButtonService {
    pub fn with_buttons(buttons: Vec<Button>) -> Self {
        Self {
            buttons: Mutex::new(buttons),
            ..Self::default()
        }
    }

    /// Seed `n` records titled `Button 1..=n`.
    pub fn seeded(n: usize) -> Self {
        Self::with_buttons(
            (1..=n)
                .map(|i| Button::new(Uuid::new_v4(), format!("Button {}", i), "PSA"))
                .collect(),
        )
    }

    /// Make the next call fail with a backend error carrying `detail`.
    pub fn fail_next(&self, status: u16, detail: &str) {
        *self.fail_next.lock().unwrap() = Some(ApiError::Status {
            status,
            detail: Some(detail.to_string()),
        });
    }

    pub fn buttons(&self) -> Vec<Button> {
        self.buttons.lock().unwrap().clone()
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> ApiResult<()> {
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            detail: Some("Button not found".to_string()),
        }
    }
}

#[async_trait]
impl ButtonService for FakeButtonService {
    async fn list(&self, skip: u64, limit: u64) -> ApiResult<ButtonsPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let buttons = self.buttons.lock().unwrap();
        Ok(ButtonsPage {
            data: buttons
                .iter()
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
            count: buttons.len() as u64,
        })
    }

    async fn create(&self, body: &ButtonCreate) -> ApiResult<Button> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let mut button = Button::new(Uuid::new_v4(), &body.title, &body.button_type);
        button.description = body.description.clone();
        button.source = body.source.clone();
        button.duration = body.duration;
        self.buttons.lock().unwrap().push(button.clone());
        Ok(button)
    }

    async fn update(&self, id: Uuid, body: &ButtonUpdate) -> ApiResult<Button> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let mut buttons = self.buttons.lock().unwrap();
        let button = buttons
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(Self::not_found)?;
        if let Some(title) = &body.title {
            button.title = title.clone();
        }
        if let Some(button_type) = &body.button_type {
            button.button_type = button_type.clone();
        }
        if body.description.is_some() {
            button.description = body.description.clone();
        }
        if body.source.is_some() {
            button.source = body.source.clone();
        }
        if body.duration.is_some() {
            button.duration = body.duration;
        }
        Ok(button.clone())
    }

    async fn delete(&self, id: Uuid, force: bool) -> ApiResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let mut buttons = self.buttons.lock().unwrap();
        let index = buttons
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(Self::not_found)?;
        if !force && !buttons[index].is_retired() {
            return Err(ApiError::Status {
                status: 400,
                detail: Some(
                    "Button must be retired before it can be deleted (override with `force=true`)"
                        .to_string(),
                ),
            });
        }
        buttons.remove(index);
        Ok(())
    }

    async fn retire(&self, id: Uuid, retire: bool) -> ApiResult<Button> {
        self.retire_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let mut buttons = self.buttons.lock().unwrap();
        let button = buttons
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(Self::not_found)?;
        button.retired_at = if retire { Some(Utc::now()) } else { None };
        Ok(button.clone())
    }
}
