//! Typed service interface for the button backend.

use crate::api::models::{Button, ButtonCreate, ButtonUpdate, ButtonsPage};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Message shown when the backend gives no usable error detail.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

/// Errors returned by a [`ButtonService`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-success status.
    #[error("Button API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Status {
        status: u16,
        detail: Option<String>,
    },

    /// Request could not be sent or the connection failed.
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to show the user in a notification.
    ///
    /// # Returns
    /// * `String` - Backend-provided detail when present, otherwise a generic message
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Backend operations the admin screen relies on.
///
/// Implemented over HTTP by [`crate::api::ButtonClient`]; tests use an in-memory fake.
#[async_trait]
pub trait ButtonService: Send + Sync {
    /// Fetch up to `limit` records starting at `skip`, plus the total count.
    async fn list(&self, skip: u64, limit: u64) -> ApiResult<ButtonsPage>;

    /// Create a new record.
    async fn create(&self, body: &ButtonCreate) -> ApiResult<Button>;

    /// Update an existing record; unset fields are left unchanged.
    async fn update(&self, id: Uuid, body: &ButtonUpdate) -> ApiResult<Button>;

    /// Remove a record. `force` also drops its usage and retirement history.
    async fn delete(&self, id: Uuid, force: bool) -> ApiResult<()>;

    /// Retire (`true`) or unretire (`false`) a record.
    async fn retire(&self, id: Uuid, retire: bool) -> ApiResult<Button>;
}
