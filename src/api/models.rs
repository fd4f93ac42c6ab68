//! Button service models and wire structures.
//!
//! Mirrors the JSON shapes exchanged with the `/buttons` REST endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default button type for new records.
pub const DEFAULT_BUTTON_TYPE: &str = "PSA";

/// A button record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Button {
    /// Server-assigned identifier
    pub id: Uuid,
    /// Display title (never empty)
    pub title: String,
    /// Free-text type such as PSA, ID or SFX
    #[serde(rename = "type")]
    pub button_type: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional source reference
    #[serde(default)]
    pub source: Option<String>,
    /// Optional duration in seconds, strictly positive when present
    #[serde(default)]
    pub duration: Option<f64>,
    /// Creator of the record
    #[serde(default)]
    pub created_by: Option<Uuid>,
    /// Number of recorded uses
    #[serde(default)]
    pub usage_count: u64,
    /// Retirement timestamp, `None` while active
    #[serde(default)]
    pub retired_at: Option<DateTime<Utc>>,
}

impl Button {
    /// Create a new active button with no usage.
    pub fn new(id: Uuid, title: impl Into<String>, button_type: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            button_type: button_type.into(),
            description: None,
            source: None,
            duration: None,
            created_by: None,
            usage_count: 0,
            retired_at: None,
        }
    }

    /// Whether the button has been retired.
    pub fn is_retired(&self) -> bool {
        self.retired_at.is_some()
    }

    /// Format duration in seconds, dropping a trailing `.0`.
    ///
    /// # Returns
    /// * `String` - e.g. `30s`, `2.5s`, or `-` when absent
    pub fn format_duration(&self) -> String {
        match self.duration {
            Some(d) => format!("{}s", format_number(d)),
            None => "-".to_string(),
        }
    }

    /// Short form of the identifier for narrow table cells.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string().chars().take(8).collect()
    }
}

/// Format a float without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One page of buttons plus the total count across all pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ButtonsPage {
    /// Records on this page
    pub data: Vec<Button>,
    /// Total number of records
    pub count: u64,
}

/// Body for `POST /buttons/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ButtonCreate {
    pub title: String,
    #[serde(rename = "type")]
    pub button_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Body for `PUT /buttons/{id}`.
///
/// Fields left as `None` are omitted so the server keeps their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ButtonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub button_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Body for `PUT /buttons/{id}/retire`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetireRequest {
    pub retire: bool,
}

/// Generic message response.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

/// `detail` is either plain text or a list of items.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Items(Vec<DetailItem>),
}

/// One entry of a `detail` list: a validation failure or a bare message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DetailItem {
    Validation { msg: String },
    Text(String),
}

impl DetailItem {
    fn message(&self) -> &str {
        match self {
            DetailItem::Validation { msg } => msg,
            DetailItem::Text(text) => text,
        }
    }
}

impl ApiErrorBody {
    /// Extract the user-facing message, if the body carries one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            ErrorDetail::Text(text) if !text.is_empty() => Some(text.clone()),
            ErrorDetail::Text(_) => None,
            ErrorDetail::Items(items) => items
                .iter()
                .map(DetailItem::message)
                .find(|msg| !msg.is_empty())
                .map(str::to_string),
        }
    }
}
