//! HTTP client for the button REST API.
//!
//! Implements [`ButtonService`] on top of reqwest.

use crate::api::models::{
    ApiErrorBody, Button, ButtonCreate, ButtonUpdate, ButtonsPage, Message, RetireRequest,
};
use crate::api::service::{ApiError, ApiResult, ButtonService};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Button API client.
///
/// Holds a shared reqwest client with the configured timeout and optional bearer token.
#[derive(Debug, Clone)]
pub struct ButtonClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `http://localhost:8000/api/v1` (no trailing slash)
    base_url: String,
    /// Pre-issued bearer token, if configured
    access_token: Option<String>,
}

impl ButtonClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<ButtonClient>` - New client or error
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Build an absolute URL for a path below the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and turn non-success statuses into [`ApiError::Status`].
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = parse_error_detail(&body);
        warn!(
            event = "button.api_error",
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or("")
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Pull the user-facing message out of an error response body.
fn parse_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message())
}

#[async_trait]
impl ButtonService for ButtonClient {
    async fn list(&self, skip: u64, limit: u64) -> ApiResult<ButtonsPage> {
        let request = self
            .client
            .get(self.endpoint("buttons/"))
            .query(&[("skip", skip), ("limit", limit)]);

        let page: ButtonsPage = self.send(request).await?.json().await?;
        debug!(
            event = "button.api_list_received",
            skip = skip,
            rows = page.data.len(),
            count = page.count
        );
        Ok(page)
    }

    async fn create(&self, body: &ButtonCreate) -> ApiResult<Button> {
        let request = self.client.post(self.endpoint("buttons/")).json(body);
        Ok(self.send(request).await?.json().await?)
    }

    async fn update(&self, id: Uuid, body: &ButtonUpdate) -> ApiResult<Button> {
        let request = self
            .client
            .put(self.endpoint(&format!("buttons/{}", id)))
            .json(body);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete(&self, id: Uuid, force: bool) -> ApiResult<()> {
        let mut request = self.client.delete(self.endpoint(&format!("buttons/{}", id)));
        if force {
            request = request.query(&[("force", "true")]);
        }

        let message: Message = self.send(request).await?.json().await?;
        debug!(event = "button.api_delete_received", message = %message.message);
        Ok(())
    }

    async fn retire(&self, id: Uuid, retire: bool) -> ApiResult<Button> {
        let request = self
            .client
            .put(self.endpoint(&format!("buttons/{}/retire", id)))
            .json(&RetireRequest { retire });
        Ok(self.send(request).await?.json().await?)
    }
}
