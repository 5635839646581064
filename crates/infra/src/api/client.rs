//! Moltbook API client
//!
//! Owns the HTTP client, the currently held API key, and the
//! status-to-error classification table. Typed endpoint methods live in
//! `endpoints.rs`; everything there funnels through [`MoltbookClient::perform`].

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use moltpass_domain::ApiErrorBody;

use super::errors::ApiError;
use crate::config::ApiConfig;

/// How much of an undecodable body is kept for diagnostics.
const DECODE_DIAGNOSTIC_BYTES: usize = 500;

/// Authenticated HTTP gateway to the Moltbook API.
///
/// Builds requests from the held key, performs them, and classifies the
/// outcome. The only mutable state is the API key, swapped on sign-in and
/// sign-out.
pub struct MoltbookClient {
    config: ApiConfig,
    http: reqwest::Client,
    api_key: RwLock<Option<String>>,
    authenticated: AtomicBool,
}

impl MoltbookClient {
    /// Create a client with no API key held.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::Client::builder().timeout(config.timeout).build().unwrap_or_else(
            |e| {
                warn!(error = %e, "HTTP client builder failed; falling back without the configured timeout");
                reqwest::Client::new()
            },
        );

        Self { config, http, api_key: RwLock::new(None), authenticated: AtomicBool::new(false) }
    }

    /// Create a client that already holds an API key (restored session).
    #[must_use]
    pub fn with_api_key(config: ApiConfig, api_key: impl Into<String>) -> Self {
        let client = Self::new(config);
        client.set_api_key(api_key);
        client
    }

    /// Hold `key` and mark the client authenticated. No network effect.
    pub fn set_api_key(&self, key: impl Into<String>) {
        *self.api_key.write() = Some(key.into());
        self.authenticated.store(true, Ordering::Release);
    }

    /// Drop the held key. No network effect.
    pub fn clear_api_key(&self) {
        *self.api_key.write() = None;
        self.authenticated.store(false, Ordering::Release);
    }

    /// Whether a key is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    /// Build a request against the configured base URL.
    ///
    /// Sets `Content-Type: application/json` and, when a key is held,
    /// `Authorization: Bearer <key>`. Pure over the held key state.
    #[must_use]
    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut builder =
            self.http.request(method, url).header("Content-Type", "application/json");

        if let Some(key) = self.api_key.read().as_deref() {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        builder
    }

    /// Issue a request and decode a 2xx body as `T`.
    ///
    /// # Errors
    /// - 2xx with an undecodable body → [`ApiError::Decode`] carrying the
    ///   first ~500 bytes of the raw body; never retried
    /// - 401 → [`ApiError::Unauthorized`], 404 → [`ApiError::NotFound`]
    /// - 429 → [`ApiError::RateLimited`] (structured retry hint when the
    ///   body decodes)
    /// - other statuses → structured error decode, else [`ApiError::Unknown`]
    /// - transport failure → [`ApiError::Network`]
    pub async fn perform<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.dispatch(request).await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| {
                warn!(status = status.as_u16(), error = %e, "Response body failed to decode");
                ApiError::Decode { body_prefix: body_prefix(&body) }
            });
        }

        Err(classify_failure(status, &body))
    }

    /// Issue a request, discarding any 2xx body.
    ///
    /// # Errors
    /// Same classification as [`MoltbookClient::perform`].
    pub async fn perform_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let (status, body) = self.dispatch(request).await?;

        if status.is_success() {
            return Ok(());
        }

        Err(classify_failure(status, &body))
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let response =
            request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Response received");

        let body =
            response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?.to_vec();

        Ok((status, body))
    }
}

impl std::fmt::Debug for MoltbookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoltbookClient")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

fn classify_failure(status: StatusCode, body: &[u8]) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => {
            // Structured body carries an optional retry hint; a broken body
            // still classifies as rate-limited
            let retry_after_minutes = serde_json::from_slice::<ApiErrorBody>(body)
                .ok()
                .and_then(|b| b.retry_after_minutes);
            ApiError::RateLimited { retry_after_minutes }
        }
        other => match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(parsed) => ApiError::Unknown {
                status: other.as_u16(),
                message: parsed.message.or(Some(parsed.error)),
            },
            Err(_) => ApiError::Unknown { status: other.as_u16(), message: None },
        },
    }
}

fn body_prefix(body: &[u8]) -> String {
    let cut = body.len().min(DECODE_DIAGNOSTIC_BYTES);
    String::from_utf8_lossy(&body[..cut]).into_owned()
}
