// system-tests/src/client/http.rs
// ============================================================================
// Module: API HTTP Client
// Description: GET/POST wrapper with logging, retries, and transcripts.
// Purpose: Give every suite the same request conventions.
// Dependencies: reqwest, serde, serde_json, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! Requests are built from an endpoint path joined to the base URL. POST
//! bodies are JSON and default to `Content-Type: application/json`. A status
//! response is always returned to the caller (after retries); only transport
//! failures surface as [`ClientError::Transport`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::header::InvalidHeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;
use tracing::warn;

use super::retry::FailureKind;
use super::retry::RetryPolicy;
use super::transcript::Transcript;
use super::transcript::TranscriptEntry;
use crate::config::SuiteConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Tracing target for request/response logs.
pub const HTTP_LOG_TARGET: &str = "bank_api::http";
/// Header carrying the per-request correlation ID.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
/// Media type of every request and response body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client")]
    Build(#[source] reqwest::Error),
    /// A header value contains bytes HTTP does not allow.
    #[error("invalid value for header {name}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// Validation failure.
        #[source]
        source: InvalidHeaderValue,
    },
    /// The request payload could not be serialized.
    #[error("failed to encode request payload")]
    Encode(#[source] serde_json::Error),
    /// No response was received after all permitted attempts.
    #[error("{method} {url} failed after {attempts} attempt(s)")]
    Transport {
        /// Request method.
        method: Method,
        /// Request URL.
        url: String,
        /// Attempts made.
        attempts: u32,
        /// Last transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The response body does not decode into the requested type.
    #[error("failed to decode response from {url} (status {status})")]
    Decode {
        /// Request URL.
        url: String,
        /// Response status.
        status: u16,
        /// Decode failure.
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// SECTION: Headers
// ============================================================================

/// Builds the standard request headers for one call.
///
/// # Errors
///
/// Returns [`ClientError::InvalidHeader`] when `correlation_id` is not a
/// valid header value.
pub fn request_headers(correlation_id: &str) -> Result<HeaderMap, ClientError> {
    let value = HeaderValue::from_str(correlation_id).map_err(|source| {
        ClientError::InvalidHeader {
            name: CORRELATION_ID_HEADER,
            source,
        }
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(headers)
}

/// Renders headers as `name: value` pairs for logs.
fn render_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {}", value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Request URL.
    url: String,
    /// Response status.
    status: StatusCode,
    /// Response headers.
    headers: HeaderMap,
    /// Response body, lossily decoded as UTF-8.
    body: String,
}

impl ApiResponse {
    /// Reads the body of a `reqwest` response.
    async fn read(url: &str, response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        Ok(Self {
            url: url.to_string(),
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response status as a number.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw response body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|source| ClientError::Decode {
            url: self.url.clone(),
            status: self.status_code(),
            source,
        })
    }

    /// Returns the body as a JSON value when it parses.
    #[must_use]
    pub fn json_value(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body as JSON when it parses, else as a JSON string.
    fn body_value(&self) -> Value {
        self.json_value().unwrap_or_else(|| Value::String(self.body.clone()))
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client for the mocked bank API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Underlying connection pool.
    client: Client,
    /// Retry rules applied to every call.
    retry: RetryPolicy,
    /// Exchanges issued through this client and its clones.
    transcript: Transcript,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build().map_err(ClientError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            client,
            retry: RetryPolicy::default(),
            transcript: Transcript::default(),
        })
    }

    /// Creates a client from suite configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be built.
    pub fn from_config(config: &SuiteConfig) -> Result<Self, ClientError> {
        Self::new(config.base_url.clone(), config.timeout)
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Active retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns a snapshot of the recorded exchanges.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.entries()
    }

    /// Full URL for an endpoint path such as `/accounts/ACC001`.
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response is received.
    pub async fn get(&self, endpoint: &str, headers: &HeaderMap) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, endpoint, headers.clone(), None).await
    }

    /// Issues a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] when the payload does not serialize, or
    /// [`ClientError::Transport`] when no response is received.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
        headers: &HeaderMap,
    ) -> Result<ApiResponse, ClientError> {
        let payload = serde_json::to_value(payload).map_err(ClientError::Encode)?;
        let mut headers = headers.clone();
        headers.entry(CONTENT_TYPE).or_insert(HeaderValue::from_static(JSON_CONTENT_TYPE));
        self.send(Method::POST, endpoint, headers, Some(payload)).await
    }

    /// Sends a request, applying the retry policy and recording the outcome.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        headers: HeaderMap,
        payload: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(endpoint);
        log_request(&method, &url, &headers, payload.as_ref());
        let mut retries_used = 0_u32;
        loop {
            let mut request = self.client.request(method.clone(), &url).headers(headers.clone());
            if let Some(payload) = &payload {
                request = request.json(payload);
            }
            let outcome = match request.send().await {
                Ok(response) => ApiResponse::read(&url, response).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(response) => {
                    if self.retry.has_budget(retries_used)
                        && self.retry.retries_status(&method, response.status())
                    {
                        retries_used += 1;
                        warn!(
                            target: HTTP_LOG_TARGET,
                            %method,
                            %url,
                            status = response.status_code(),
                            retry = retries_used,
                            "retryable status"
                        );
                        sleep(self.retry.delay).await;
                        continue;
                    }
                    log_response(&response);
                    self.transcript.record(TranscriptEntry {
                        sequence: 0,
                        method: method.to_string(),
                        url: url.clone(),
                        status: Some(response.status_code()),
                        request: payload.clone().unwrap_or(Value::Null),
                        response: response.body_value(),
                        error: None,
                    });
                    return Ok(response);
                }
                Err(err) => {
                    let failure = FailureKind::of(&err);
                    if self.retry.has_budget(retries_used)
                        && self.retry.retries_failure(&method, failure)
                    {
                        retries_used += 1;
                        warn!(
                            target: HTTP_LOG_TARGET,
                            %method,
                            %url,
                            error = %err,
                            retry = retries_used,
                            "transport failure"
                        );
                        sleep(self.retry.delay).await;
                        continue;
                    }
                    warn!(target: HTTP_LOG_TARGET, %method, %url, error = %err, "request failed");
                    self.transcript.record(TranscriptEntry {
                        sequence: 0,
                        method: method.to_string(),
                        url: url.clone(),
                        status: None,
                        request: payload.clone().unwrap_or(Value::Null),
                        response: Value::Null,
                        error: Some(err.to_string()),
                    });
                    return Err(ClientError::Transport {
                        method,
                        url,
                        attempts: retries_used.saturating_add(1),
                        source: err,
                    });
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Logging
// ============================================================================

/// Logs an outgoing request.
fn log_request(method: &Method, url: &str, headers: &HeaderMap, payload: Option<&Value>) {
    info!(target: HTTP_LOG_TARGET, "Request: {method} {url}");
    info!(target: HTTP_LOG_TARGET, "Request headers: {}", render_headers(headers));
    if let Some(payload) = payload {
        info!(target: HTTP_LOG_TARGET, "Request payload: {payload}");
    }
}

/// Logs a final response.
fn log_response(response: &ApiResponse) {
    info!(target: HTTP_LOG_TARGET, "Response code: {}", response.status_code());
    info!(target: HTTP_LOG_TARGET, "Response headers: {}", render_headers(response.headers()));
    match response.json_value() {
        Some(body) => info!(target: HTTP_LOG_TARGET, "Response body: {body}"),
        None => info!(target: HTTP_LOG_TARGET, "Response body (text): {}", response.text()),
    }
}
