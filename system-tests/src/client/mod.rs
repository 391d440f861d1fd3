// system-tests/src/client/mod.rs
// ============================================================================
// Module: Bank API Client
// Description: Logging HTTP client with fixed retries and transcript capture.
// Purpose: Issue GET/POST calls against the mocked bank API for the suites.
// Dependencies: reqwest, serde_json, tokio, tracing
// ============================================================================

//! ## Overview
//! [`ApiClient`] wraps a `reqwest` client with the suite's conventions: every
//! exchange is logged under the `bank_api::http` target, retried according to
//! a [`RetryPolicy`], and appended to a [`Transcript`] that tests can persist
//! as an artifact.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod http;
mod retry;
mod transcript;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use http::ApiClient;
pub use http::ApiResponse;
pub use http::CORRELATION_ID_HEADER;
pub use http::ClientError;
pub use http::HTTP_LOG_TARGET;
pub use http::JSON_CONTENT_TYPE;
pub use http::request_headers;
pub use retry::DEFAULT_MAX_RETRIES;
pub use retry::DEFAULT_RETRY_DELAY;
pub use retry::FailureKind;
pub use retry::RETRYABLE_STATUSES;
pub use retry::RetryPolicy;
pub use transcript::Transcript;
pub use transcript::TranscriptEntry;
