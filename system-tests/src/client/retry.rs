// system-tests/src/client/retry.rs
// ============================================================================
// Module: Retry Policy
// Description: Fixed-count, fixed-delay retry rules for API calls.
// Purpose: Decide which failed exchanges are worth repeating.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! Connection failures never reached the server, so they are retried for any
//! method. Timeouts and overload statuses may have been processed, so they
//! are retried only for methods that are safe to repeat.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Statuses that signal a transient server-side condition.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

// ============================================================================
// SECTION: Failure Classification
// ============================================================================

/// Transport failure categories relevant to retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The connection could not be established.
    Connect,
    /// The request or response exceeded the client timeout.
    Timeout,
    /// Any other transport failure.
    Other,
}

impl FailureKind {
    /// Classifies a `reqwest` error.
    #[must_use]
    pub fn of(err: &reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connect
        } else if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Other
        }
    }
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Fixed-count, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// Creates a policy with `max_retries` retries spaced by `delay`.
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
        }
    }

    /// Single-shot policy.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Returns true when another attempt is allowed after `retries_used`.
    #[must_use]
    pub const fn has_budget(&self, retries_used: u32) -> bool {
        retries_used < self.max_retries
    }

    /// Returns true for methods that may be repeated after a partial exchange.
    #[must_use]
    pub fn is_retry_safe(method: &Method) -> bool {
        *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
    }

    /// Returns true when a response with `status` should be retried.
    #[must_use]
    pub fn retries_status(&self, method: &Method, status: StatusCode) -> bool {
        Self::is_retry_safe(method) && RETRYABLE_STATUSES.contains(&status.as_u16())
    }

    /// Returns true when a transport failure should be retried.
    #[must_use]
    pub fn retries_failure(&self, method: &Method, failure: FailureKind) -> bool {
        match failure {
            FailureKind::Connect => true,
            FailureKind::Timeout => Self::is_retry_safe(method),
            FailureKind::Other => false,
        }
    }
}
