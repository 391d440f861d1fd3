// system-tests/src/logging.rs
// ============================================================================
// Module: Logging
// Description: Process-wide tracing subscriber setup.
// Purpose: Route suite and client logs through one filtered formatter.
// Dependencies: dotenvy, tracing-subscriber
// ============================================================================

//! ## Overview
//! The filter comes from `BANK_API_LOG`, then `RUST_LOG`, then `info`. Both
//! may be set in `.env`, which is applied before the filter is built. Test
//! binaries write through the libtest capture so logs appear only for failing
//! tests; the wait tool writes to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ConfigError;
use crate::config::load_dotenv;

/// Variable holding the suite-specific log filter.
pub const LOG_FILTER_ENV: &str = "BANK_API_LOG";
/// Filter used when neither variable is set or valid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Where formatted log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// libtest output capture.
    TestCapture,
    /// Process stderr.
    Stderr,
}

/// Installs the subscriber for test binaries. Later calls are no-ops.
///
/// # Errors
///
/// Returns [`ConfigError::DotEnv`] when `.env` exists but cannot be parsed.
pub fn init() -> Result<bool, ConfigError> {
    init_with(LogOutput::TestCapture)
}

/// Applies `.env`, then installs the subscriber for `output`.
///
/// The subscriber is installed even when `.env` is malformed, so the caller
/// can report the error through it. Returns `Ok(false)` when a global
/// subscriber was already installed.
///
/// # Errors
///
/// Returns [`ConfigError::DotEnv`] when `.env` exists but cannot be parsed.
pub fn init_with(output: LogOutput) -> Result<bool, ConfigError> {
    let dotenv = load_dotenv();
    let registry = tracing_subscriber::registry().with(env_filter());
    let installed = match output {
        LogOutput::TestCapture => registry.with(fmt::layer().with_test_writer()).try_init(),
        LogOutput::Stderr => registry.with(fmt::layer().with_writer(std::io::stderr)).try_init(),
    };
    dotenv.map(|()| installed.is_ok())
}

/// Builds the log filter from the environment.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
