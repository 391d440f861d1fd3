// system-tests/src/config/env.rs
// ============================================================================
// Module: Suite Environment
// Description: Environment-backed configuration for the bank API suites.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: dotenvy, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. A `.env` file in the working
//! directory or one of its parents is applied first; variables already set in
//! the process win.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Port the mock server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;
/// Per-request timeout when `BANK_API_TIMEOUT_SEC` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Mock server base URL.
    BaseUrl,
    /// Mock server port, used to build the default base URL.
    Port,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Fail instead of skip when the mock is unreachable (`true`/`false` or `1`/`0`).
    RequireServer,
    /// Optional artifact root override.
    RunRoot,
}

impl SuiteEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "BASE_URL",
            Self::Port => "PORT",
            Self::TimeoutSeconds => "BANK_API_TIMEOUT_SEC",
            Self::RequireServer => "BANK_API_REQUIRE_SERVER",
            Self::RunRoot => "BANK_API_RUN_ROOT",
        }
    }

    /// Returns every key in load order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::BaseUrl, Self::Port, Self::TimeoutSeconds, Self::RequireServer, Self::RunRoot]
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading suite configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable holds bytes that are not UTF-8.
    #[error("{name} must be valid UTF-8")]
    NotUnicode {
        /// Variable name.
        name: String,
    },
    /// Variable is set but blank.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable name.
        name: String,
    },
    /// Variable is unset and has no default.
    #[error("Environment variable '{name}' is required")]
    Missing {
        /// Variable name.
        name: String,
    },
    /// Port is not in 1-65535.
    #[error("{name} must be a port number between 1 and 65535, got '{value}'")]
    InvalidPort {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
    /// Timeout is not a positive integer.
    #[error("{name} must be a positive integer number of seconds, got '{value}'")]
    InvalidTimeout {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
    /// Boolean flag is not a recognized literal.
    #[error("{name} must be 1, 0, true, or false, got '{value}'")]
    InvalidBool {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
    /// Base URL does not parse.
    #[error("{name} is not a valid URL: '{value}'")]
    InvalidUrl {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// Base URL is not http or https.
    #[error("{name} must use http or https, got '{scheme}'")]
    UnsupportedScheme {
        /// Variable name.
        name: &'static str,
        /// Offending scheme.
        scheme: String,
    },
    /// The `.env` file exists but could not be applied.
    #[error("failed to load .env file")]
    DotEnv(#[from] dotenvy::Error),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed suite configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Mock server base URL without a trailing slash.
    pub base_url: String,
    /// Mock server port.
    pub port: u16,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Fail instead of skip when the mock is unreachable.
    pub require_server: bool,
    /// Optional artifact root override.
    pub run_root: Option<PathBuf>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(DEFAULT_PORT),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            require_server: false,
            run_root: None,
        }
    }
}

impl SuiteConfig {
    /// Applies `.env` and then loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `.env` is unreadable or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv()?;
        Self::from_env()
    }

    /// Loads configuration from process environment variables only.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid port or boolean value).
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = read_env_nonempty(SuiteEnv::Port.as_str())?
            .map(|value| parse_port(SuiteEnv::Port.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let base_url = read_env_nonempty(SuiteEnv::BaseUrl.as_str())?
            .map(|value| parse_base_url(SuiteEnv::BaseUrl.as_str(), &value))
            .transpose()?
            .unwrap_or_else(|| default_base_url(port));
        let timeout = read_env_nonempty(SuiteEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SuiteEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);
        let require_server = parse_bool_env(
            SuiteEnv::RequireServer.as_str(),
            read_env_nonempty(SuiteEnv::RequireServer.as_str())?,
        )?;
        let run_root = read_env_nonempty(SuiteEnv::RunRoot.as_str())?.map(PathBuf::from);
        let config = Self {
            base_url,
            port,
            timeout,
            require_server,
            run_root,
        };
        debug!(
            base_url = %config.base_url,
            port = config.port,
            timeout_secs = config.timeout.as_secs(),
            require_server = config.require_server,
            "loaded suite configuration"
        );
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies variables from the nearest `.env` file, searching the working
/// directory and then its parents.
///
/// A missing file is not an error. Variables already set are left untouched.
///
/// # Errors
///
/// Returns [`ConfigError::DotEnv`] when the file exists but cannot be parsed.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "applied .env file");
            Ok(())
        }
        Err(err) => ignore_missing(err),
    }
}

/// Applies variables from the `.env`-format file at `path`.
///
/// Same rules as [`load_dotenv`]: a missing file is skipped and existing
/// variables win.
///
/// # Errors
///
/// Returns [`ConfigError::DotEnv`] when the file exists but cannot be parsed.
pub fn load_dotenv_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "applied .env file");
            Ok(())
        }
        Err(err) => ignore_missing(err),
    }
}

/// Treats a missing `.env` file as empty.
fn ignore_missing(err: dotenvy::Error) -> Result<(), ConfigError> {
    if err.not_found() { Ok(()) } else { Err(ConfigError::DotEnv(err)) }
}

/// Returns a variable's value, falling back to `default` when unset.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when the variable is unset and no default
/// is given, or [`ConfigError::NotUnicode`] for non-UTF-8 values.
pub fn get_env_var(name: &str, default: Option<&str>) -> Result<String, ConfigError> {
    read_env_strict(name)?.or_else(|| default.map(str::to_string)).ok_or_else(|| {
        ConfigError::Missing {
            name: name.to_string(),
        }
    })
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::NotUnicode {
            name: name.to_string(),
        })
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name: name.to_string(),
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Builds the base URL used when `BASE_URL` is unset.
fn default_base_url(port: u16) -> String {
    format!("http://localhost:{port}")
}

/// Validates a base URL and strips any trailing slash.
///
/// # Errors
///
/// Returns an error when the value does not parse or is not http/https.
fn parse_base_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: trimmed.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            name,
            scheme: url.scheme().to_string(),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parses a non-zero port number.
///
/// # Errors
///
/// Returns an error when the value is non-numeric, zero, or above 65535.
fn parse_port(name: &'static str, raw: &str) -> Result<u16, ConfigError> {
    let invalid = || ConfigError::InvalidPort {
        name,
        value: raw.to_string(),
    };
    let port: u16 = raw.trim().parse().map_err(|_| invalid())?;
    if port == 0 {
        return Err(invalid());
    }
    Ok(port)
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_timeout_seconds(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout {
        name,
        value: raw.to_string(),
    };
    let secs: u64 = raw.trim().parse().map_err(|_| invalid())?;
    if secs == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable; unset means `false`.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(ConfigError::InvalidBool {
        name,
        value,
    })
}
