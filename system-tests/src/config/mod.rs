// system-tests/src/config/mod.rs
// ============================================================================
// Module: Suite Configuration
// Description: Centralized configuration for the bank API system tests.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: dotenvy, thiserror, url
// ============================================================================

//! ## Overview
//! Suite configuration is read from environment variables (after an optional
//! `.env` file) and mapped into a small typed structure for reuse across the
//! client, the harness, and the readiness binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::DEFAULT_PORT;
pub use env::DEFAULT_TIMEOUT;
pub use env::SuiteConfig;
pub use env::SuiteEnv;
pub use env::get_env_var;
pub use env::load_dotenv;
pub use env::load_dotenv_file;
pub use env::read_env_strict;
