// system-tests/src/lib.rs
// ============================================================================
// Module: Bank API System Tests Library
// Description: Shared configuration, HTTP client, and readiness probes.
// Purpose: Provide common utilities for the bank API system-test binaries.
// Dependencies: bank-api-contract, reqwest, serde_jcs, tokio, tracing
// ============================================================================

//! ## Overview
//! This crate hosts the configuration loader, the logging HTTP client, the
//! readiness probe, and the artifact reporter shared by the suites in
//! `system-tests/tests`. The suites run against an externally managed mock
//! server; nothing here starts or stops it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod client;
pub mod config;
pub mod logging;
pub mod readiness;
