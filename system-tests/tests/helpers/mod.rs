// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for the bank API system-tests.
// Purpose: Provide the per-test harness and assertion helpers.
// Dependencies: system-tests, bank-api-contract
// ============================================================================

//! ## Overview
//! Shared helpers for the bank API system-tests. Each suite binary pulls in
//! this module and uses [`harness::ApiHarness`] to reach the mock server.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod harness;
