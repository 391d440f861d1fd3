// crates/bank-api-contract/src/lib.rs
// ============================================================================
// Module: Bank API Contract Library
// Description: Typed payloads, format validators, and date rules for the bank API.
// Purpose: Give the system-test suites one canonical definition of the contract.
// Dependencies: serde, serde_json, thiserror, time, tracing, uuid
// ============================================================================

//! ## Overview
//! The mocked banking API serves accounts, customers, bookings, loans, and term
//! deposits. This crate captures what a well-formed response looks like:
//! identifier and contact formats ([`ids`]), calendar arithmetic for schedule
//! dates ([`dates`]), typed request/response payloads ([`types`]), the
//! per-collection metadata ([`resources`]), and the checks that tie them
//! together ([`checks`]).
//!
//! Nothing here performs I/O; the HTTP side lives in the `system-tests` crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod dates;
pub mod ids;
pub mod resources;
pub mod types;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use checks::ContractCheck;
pub use checks::ContractViolation;
pub use checks::NumericRange;
pub use dates::DateError;
pub use dates::DateWindow;
pub use resources::ProductType;
pub use resources::Resource;
pub use types::Account;
pub use types::Amount;
pub use types::Booking;
pub use types::ConflictError;
pub use types::Customer;
pub use types::Loan;
pub use types::NotFoundError;
pub use types::Term;
pub use types::TermDeposit;
pub use types::ValidationError;
