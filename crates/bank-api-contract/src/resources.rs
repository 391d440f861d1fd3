// crates/bank-api-contract/src/resources.rs
// ============================================================================
// Module: Resource Catalogue
// Description: Paths, identifier fields, and error texts per API collection.
// Purpose: Keep per-collection constants in one table instead of each suite.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The mocked API exposes five collections with the same shape: `GET
//! /{collection}/{id}` and `POST /{collection}`. [`Resource`] names them and
//! carries the metadata the suites assert against (404 texts, required POST
//! fields).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Shared Error Texts
// ============================================================================

/// Error text for a POST missing required fields.
pub const VALIDATION_ERROR_MESSAGE: &str = "Missing required fields";
/// Error code for a POST missing required fields.
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";
/// Error text for a duplicate booking.
pub const DUPLICATE_BOOKING_MESSAGE: &str = "Booking already exists";
/// Error code for a duplicate booking.
pub const DUPLICATE_BOOKING_CODE: &str = "DUPLICATE_BOOKING";
/// Admin endpoint used to probe mock server reachability.
pub const ADMIN_MAPPINGS_PATH: &str = "/__admin/mappings";

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Collections served by the mocked banking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Bank accounts.
    Accounts,
    /// Customers.
    Customers,
    /// Product bookings.
    Bookings,
    /// Loans.
    Loans,
    /// Term deposits.
    TermDeposits,
}

impl Resource {
    /// Returns every resource in route order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Accounts, Self::Customers, Self::Bookings, Self::Loans, Self::TermDeposits]
    }

    /// Collection path (`/accounts`).
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Accounts => "/accounts",
            Self::Customers => "/customers",
            Self::Bookings => "/bookings",
            Self::Loans => "/loans",
            Self::TermDeposits => "/term-deposits",
        }
    }

    /// Item path for `id` (`/accounts/ACC001`).
    #[must_use]
    pub fn item_path(self, id: &str) -> String {
        format!("{}/{id}", self.collection_path())
    }

    /// JSON field carrying the resource identifier.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Accounts => "accountId",
            Self::Customers => "customerId",
            Self::Bookings => "bookingId",
            Self::Loans => "loanId",
            Self::TermDeposits => "depositId",
        }
    }

    /// Error text returned with a 404.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Accounts => "Account not found",
            Self::Customers => "Customer not found",
            Self::Bookings => "Booking not found",
            Self::Loans => "Loan not found",
            Self::TermDeposits => "Term deposit not found",
        }
    }

    /// Error code returned with a 404.
    #[must_use]
    pub const fn not_found_code(self) -> &'static str {
        match self {
            Self::Accounts => "ACCOUNT_NOT_FOUND",
            Self::Customers => "CUSTOMER_NOT_FOUND",
            Self::Bookings => "BOOKING_NOT_FOUND",
            Self::Loans => "LOAN_NOT_FOUND",
            Self::TermDeposits => "TERM_DEPOSIT_NOT_FOUND",
        }
    }

    /// Fields the server lists in `requiredFields` on a 400.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Accounts => &["customerId", "accountType"],
            Self::Customers => &["firstName", "lastName", "email"],
            Self::Bookings => &["customerId", "productType", "productId"],
            Self::Loans | Self::TermDeposits => &["customerId", "principal", "termMonths"],
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_path())
    }
}

// ============================================================================
// SECTION: Product Types
// ============================================================================

/// Products a booking can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductType {
    /// A loan product.
    Loan,
    /// A term deposit product.
    TermDeposit,
}

impl ProductType {
    /// Wire label (`loan`, `termDeposit`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::TermDeposit => "termDeposit",
        }
    }

    /// Parses a wire label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "loan" => Some(Self::Loan),
            "termDeposit" => Some(Self::TermDeposit),
            _ => None,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
