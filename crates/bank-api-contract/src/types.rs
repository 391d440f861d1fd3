// crates/bank-api-contract/src/types.rs
// ============================================================================
// Module: Payload Types
// Description: Request and response bodies for the mocked banking API.
// Purpose: Decode fixture responses into typed values the suites can check.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Response entities mirror the mock fixtures field for field (camelCase on
//! the wire). Amounts and terms are rendered by response templating, so they
//! may arrive as JSON numbers or as strings; [`Amount`] and [`Term`] accept
//! both and convert on demand.
//!
//! Request types cover the well-formed POST bodies. Deliberately incomplete
//! bodies are built with `serde_json::json!` at the call site.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;

use crate::checks::ContractViolation;

// ============================================================================
// SECTION: Flexible Scalars
// ============================================================================

/// Monetary amount or rate rendered as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// JSON number.
    Number(Number),
    /// Numeric string such as `"150000.00"`.
    Text(String),
}

impl Amount {
    /// Returns the numeric value when the amount is a finite number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => number.as_f64(),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }?;
        value.is_finite().then_some(value)
    }

    /// Returns the numeric value or a violation naming `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::NotNumeric`] when the value is not a number.
    pub fn value(&self, field: &'static str) -> Result<f64, ContractViolation> {
        self.as_f64().ok_or_else(|| ContractViolation::NotNumeric {
            field,
            value: self.to_string(),
        })
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => fmt::Display::fmt(number, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Whole-month term rendered as an integer or an integer string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    /// JSON integer.
    Integer(i64),
    /// Integer string such as `"240"`.
    Text(String),
}

impl Term {
    /// Returns the integer value when the term is integral.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Returns the integer value or a violation naming `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::NotNumeric`] when the value is not an integer.
    pub fn value(&self, field: &'static str) -> Result<i64, ContractViolation> {
        self.as_i64().ok_or_else(|| ContractViolation::NotNumeric {
            field,
            value: self.to_string(),
        })
    }
}

impl From<u32> for Term {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// SECTION: Response Entities
// ============================================================================

/// A bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub account_id: String,
    /// Owning customer.
    pub customer_id: String,
    /// Bank State Branch code.
    pub bsb: String,
    /// Account number within the branch.
    pub account_number: String,
    /// Product type such as `savings` or `business`.
    pub account_type: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    pub customer_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth; absent, null, or empty when not supplied.
    #[serde(default)]
    pub dob: Option<String>,
    /// Contact email.
    pub email: String,
    /// Mobile number; absent, null, or empty when not supplied.
    #[serde(default)]
    pub phone: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// A booking of a product by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking identifier.
    pub booking_id: String,
    /// Booking customer.
    pub customer_id: String,
    /// Product label (`loan` or `termDeposit`); kept raw so bad labels surface
    /// as contract violations rather than decode errors.
    pub product_type: String,
    /// Booked product identifier.
    pub product_id: String,
    /// Lifecycle status such as `active`.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Loan identifier.
    pub loan_id: String,
    /// Borrowing customer.
    pub customer_id: String,
    /// Amount borrowed.
    pub principal: Amount,
    /// Annual interest rate in percent.
    pub interest_rate: Amount,
    /// Loan term in months.
    pub term_months: Term,
    /// Repayment frequency such as `monthly` or `weekly`.
    pub repayment_frequency: String,
    /// Date of the next scheduled repayment.
    pub next_payment_date: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A term deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDeposit {
    /// Deposit identifier.
    pub deposit_id: String,
    /// Depositing customer.
    pub customer_id: String,
    /// Amount deposited.
    pub principal: Amount,
    /// Annual interest rate in percent.
    pub interest_rate: Amount,
    /// Deposit term in months.
    pub term_months: Term,
    /// Date the deposit starts earning.
    pub start_date: String,
    /// Date the deposit matures.
    pub maturity_date: String,
    /// Creation timestamp.
    pub created_at: String,
}

// ============================================================================
// SECTION: Error Bodies
// ============================================================================

/// Body of a 404 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundError {
    /// Human-readable error.
    pub error: String,
    /// Stable error code.
    pub code: String,
    /// Time the error was produced.
    pub timestamp: String,
}

/// Body of a 400 response for missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Human-readable error.
    pub error: String,
    /// Stable error code.
    pub code: String,
    /// Every field the endpoint requires.
    pub required_fields: Vec<String>,
    /// Time the error was produced.
    #[serde(default)]
    pub timestamp: String,
}

/// Body of a 409 response for a duplicate booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictError {
    /// Human-readable error.
    pub error: String,
    /// Stable error code.
    pub code: String,
    /// Identifier of the booking that already exists.
    pub existing_booking_id: String,
    /// Time the error was produced.
    pub timestamp: String,
}

// ============================================================================
// SECTION: Request Bodies
// ============================================================================

/// POST `/accounts` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// Owning customer.
    pub customer_id: String,
    /// Requested product type.
    pub account_type: String,
}

/// POST `/customers` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional date of birth (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Contact email.
    pub email: String,
    /// Optional mobile number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// POST `/bookings` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// Booking customer.
    pub customer_id: String,
    /// Product label.
    pub product_type: String,
    /// Product identifier.
    pub product_id: String,
}

/// POST `/loans` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    /// Borrowing customer.
    pub customer_id: String,
    /// Amount borrowed.
    pub principal: f64,
    /// Loan term in months.
    pub term_months: u32,
    /// Optional rate; the server applies a default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    /// Optional frequency; the server defaults to `monthly`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repayment_frequency: Option<String>,
}

/// POST `/term-deposits` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTermDeposit {
    /// Depositing customer.
    pub customer_id: String,
    /// Amount deposited.
    pub principal: f64,
    /// Deposit term in months.
    pub term_months: u32,
    /// Optional rate; the server applies a default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
