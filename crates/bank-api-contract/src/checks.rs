// crates/bank-api-contract/src/checks.rs
// ============================================================================
// Module: Contract Checks
// Description: Shape, format, default, and schedule checks for API payloads.
// Purpose: Turn a decoded response into a pass/fail verdict with a reason.
// Dependencies: thiserror, time
// ============================================================================

//! ## Overview
//! [`ContractCheck::validate`] checks the rules every instance of an entity
//! must satisfy (identifier formats, non-empty labels, parseable dates, rate
//! and principal bounds). Rules that depend on the request or on the current
//! date, such as server-applied defaults and computed schedule dates, are
//! separate methods so a suite opts into them per scenario.
//!
//! Violations carry the JSON field name and the offending value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;
use time::Date;

use crate::dates::DateError;
use crate::dates::DateWindow;
use crate::dates::is_valid_date_format;
use crate::dates::is_valid_timestamp;
use crate::dates::parse_iso_date;
use crate::ids::is_valid_account_number;
use crate::ids::is_valid_bsb;
use crate::ids::is_valid_email;
use crate::ids::is_valid_id_format;
use crate::ids::is_valid_phone_number;
use crate::resources::DUPLICATE_BOOKING_CODE;
use crate::resources::DUPLICATE_BOOKING_MESSAGE;
use crate::resources::ProductType;
use crate::resources::Resource;
use crate::resources::VALIDATION_ERROR_CODE;
use crate::resources::VALIDATION_ERROR_MESSAGE;
use crate::types::Account;
use crate::types::Amount;
use crate::types::Booking;
use crate::types::ConflictError;
use crate::types::Customer;
use crate::types::Loan;
use crate::types::NotFoundError;
use crate::types::TermDeposit;
use crate::types::ValidationError;

// ============================================================================
// SECTION: Rule Constants
// ============================================================================

/// Range every served interest rate must fall in, exclusive.
pub const INTEREST_RATE_RANGE: NumericRange = NumericRange::exclusive(0.0, 20.0);
/// Range of the rate the server applies to loans posted without one.
pub const LOAN_DEFAULT_RATE_RANGE: NumericRange = NumericRange::inclusive(3.50, 15.99);
/// Range of the rate the server applies to deposits posted without one.
pub const TERM_DEPOSIT_DEFAULT_RATE_RANGE: NumericRange = NumericRange::inclusive(2.50, 8.99);
/// Repayment frequency the server applies when none is posted.
pub const LOAN_DEFAULT_REPAYMENT_FREQUENCY: &str = "monthly";
/// Status of a freshly created booking.
pub const NEW_BOOKING_STATUS: &str = "active";
/// Months between loan creation and the first repayment.
pub const FIRST_PAYMENT_OFFSET_MONTHS: i32 = 1;
/// Tolerance for `nextPaymentDate`.
pub const NEXT_PAYMENT_TOLERANCE_DAYS: i64 = 2;
/// Tolerance for a deposit `startDate` against today.
pub const START_DATE_TOLERANCE_DAYS: i64 = 1;
/// Tolerance for `maturityDate` on ordinary terms.
pub const MATURITY_TOLERANCE_DAYS: i64 = 2;
/// Terms of at least this many months get the wider maturity tolerance.
pub const LONG_TERM_MONTHS: i64 = 60;
/// Tolerance for `maturityDate` on long terms.
pub const LONG_TERM_MATURITY_TOLERANCE_DAYS: i64 = 3;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A response that breaks the API contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    /// Identifier is empty or not alphanumeric.
    #[error("{field} is not a valid identifier: '{value}'")]
    InvalidId {
        /// JSON field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// BSB is not `0` followed by five digits.
    #[error("bsb is not a valid BSB: '{value}'")]
    InvalidBsb {
        /// Offending value.
        value: String,
    },
    /// Account number is not 8-9 digits.
    #[error("accountNumber is not a valid account number: '{value}'")]
    InvalidAccountNumber {
        /// Offending value.
        value: String,
    },
    /// Phone is not an Australian mobile in international form.
    #[error("phone is not a valid mobile number: '{value}'")]
    InvalidPhone {
        /// Offending value.
        value: String,
    },
    /// Email is malformed.
    #[error("email is not a valid address: '{value}'")]
    InvalidEmail {
        /// Offending value.
        value: String,
    },
    /// Date or timestamp field does not parse.
    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate {
        /// JSON field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Required label is empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// JSON field name.
        field: &'static str,
    },
    /// Numeric field is not a number.
    #[error("{field} is not numeric: '{value}'")]
    NotNumeric {
        /// JSON field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Numeric field is outside its allowed range.
    #[error("{field} {value} is outside {range}")]
    OutOfRange {
        /// JSON field name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Allowed range.
        range: NumericRange,
    },
    /// Field differs from the expected value.
    #[error("{field} expected '{expected}' but was '{actual}'")]
    Mismatch {
        /// JSON field name.
        field: &'static str,
        /// Expected value.
        expected: String,
        /// Actual value.
        actual: String,
    },
    /// Schedule date falls outside its expected window.
    #[error("{field} {actual} is outside {window}")]
    OutsideWindow {
        /// JSON field name.
        field: &'static str,
        /// Actual date.
        actual: String,
        /// Expected window.
        window: DateWindow,
    },
    /// A required field is missing from a 400 body's `requiredFields`.
    #[error("requiredFields does not list '{field}'")]
    MissingRequiredField {
        /// Field the body should list.
        field: String,
    },
    /// Date arithmetic failed.
    #[error(transparent)]
    Date(#[from] DateError),
}

// ============================================================================
// SECTION: Numeric Ranges
// ============================================================================

/// Closed or open interval over `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Whether the bounds themselves are allowed.
    pub inclusive: bool,
}

impl NumericRange {
    /// Interval `[min, max]`.
    #[must_use]
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inclusive: true,
        }
    }

    /// Interval `(min, max)`.
    #[must_use]
    pub const fn exclusive(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inclusive: false,
        }
    }

    /// Returns true when `value` lies in the interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.inclusive {
            self.min <= value && value <= self.max
        } else {
            self.min < value && value < self.max
        }
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inclusive {
            write!(f, "[{:.2}, {:.2}]", self.min, self.max)
        } else {
            write!(f, "({:.2}, {:.2})", self.min, self.max)
        }
    }
}

// ============================================================================
// SECTION: Check Trait
// ============================================================================

/// Invariant checks every instance of a payload must pass.
pub trait ContractCheck {
    /// Validates field formats and bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContractViolation`] found.
    fn validate(&self) -> Result<(), ContractViolation>;
}

impl ContractCheck for Account {
    fn validate(&self) -> Result<(), ContractViolation> {
        check_id("accountId", &self.account_id)?;
        check_id("customerId", &self.customer_id)?;
        if !is_valid_bsb(&self.bsb) {
            return Err(ContractViolation::InvalidBsb {
                value: self.bsb.clone(),
            });
        }
        if !is_valid_account_number(&self.account_number) {
            return Err(ContractViolation::InvalidAccountNumber {
                value: self.account_number.clone(),
            });
        }
        check_non_empty("accountType", &self.account_type)?;
        check_timestamp("createdAt", &self.created_at)
    }
}

impl ContractCheck for Customer {
    fn validate(&self) -> Result<(), ContractViolation> {
        check_id("customerId", &self.customer_id)?;
        check_non_empty("firstName", &self.first_name)?;
        check_non_empty("lastName", &self.last_name)?;
        if !is_valid_email(&self.email) {
            return Err(ContractViolation::InvalidEmail {
                value: self.email.clone(),
            });
        }
        if let Some(dob) = supplied(self.dob.as_deref()) {
            check_date("dob", dob)?;
        }
        if let Some(phone) = supplied(self.phone.as_deref())
            && !is_valid_phone_number(phone)
        {
            return Err(ContractViolation::InvalidPhone {
                value: phone.to_string(),
            });
        }
        check_timestamp("createdAt", &self.created_at)
    }
}

impl ContractCheck for Booking {
    fn validate(&self) -> Result<(), ContractViolation> {
        check_id("bookingId", &self.booking_id)?;
        check_id("customerId", &self.customer_id)?;
        check_non_empty("productType", &self.product_type)?;
        self.product()?;
        check_id("productId", &self.product_id)?;
        check_non_empty("status", &self.status)?;
        check_timestamp("createdAt", &self.created_at)
    }
}

impl ContractCheck for Loan {
    fn validate(&self) -> Result<(), ContractViolation> {
        check_id("loanId", &self.loan_id)?;
        check_id("customerId", &self.customer_id)?;
        check_positive("principal", &self.principal)?;
        check_in_range("interestRate", &self.interest_rate, INTEREST_RATE_RANGE)?;
        self.term_months.value("termMonths")?;
        check_non_empty("repaymentFrequency", &self.repayment_frequency)?;
        check_date("nextPaymentDate", &self.next_payment_date)?;
        check_timestamp("createdAt", &self.created_at)
    }
}

impl ContractCheck for TermDeposit {
    fn validate(&self) -> Result<(), ContractViolation> {
        check_id("depositId", &self.deposit_id)?;
        check_id("customerId", &self.customer_id)?;
        check_positive("principal", &self.principal)?;
        check_in_range("interestRate", &self.interest_rate, INTEREST_RATE_RANGE)?;
        self.term_months.value("termMonths")?;
        check_date("startDate", &self.start_date)?;
        check_date("maturityDate", &self.maturity_date)?;
        check_timestamp("createdAt", &self.created_at)
    }
}

impl ContractCheck for ConflictError {
    fn validate(&self) -> Result<(), ContractViolation> {
        check_equals("error", DUPLICATE_BOOKING_MESSAGE, &self.error)?;
        check_equals("code", DUPLICATE_BOOKING_CODE, &self.code)?;
        check_id("existingBookingId", &self.existing_booking_id)?;
        check_timestamp("timestamp", &self.timestamp)
    }
}

// ============================================================================
// SECTION: Entity Rules
// ============================================================================

impl Customer {
    /// Checks that optional fields omitted from the request come back absent,
    /// null, or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::Mismatch`] naming the populated field.
    pub fn check_optional_fields_unset(&self) -> Result<(), ContractViolation> {
        for (field, value) in [("dob", &self.dob), ("phone", &self.phone)] {
            if let Some(value) = supplied(value.as_deref()) {
                return Err(ContractViolation::Mismatch {
                    field,
                    expected: String::new(),
                    actual: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Booking {
    /// Returns the parsed product type.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::Mismatch`] for an unknown label.
    pub fn product(&self) -> Result<ProductType, ContractViolation> {
        ProductType::from_label(&self.product_type).ok_or_else(|| ContractViolation::Mismatch {
            field: "productType",
            expected: "loan | termDeposit".to_string(),
            actual: self.product_type.clone(),
        })
    }
}

impl Loan {
    /// Checks the server-applied defaults for a loan posted without a rate or
    /// repayment frequency.
    ///
    /// # Errors
    ///
    /// Returns a violation when the rate or frequency is not the default.
    pub fn check_defaults(&self) -> Result<(), ContractViolation> {
        check_in_range("interestRate", &self.interest_rate, LOAN_DEFAULT_RATE_RANGE)?;
        check_equals(
            "repaymentFrequency",
            LOAN_DEFAULT_REPAYMENT_FREQUENCY,
            &self.repayment_frequency,
        )
    }

    /// Window the first repayment must fall in for a loan created on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::Date`] when the window overflows.
    pub fn next_payment_window(today: Date) -> Result<DateWindow, ContractViolation> {
        Ok(DateWindow::months_after(
            today,
            FIRST_PAYMENT_OFFSET_MONTHS,
            NEXT_PAYMENT_TOLERANCE_DAYS,
        )?)
    }

    /// Checks `nextPaymentDate` is about one month after `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutsideWindow`] when it is not.
    pub fn check_next_payment(&self, today: Date) -> Result<(), ContractViolation> {
        check_within("nextPaymentDate", &self.next_payment_date, Self::next_payment_window(today)?)
    }
}

impl TermDeposit {
    /// Checks the server-applied default rate for a deposit posted without one.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutOfRange`] when the rate is not a default.
    pub fn check_default_rate(&self) -> Result<(), ContractViolation> {
        check_in_range("interestRate", &self.interest_rate, TERM_DEPOSIT_DEFAULT_RATE_RANGE)
    }

    /// Checks `startDate` is about `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutsideWindow`] when it is not.
    pub fn check_start_date(&self, today: Date) -> Result<(), ContractViolation> {
        check_within("startDate", &self.start_date, DateWindow::new(today, START_DATE_TOLERANCE_DAYS))
    }

    /// Window `maturityDate` must fall in, derived from the deposit's own
    /// start date and term.
    ///
    /// # Errors
    ///
    /// Returns a violation when the start date or term is malformed.
    pub fn maturity_window(&self) -> Result<DateWindow, ContractViolation> {
        let start = parse_iso_date(&self.start_date)?;
        let term = self.term_months.value("termMonths")?;
        let months = i32::try_from(term).map_err(|_| ContractViolation::NotNumeric {
            field: "termMonths",
            value: term.to_string(),
        })?;
        Ok(DateWindow::months_after(start, months, maturity_tolerance_days(term))?)
    }

    /// Checks `maturityDate` is `termMonths` after `startDate`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OutsideWindow`] when it is not.
    pub fn check_maturity(&self) -> Result<(), ContractViolation> {
        check_within("maturityDate", &self.maturity_date, self.maturity_window()?)
    }
}

/// Maturity tolerance for a term of `term_months`.
#[must_use]
pub const fn maturity_tolerance_days(term_months: i64) -> i64 {
    if term_months >= LONG_TERM_MONTHS {
        LONG_TERM_MATURITY_TOLERANCE_DAYS
    } else {
        MATURITY_TOLERANCE_DAYS
    }
}

// ============================================================================
// SECTION: Error Body Rules
// ============================================================================

impl NotFoundError {
    /// Checks the body is the 404 for `resource`.
    ///
    /// # Errors
    ///
    /// Returns a violation when the text, code, or timestamp differ.
    pub fn expect_for(&self, resource: Resource) -> Result<(), ContractViolation> {
        check_equals("error", resource.not_found_message(), &self.error)?;
        check_equals("code", resource.not_found_code(), &self.code)?;
        check_timestamp("timestamp", &self.timestamp)
    }
}

impl ValidationError {
    /// Checks the body is a missing-fields 400 listing every name in `fields`.
    ///
    /// # Errors
    ///
    /// Returns a violation when the text or code differ or a field is unlisted.
    pub fn expect_required(&self, fields: &[&str]) -> Result<(), ContractViolation> {
        check_equals("error", VALIDATION_ERROR_MESSAGE, &self.error)?;
        check_equals("code", VALIDATION_ERROR_CODE, &self.code)?;
        for field in fields {
            if !self.required_fields.iter().any(|listed| listed == field) {
                return Err(ContractViolation::MissingRequiredField {
                    field: (*field).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Checks the body is the missing-fields 400 for `resource`.
    ///
    /// # Errors
    ///
    /// See [`ValidationError::expect_required`].
    pub fn expect_for(&self, resource: Resource) -> Result<(), ContractViolation> {
        self.expect_required(resource.required_fields())
    }

    /// Checks the body carries a valid `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvalidDate`] when it does not.
    pub fn check_timestamp(&self) -> Result<(), ContractViolation> {
        check_timestamp("timestamp", &self.timestamp)
    }
}

// ============================================================================
// SECTION: Field Helpers
// ============================================================================

/// Checks an identifier field.
///
/// # Errors
///
/// Returns [`ContractViolation::InvalidId`] when the value is not alphanumeric.
pub fn check_id(field: &'static str, value: &str) -> Result<(), ContractViolation> {
    if is_valid_id_format(value, None) {
        Ok(())
    } else {
        Err(ContractViolation::InvalidId {
            field,
            value: value.to_string(),
        })
    }
}

/// Checks a plain ISO date field.
///
/// # Errors
///
/// Returns [`ContractViolation::InvalidDate`] when the value does not parse.
pub fn check_date(field: &'static str, value: &str) -> Result<(), ContractViolation> {
    if is_valid_date_format(value) {
        Ok(())
    } else {
        Err(ContractViolation::InvalidDate {
            field,
            value: value.to_string(),
        })
    }
}

/// Checks a timestamp field by its leading date token.
///
/// # Errors
///
/// Returns [`ContractViolation::InvalidDate`] when the date does not parse.
pub fn check_timestamp(field: &'static str, value: &str) -> Result<(), ContractViolation> {
    if is_valid_timestamp(value) {
        Ok(())
    } else {
        Err(ContractViolation::InvalidDate {
            field,
            value: value.to_string(),
        })
    }
}

/// Checks a label is non-empty.
///
/// # Errors
///
/// Returns [`ContractViolation::EmptyField`] for an empty value.
pub fn check_non_empty(field: &'static str, value: &str) -> Result<(), ContractViolation> {
    if value.is_empty() { Err(ContractViolation::EmptyField { field }) } else { Ok(()) }
}

/// Checks a field equals `expected`.
///
/// # Errors
///
/// Returns [`ContractViolation::Mismatch`] when it does not.
pub fn check_equals(
    field: &'static str,
    expected: &str,
    actual: &str,
) -> Result<(), ContractViolation> {
    if expected == actual {
        Ok(())
    } else {
        Err(ContractViolation::Mismatch {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Checks an amount equals `expected` to within float rounding.
///
/// # Errors
///
/// Returns a violation when the amount is not numeric or differs.
pub fn check_amount_equals(
    field: &'static str,
    expected: f64,
    actual: &Amount,
) -> Result<(), ContractViolation> {
    let value = actual.value(field)?;
    let tolerance = f64::EPSILON * expected.abs().max(1.0);
    if (value - expected).abs() <= tolerance {
        Ok(())
    } else {
        Err(ContractViolation::Mismatch {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Checks an amount is strictly positive.
///
/// # Errors
///
/// Returns a violation when the amount is not numeric or not positive.
pub fn check_positive(field: &'static str, amount: &Amount) -> Result<(), ContractViolation> {
    let value = amount.value(field)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ContractViolation::OutOfRange {
            field,
            value,
            range: NumericRange::exclusive(0.0, f64::INFINITY),
        })
    }
}

/// Checks an amount lies in `range`.
///
/// # Errors
///
/// Returns a violation when the amount is not numeric or outside `range`.
pub fn check_in_range(
    field: &'static str,
    amount: &Amount,
    range: NumericRange,
) -> Result<(), ContractViolation> {
    let value = amount.value(field)?;
    if range.contains(value) {
        Ok(())
    } else {
        Err(ContractViolation::OutOfRange {
            field,
            value,
            range,
        })
    }
}

/// Checks a date field falls in `window`.
///
/// # Errors
///
/// Returns a violation when the date does not parse or is outside `window`.
pub fn check_within(
    field: &'static str,
    value: &str,
    window: DateWindow,
) -> Result<(), ContractViolation> {
    check_date(field, value)?;
    if window.contains(value)? {
        Ok(())
    } else {
        Err(ContractViolation::OutsideWindow {
            field,
            actual: value.to_string(),
            window,
        })
    }
}

/// Returns the value when it is present and non-empty.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
