// crates/bank-api-contract/src/ids.rs
// ============================================================================
// Module: Identifier Validators
// Description: Format rules for IDs, BSBs, account numbers, phones, and emails.
// Purpose: Provide boolean validators used by contract checks and suites.
// Dependencies: tracing, uuid
// ============================================================================

//! ## Overview
//! Each validator is a pure predicate over a string slice. Passes are logged
//! at `debug` and failures at `warn` so a failing suite run shows which value
//! tripped which rule. All character classes are ASCII-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;
use tracing::warn;
use uuid::Uuid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of digits in a BSB.
pub const BSB_LENGTH: usize = 6;
/// Shortest accepted account number.
pub const MIN_ACCOUNT_NUMBER_LENGTH: usize = 8;
/// Longest accepted account number.
pub const MAX_ACCOUNT_NUMBER_LENGTH: usize = 9;
/// Prefix shared by Australian mobile numbers in international form.
pub const MOBILE_PREFIX: &str = "+614";
/// Digits following [`MOBILE_PREFIX`].
pub const MOBILE_SUBSCRIBER_DIGITS: usize = 8;

// ============================================================================
// SECTION: Correlation IDs
// ============================================================================

/// Generates a fresh correlation ID for request tracing.
#[must_use]
pub fn new_correlation_id() -> String {
    let correlation_id = Uuid::new_v4().to_string();
    debug!(%correlation_id, "generated correlation id");
    correlation_id
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Returns true when `id` is non-empty ASCII alphanumeric, optionally of an
/// exact length. An expected length of zero skips the length check.
#[must_use]
pub fn is_valid_id_format(id: &str, expected_length: Option<usize>) -> bool {
    if id.is_empty() {
        warn!("id is empty");
        return false;
    }
    if !id.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        warn!(id, "id contains invalid characters");
        return false;
    }
    if let Some(expected) = expected_length
        && expected != 0
        && id.len() != expected
    {
        warn!(id, expected, actual = id.len(), "id length mismatch");
        return false;
    }
    debug!(id, "id validation passed");
    true
}

/// Returns true for a six-digit BSB starting with `0`.
#[must_use]
pub fn is_valid_bsb(bsb: &str) -> bool {
    let valid = bsb.len() == BSB_LENGTH && bsb.starts_with('0') && all_ascii_digits(bsb);
    if valid {
        debug!(bsb, "bsb validation passed");
    } else {
        warn!(bsb, "bsb validation failed (expected format: 0XXXXX)");
    }
    valid
}

/// Returns true for an all-digit account number of 8 or 9 digits.
#[must_use]
pub fn is_valid_account_number(account_number: &str) -> bool {
    if !all_ascii_digits(account_number) {
        warn!(account_number, "account number contains non-digits");
        return false;
    }
    let valid = (MIN_ACCOUNT_NUMBER_LENGTH ..= MAX_ACCOUNT_NUMBER_LENGTH)
        .contains(&account_number.len());
    if valid {
        debug!(account_number, "account number validation passed");
    } else {
        warn!(account_number, "account number length invalid (expected 8-9 digits)");
    }
    valid
}

/// Returns true for an Australian mobile number in `+614XXXXXXXX` form.
#[must_use]
pub fn is_valid_phone_number(phone: &str) -> bool {
    let valid = phone.strip_prefix(MOBILE_PREFIX).is_some_and(|subscriber| {
        subscriber.len() == MOBILE_SUBSCRIBER_DIGITS && all_ascii_digits(subscriber)
    });
    if valid {
        debug!(phone, "phone number validation passed");
    } else {
        warn!(phone, "phone number validation failed (expected format: +614XXXXXXXX)");
    }
    valid
}

/// Returns true for a `local@domain.tld` address.
///
/// The local part allows `[A-Za-z0-9._%+-]`, the domain allows
/// `[A-Za-z0-9.-]`, and the top-level label must be at least two letters.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let valid = check_email(email);
    if valid {
        debug!(email, "email validation passed");
    } else {
        warn!(email, "email validation failed");
    }
    valid
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the slice is non-empty and every byte is an ASCII digit.
fn all_ascii_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Structural email check without logging.
fn check_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_email_local_char) {
        return false;
    }
    if !domain.chars().all(is_email_domain_char) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|ch| ch.is_ascii_alphabetic())
}

/// Characters permitted before the `@`.
const fn is_email_local_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '%' | '+' | '-')
}

/// Characters permitted after the `@`.
const fn is_email_domain_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')
}

// ============================================================================
// SECTION: Tests
// ============================================================================
