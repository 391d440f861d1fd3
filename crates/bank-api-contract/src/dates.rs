// crates/bank-api-contract/src/dates.rs
// ============================================================================
// Module: Calendar Dates
// Description: ISO date parsing, month arithmetic, and tolerance windows.
// Purpose: Check schedule dates (maturity, next payment) against expectations.
// Dependencies: thiserror, time, tracing
// ============================================================================

//! ## Overview
//! The mocked API reports plain ISO dates (`2024-01-15`) for schedule fields
//! and date-time stamps (`2024-01-15 10:30:00`, `2024-01-15T10:30:00Z`) for
//! `createdAt`/`timestamp`. Only the calendar date matters for the contract,
//! so every parser here returns a [`Date`].
//!
//! Month arithmetic clamps to the end of the target month: adding one month
//! to January 31 yields the last day of February.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;
use time::Date;
use time::Month;
use time::OffsetDateTime;
use time::Time;
use time::UtcOffset;
use time::macros::format_description;
use tracing::debug;
use tracing::warn;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default tolerance, in days, for schedule date comparisons.
pub const DEFAULT_TOLERANCE_DAYS: i64 = 2;

/// Length of the `YYYY-MM-DD` prefix.
const ISO_DATE_LENGTH: usize = 10;

/// Shortest day count any month has.
const MIN_MONTH_LENGTH: u8 = 28;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing or shifting calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The value is not an ISO date or date-time.
    #[error("invalid ISO date: '{value}'")]
    Invalid {
        /// Offending input.
        value: String,
    },
    /// Month arithmetic left the representable calendar range.
    #[error("adding {months} months to {base} leaves the supported calendar range")]
    OutOfRange {
        /// Base date of the computation.
        base: Date,
        /// Requested month offset.
        months: i32,
    },
}

// ============================================================================
// SECTION: Date Inputs
// ============================================================================

/// Values that can be read as a calendar date.
///
/// Implemented for [`Date`] itself and for ISO strings, so helpers accept
/// either a parsed date or a raw response field.
pub trait AsDate {
    /// Returns the calendar date this value denotes.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Invalid`] when a string is not an ISO date.
    fn as_date(&self) -> Result<Date, DateError>;
}

impl AsDate for Date {
    fn as_date(&self) -> Result<Date, DateError> {
        Ok(*self)
    }
}

impl AsDate for str {
    fn as_date(&self) -> Result<Date, DateError> {
        parse_iso_date(self)
    }
}

impl AsDate for String {
    fn as_date(&self) -> Result<Date, DateError> {
        parse_iso_date(self)
    }
}

// ============================================================================
// SECTION: Today
// ============================================================================

/// Returns today's local calendar date, falling back to UTC when the local
/// offset cannot be determined.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date()
}

/// Returns today's date as `YYYY-MM-DD`.
#[must_use]
pub fn today_iso() -> String {
    let today = format_iso(today());
    debug!(%today, "resolved today's date");
    today
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses an ISO date or date-time and returns its calendar date.
///
/// Accepted forms: `YYYY-MM-DD`, optionally followed by `T` or a space and a
/// time of `HH:MM`, `HH:MM:SS`, or `HH:MM:SS.fff`, itself optionally followed
/// by `Z` or a `+HH:MM`/`-HH:MM` offset.
///
/// # Errors
///
/// Returns [`DateError::Invalid`] when the value does not match those forms.
pub fn parse_iso_date(value: &str) -> Result<Date, DateError> {
    let parsed = parse_date_prefix(value);
    if parsed.is_none() {
        warn!(value, "failed to parse ISO date");
    }
    parsed.ok_or_else(|| DateError::Invalid {
        value: value.to_string(),
    })
}

/// Returns true when `value` parses as an ISO date or date-time.
#[must_use]
pub fn is_valid_date_format(value: &str) -> bool {
    parse_iso_date(value).is_ok()
}

/// Returns the first whitespace-separated token of a timestamp.
///
/// The mock renders `createdAt` and error `timestamp` fields as
/// `YYYY-MM-DD HH:MM:SS`; the date is the leading token.
#[must_use]
pub fn timestamp_date_part(timestamp: &str) -> &str {
    timestamp.split_whitespace().next().unwrap_or("")
}

/// Returns true when the leading token of `timestamp` is a valid date.
#[must_use]
pub fn is_valid_timestamp(timestamp: &str) -> bool {
    is_valid_date_format(timestamp_date_part(timestamp))
}

/// Parses the date head and validates any trailing time component.
fn parse_date_prefix(value: &str) -> Option<Date> {
    let head = value.get(.. ISO_DATE_LENGTH)?;
    let date = Date::parse(head, format_description!("[year]-[month]-[day]")).ok()?;
    let rest = &value[ISO_DATE_LENGTH ..];
    if rest.is_empty() {
        return Some(date);
    }
    let time_part = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;
    parse_time_with_offset(time_part)?;
    Some(date)
}

/// Parses `HH:MM[:SS[.fff]]` with an optional `Z` or numeric offset.
fn parse_time_with_offset(value: &str) -> Option<Time> {
    let (clock, offset) = split_offset(value);
    if let Some(offset) = offset {
        UtcOffset::parse(offset, format_description!("[offset_hour sign:mandatory]:[offset_minute]"))
            .ok()?;
    }
    Time::parse(clock, format_description!("[hour]:[minute]:[second].[subsecond]"))
        .or_else(|_| Time::parse(clock, format_description!("[hour]:[minute]:[second]")))
        .or_else(|_| Time::parse(clock, format_description!("[hour]:[minute]")))
        .ok()
}

/// Splits a time string into its clock part and optional numeric offset.
fn split_offset(value: &str) -> (&str, Option<&str>) {
    if let Some(clock) = value.strip_suffix('Z') {
        return (clock, None);
    }
    value
        .rfind(['+', '-'])
        .map_or((value, None), |index| (&value[.. index], Some(&value[index ..])))
}

// ============================================================================
// SECTION: Arithmetic
// ============================================================================

/// Adds calendar months to `base`, clamping the day to the target month.
///
/// # Errors
///
/// Returns [`DateError::OutOfRange`] when the result is not representable.
pub fn add_months(base: Date, months: i32) -> Result<Date, DateError> {
    let out_of_range = || DateError::OutOfRange {
        base,
        months,
    };
    let month_index = i64::from(base.year()) * 12 + i64::from(u8::from(base.month())) - 1
        + i64::from(months);
    let year = i32::try_from(month_index.div_euclid(12)).map_err(|_| out_of_range())?;
    let month_number = u8::try_from(month_index.rem_euclid(12) + 1).map_err(|_| out_of_range())?;
    let month = Month::try_from(month_number).map_err(|_| out_of_range())?;
    let mut day = base.day();
    loop {
        match Date::from_calendar_date(year, month, day) {
            Ok(result) => {
                debug!(%base, months, %result, "added months");
                return Ok(result);
            }
            Err(_) if day > MIN_MONTH_LENGTH => day -= 1,
            Err(_) => return Err(out_of_range()),
        }
    }
}

/// Adds calendar months to an ISO date and returns the ISO result.
///
/// # Errors
///
/// Returns [`DateError`] when `base` is not a date or the result overflows.
pub fn add_months_iso<D: AsDate + ?Sized>(base: &D, months: i32) -> Result<String, DateError> {
    add_months(base.as_date()?, months).map(format_iso)
}

/// Returns `to - from` in whole days.
///
/// # Errors
///
/// Returns [`DateError::Invalid`] when either input is not a date.
pub fn date_difference_days<A, B>(from: &A, to: &B) -> Result<i64, DateError>
where
    A: AsDate + ?Sized,
    B: AsDate + ?Sized,
{
    let from = from.as_date()?;
    let to = to.as_date()?;
    let difference = (to - from).whole_days();
    debug!(%from, %to, difference, "date difference");
    Ok(difference)
}

/// Returns true when `target` is within `tolerance_days` of `expected`.
///
/// # Errors
///
/// Returns [`DateError::Invalid`] when either input is not a date.
pub fn validate_date_range<A, B>(
    target: &A,
    expected: &B,
    tolerance_days: i64,
) -> Result<bool, DateError>
where
    A: AsDate + ?Sized,
    B: AsDate + ?Sized,
{
    DateWindow::new(expected.as_date()?, tolerance_days).contains(target)
}

// ============================================================================
// SECTION: Date Windows
// ============================================================================

/// An expected date with a symmetric tolerance in days.
///
/// # Invariants
/// - `tolerance_days` is treated as an absolute distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Centre of the window.
    pub expected: Date,
    /// Allowed distance from `expected`, in days.
    pub tolerance_days: i64,
}

impl DateWindow {
    /// Creates a window around `expected`.
    #[must_use]
    pub const fn new(expected: Date, tolerance_days: i64) -> Self {
        Self {
            expected,
            tolerance_days,
        }
    }

    /// Window of `tolerance_days` around `start + months`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] when the shifted date overflows.
    pub fn months_after(start: Date, months: i32, tolerance_days: i64) -> Result<Self, DateError> {
        Ok(Self::new(add_months(start, months)?, tolerance_days))
    }

    /// Returns true when `actual` falls inside the window.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Invalid`] when `actual` is not a date.
    pub fn contains<D: AsDate + ?Sized>(&self, actual: &D) -> Result<bool, DateError> {
        let actual = actual.as_date()?;
        let distance = (actual - self.expected).whole_days().abs();
        let within = distance <= self.tolerance_days.abs();
        debug!(
            actual = %actual,
            expected = %self.expected,
            distance,
            tolerance = self.tolerance_days,
            within,
            "date window check"
        );
        Ok(within)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ± {} days", format_iso(self.expected), self.tolerance_days.abs())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
