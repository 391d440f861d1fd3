// system-tests/tests/suites/term_deposits.rs
// ============================================================================
// Module: Term Deposits Tests
// Description: End-to-end coverage for the term-deposits endpoints.
// Purpose: Pin GET, POST, default-rate, and maturity contracts.
// Dependencies: system-tests helpers, bank-api-contract
// ============================================================================

//! System tests for `/term-deposits`.
//!
//! Maturity is checked against the deposit's own `startDate`, so a run that
//! straddles midnight still passes.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use bank_api_contract::ContractCheck;
use bank_api_contract::Resource;
use bank_api_contract::TermDeposit;
use bank_api_contract::checks::check_amount_equals;
use bank_api_contract::checks::check_equals;
use bank_api_contract::dates::today;
use bank_api_contract::types::NewTermDeposit;
use helpers::harness::ApiHarness;
use helpers::harness::TestResult;
use helpers::harness::require_eq;
use serde_json::json;

use crate::helpers;

fn new_deposit(customer_id: &str, principal: f64, term_months: u32) -> NewTermDeposit {
    NewTermDeposit {
        customer_id: customer_id.to_string(),
        principal,
        term_months,
        interest_rate: None,
    }
}

fn check_term(deposit: &TermDeposit, expected: u32) -> TestResult {
    require_eq(&deposit.term_months.value("termMonths")?, &i64::from(expected), "termMonths")
}

/// Checks a created deposit echoes the request and starts today.
fn check_echoed(deposit: &TermDeposit, request: &NewTermDeposit) -> TestResult {
    deposit.validate()?;
    check_equals("customerId", &request.customer_id, &deposit.customer_id)?;
    check_amount_equals("principal", request.principal, &deposit.principal)?;
    check_term(deposit, request.term_months)?;
    deposit.check_start_date(today())?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn get_term_deposit_returns_seeded_deposit() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_term_deposit_returns_seeded_deposit").await?
    else {
        return Ok(());
    };
    let deposit: TermDeposit = harness.get_ok(&Resource::TermDeposits.item_path("TD001")).await?;
    check_equals("depositId", "TD001", &deposit.deposit_id)?;
    deposit.validate()?;
    deposit.check_start_date(today())?;
    harness.note(format!("TD001 runs {} to {}", deposit.start_date, deposit.maturity_date));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_term_deposit_returns_not_found() -> TestResult {
    let Some(mut harness) =
        ApiHarness::connect("get_unknown_term_deposit_returns_not_found").await?
    else {
        return Ok(());
    };
    harness.expect_not_found(Resource::TermDeposits, "unknown123").await?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_full_term_deposit_matures_after_term() -> TestResult {
    let Some(mut harness) =
        ApiHarness::connect("post_full_term_deposit_matures_after_term").await?
    else {
        return Ok(());
    };
    let request = NewTermDeposit {
        interest_rate: Some(4.75),
        ..new_deposit("CUST001", 100_000.00, 24)
    };
    let deposit: TermDeposit = harness.create(Resource::TermDeposits, &request).await?;
    check_echoed(&deposit, &request)?;
    check_amount_equals("interestRate", 4.75, &deposit.interest_rate)?;
    deposit.check_maturity()?;
    harness.note(format!("{} matures {}", deposit.deposit_id, deposit.maturity_date));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_minimal_term_deposit_applies_default_rate() -> TestResult {
    let Some(mut harness) =
        ApiHarness::connect("post_minimal_term_deposit_applies_default_rate").await?
    else {
        return Ok(());
    };
    let request = new_deposit("CUST002", 50_000.00, 12);
    let deposit: TermDeposit = harness.create(Resource::TermDeposits, &request).await?;
    check_echoed(&deposit, &request)?;
    deposit.check_default_rate()?;
    deposit.check_maturity()?;
    harness.note(format!("default rate {}%", deposit.interest_rate));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_short_term_deposit_matures_after_three_months() -> TestResult {
    let Some(mut harness) =
        ApiHarness::connect("post_short_term_deposit_matures_after_three_months").await?
    else {
        return Ok(());
    };
    let request = NewTermDeposit {
        interest_rate: Some(3.25),
        ..new_deposit("CUST003", 25_000.00, 3)
    };
    let deposit: TermDeposit = harness.create(Resource::TermDeposits, &request).await?;
    check_term(&deposit, 3)?;
    check_amount_equals("interestRate", 3.25, &deposit.interest_rate)?;
    deposit.check_maturity()?;
    harness.note(format!("{} matures {}", deposit.deposit_id, deposit.maturity_date));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_long_term_deposit_matures_after_five_years() -> TestResult {
    let Some(mut harness) =
        ApiHarness::connect("post_long_term_deposit_matures_after_five_years").await?
    else {
        return Ok(());
    };
    let request = new_deposit("CUST001", 200_000.00, 60);
    let deposit: TermDeposit = harness.create(Resource::TermDeposits, &request).await?;
    check_term(&deposit, 60)?;
    check_amount_equals("principal", 200_000.00, &deposit.principal)?;
    // Five-year terms allow three days of drift.
    deposit.check_maturity()?;
    harness.note(format!("{} matures {}", deposit.deposit_id, deposit.maturity_date));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_term_deposit_without_term_is_rejected() -> TestResult {
    let Some(mut harness) =
        ApiHarness::connect("post_term_deposit_without_term_is_rejected").await?
    else {
        return Ok(());
    };
    let payload = json!({"customerId": "CUST001", "principal": 75_000.00});
    let body = harness.expect_rejected(Resource::TermDeposits, &payload).await?;
    body.check_timestamp()?;
    harness.finish()
}
