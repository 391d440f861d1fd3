// system-tests/tests/suites/loans.rs
// ============================================================================
// Module: Loans Tests
// Description: End-to-end coverage for the loans endpoints.
// Purpose: Pin GET, POST, defaulting, and repayment-date contracts for /loans.
// Dependencies: system-tests helpers, bank-api-contract
// ============================================================================

//! System tests for `/loans`.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use bank_api_contract::ContractCheck;
use bank_api_contract::Loan;
use bank_api_contract::Resource;
use bank_api_contract::checks::check_amount_equals;
use bank_api_contract::checks::check_equals;
use bank_api_contract::checks::check_id;
use bank_api_contract::dates::today;
use bank_api_contract::types::NewLoan;
use helpers::harness::ApiHarness;
use helpers::harness::TestResult;
use helpers::harness::require_eq;
use serde_json::json;

use crate::helpers;

fn new_loan(customer_id: &str, principal: f64, term_months: u32) -> NewLoan {
    NewLoan {
        customer_id: customer_id.to_string(),
        principal,
        term_months,
        interest_rate: None,
        repayment_frequency: None,
    }
}

/// Checks a created loan echoes the request's customer, principal, and term.
fn check_echoed(loan: &Loan, request: &NewLoan) -> TestResult {
    loan.validate()?;
    check_equals("customerId", &request.customer_id, &loan.customer_id)?;
    check_amount_equals("principal", request.principal, &loan.principal)?;
    require_eq(&loan.term_months.value("termMonths")?, &i64::from(request.term_months), "termMonths")
}

#[tokio::test(flavor = "multi_thread")]
async fn get_loan_returns_seeded_loan() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_loan_returns_seeded_loan").await? else {
        return Ok(());
    };
    let loan: Loan = harness.get_ok(&Resource::Loans.item_path("LOAN001")).await?;
    check_equals("loanId", "LOAN001", &loan.loan_id)?;
    loan.validate()?;
    harness.note(format!("LOAN001 principal {} at {}%", loan.principal, loan.interest_rate));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_loan_returns_not_found() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_unknown_loan_returns_not_found").await? else {
        return Ok(());
    };
    harness.expect_not_found(Resource::Loans, "unknown123").await?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_full_loan_schedules_first_payment() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_full_loan_schedules_first_payment").await?
    else {
        return Ok(());
    };
    let request = NewLoan {
        interest_rate: Some(5.25),
        repayment_frequency: Some("monthly".to_string()),
        ..new_loan("CUST001", 150_000.00, 240)
    };
    let loan: Loan = harness.create(Resource::Loans, &request).await?;
    check_echoed(&loan, &request)?;
    check_amount_equals("interestRate", 5.25, &loan.interest_rate)?;
    check_equals("repaymentFrequency", "monthly", &loan.repayment_frequency)?;
    loan.check_next_payment(today())?;
    harness.note(format!("{} first payment due {}", loan.loan_id, loan.next_payment_date));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_minimal_loan_applies_defaults() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_minimal_loan_applies_defaults").await? else {
        return Ok(());
    };
    let request = new_loan("CUST002", 75_000.00, 180);
    let loan: Loan = harness.create(Resource::Loans, &request).await?;
    check_echoed(&loan, &request)?;
    loan.check_defaults()?;
    harness.note(format!("default rate {}% {}", loan.interest_rate, loan.repayment_frequency));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_loan_without_term_is_rejected() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_loan_without_term_is_rejected").await? else {
        return Ok(());
    };
    let payload = json!({"customerId": "CUST001", "principal": 50_000.00});
    let body = harness.expect_rejected(Resource::Loans, &payload).await?;
    body.check_timestamp()?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_weekly_loan_keeps_frequency() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_weekly_loan_keeps_frequency").await? else {
        return Ok(());
    };
    let request = NewLoan {
        repayment_frequency: Some("weekly".to_string()),
        ..new_loan("CUST003", 25_000.00, 60)
    };
    let loan: Loan = harness.create(Resource::Loans, &request).await?;
    check_equals("repaymentFrequency", "weekly", &loan.repayment_frequency)?;
    check_id("loanId", &loan.loan_id)?;
    check_amount_equals("principal", request.principal, &loan.principal)?;
    harness.note(format!("created weekly loan {}", loan.loan_id));
    harness.finish()
}
