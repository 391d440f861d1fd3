// system-tests/tests/suites/accounts.rs
// ============================================================================
// Module: Accounts Tests
// Description: End-to-end coverage for the accounts endpoints.
// Purpose: Pin GET and POST contracts for /accounts against the mock.
// Dependencies: system-tests helpers, bank-api-contract
// ============================================================================

//! System tests for `/accounts`.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use bank_api_contract::Account;
use bank_api_contract::ContractCheck;
use bank_api_contract::Resource;
use bank_api_contract::checks::check_equals;
use bank_api_contract::types::NewAccount;
use helpers::harness::ApiHarness;
use helpers::harness::TestResult;
use serde_json::json;

use crate::helpers;

fn new_account(customer_id: &str, account_type: &str) -> NewAccount {
    NewAccount {
        customer_id: customer_id.to_string(),
        account_type: account_type.to_string(),
    }
}

/// Checks a created account echoes the request and has a valid shape.
fn check_created(account: &Account, request: &NewAccount) -> TestResult {
    account.validate()?;
    check_equals("customerId", &request.customer_id, &account.customer_id)?;
    check_equals("accountType", &request.account_type, &account.account_type)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn get_account_returns_seeded_account() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_account_returns_seeded_account").await? else {
        return Ok(());
    };
    let account: Account = harness.get_ok(&Resource::Accounts.item_path("ACC001")).await?;
    check_equals("accountId", "ACC001", &account.account_id)?;
    account.validate()?;
    harness.note(format!("ACC001 has BSB {} and type {}", account.bsb, account.account_type));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_account_returns_not_found() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_unknown_account_returns_not_found").await?
    else {
        return Ok(());
    };
    harness.expect_not_found(Resource::Accounts, "unknown123").await?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_savings_account_is_created() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_savings_account_is_created").await? else {
        return Ok(());
    };
    let request = new_account("CUST001", "savings");
    let account: Account = harness.create(Resource::Accounts, &request).await?;
    check_created(&account, &request)?;
    harness.note(format!("created {}", account.account_id));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_business_account_is_created() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_business_account_is_created").await? else {
        return Ok(());
    };
    let request = new_account("CUST002", "business");
    let account: Account = harness.create(Resource::Accounts, &request).await?;
    check_created(&account, &request)?;
    harness.note(format!("created {}", account.account_id));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_account_without_type_is_rejected() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_account_without_type_is_rejected").await?
    else {
        return Ok(());
    };
    let body = harness.expect_rejected(Resource::Accounts, &json!({"customerId": "CUST001"})).await?;
    body.check_timestamp()?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_empty_account_is_rejected() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_empty_account_is_rejected").await? else {
        return Ok(());
    };
    harness.expect_rejected(Resource::Accounts, &json!({})).await?;
    harness.finish()
}
