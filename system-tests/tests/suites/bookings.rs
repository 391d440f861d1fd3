// system-tests/tests/suites/bookings.rs
// ============================================================================
// Module: Bookings Tests
// Description: End-to-end coverage for the bookings endpoints.
// Purpose: Pin GET, POST, and duplicate-detection contracts for /bookings.
// Dependencies: system-tests helpers, bank-api-contract
// ============================================================================

//! System tests for `/bookings`.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use bank_api_contract::Booking;
use bank_api_contract::ConflictError;
use bank_api_contract::ContractCheck;
use bank_api_contract::ProductType;
use bank_api_contract::Resource;
use bank_api_contract::checks::NEW_BOOKING_STATUS;
use bank_api_contract::checks::check_equals;
use bank_api_contract::types::NewBooking;
use helpers::harness::ApiHarness;
use helpers::harness::TestResult;
use helpers::harness::expect_status;
use reqwest::StatusCode;
use serde_json::Value;
use serde_json::json;

use crate::helpers;

fn new_booking(customer_id: &str, product: ProductType, product_id: &str) -> NewBooking {
    NewBooking {
        customer_id: customer_id.to_string(),
        product_type: product.as_str().to_string(),
        product_id: product_id.to_string(),
    }
}

/// Checks a created booking echoes the request and starts active.
fn check_created(booking: &Booking, request: &NewBooking) -> TestResult {
    booking.validate()?;
    check_equals("customerId", &request.customer_id, &booking.customer_id)?;
    check_equals("productType", &request.product_type, &booking.product_type)?;
    check_equals("productId", &request.product_id, &booking.product_id)?;
    check_equals("status", NEW_BOOKING_STATUS, &booking.status)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn get_booking_returns_seeded_booking() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_booking_returns_seeded_booking").await? else {
        return Ok(());
    };
    let booking: Booking = harness.get_ok(&Resource::Bookings.item_path("BOOK001")).await?;
    check_equals("bookingId", "BOOK001", &booking.booking_id)?;
    booking.validate()?;
    harness.note(format!("BOOK001 books {} {}", booking.product()?, booking.product_id));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_booking_returns_not_found() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("get_unknown_booking_returns_not_found").await?
    else {
        return Ok(());
    };
    harness.expect_not_found(Resource::Bookings, "unknown123").await?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_loan_booking_is_active() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_loan_booking_is_active").await? else {
        return Ok(());
    };
    let request = new_booking("CUST002", ProductType::Loan, "LOAN123");
    let booking: Booking = harness.create(Resource::Bookings, &request).await?;
    check_created(&booking, &request)?;
    harness.note(format!("created {}", booking.booking_id));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_term_deposit_booking_is_active() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_term_deposit_booking_is_active").await?
    else {
        return Ok(());
    };
    let request = new_booking("CUST003", ProductType::TermDeposit, "TD456");
    let booking: Booking = harness.create(Resource::Bookings, &request).await?;
    check_created(&booking, &request)?;
    harness.note(format!("created {}", booking.booking_id));
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_duplicate_booking_conflicts() -> TestResult {
    let Some(mut harness) = ApiHarness::connect("post_duplicate_booking_conflicts").await? else {
        return Ok(());
    };
    let request = new_booking("CUST001", ProductType::Loan, "LOAN001");
    let response = harness.post(Resource::Bookings.collection_path(), &request).await?;
    expect_status(&response, StatusCode::CONFLICT)?;
    let conflict: ConflictError = response.json()?;
    conflict.validate()?;
    harness.note(format!("duplicate of {}", conflict.existing_booking_id));
    harness.finish()
}

/// Posts an incomplete booking; the server lists all three fields whichever
/// one is missing.
async fn expect_booking_rejected(test_name: &str, payload: Value) -> TestResult {
    let Some(mut harness) = ApiHarness::connect(test_name).await? else {
        return Ok(());
    };
    harness.expect_rejected(Resource::Bookings, &payload).await?;
    harness.finish()
}

#[tokio::test(flavor = "multi_thread")]
async fn post_booking_without_customer_is_rejected() -> TestResult {
    expect_booking_rejected(
        "post_booking_without_customer_is_rejected",
        json!({"productType": "loan", "productId": "LOAN789"}),
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn post_booking_without_product_type_is_rejected() -> TestResult {
    expect_booking_rejected(
        "post_booking_without_product_type_is_rejected",
        json!({"customerId": "CUST001", "productId": "LOAN789"}),
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn post_booking_without_product_id_is_rejected() -> TestResult {
    expect_booking_rejected(
        "post_booking_without_product_id_is_rejected",
        json!({"customerId": "CUST001", "productType": "termDeposit"}),
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn post_empty_booking_is_rejected() -> TestResult {
    expect_booking_rejected("post_empty_booking_is_rejected", json!({})).await
}
