// system-tests/src/readiness.rs
// ============================================================================
// Module: Readiness Probe
// Description: Reachability check for the externally managed mock server.
// Purpose: Decide whether the suites can run without arbitrary sleeps.
// Dependencies: bank-api-contract, tokio, tracing
// ============================================================================

//! ## Overview
//! The mock server exposes an admin endpoint listing its stub mappings; a 200
//! from it means the fixtures are loaded. Each probe is a single attempt; the
//! client's own retry policy is bypassed so `retries` is the true bound.

use std::time::Duration;

use bank_api_contract::resources::ADMIN_MAPPINGS_PATH;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tokio::time::sleep;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::client::ApiClient;
use crate::client::RetryPolicy;

/// Probes made by the standalone wait tool.
pub const DEFAULT_HEALTH_RETRIES: u32 = 5;
/// Pause between probes for the standalone wait tool.
pub const DEFAULT_HEALTH_DELAY: Duration = Duration::from_secs(2);

/// Polls the admin mappings endpoint until it answers 200.
///
/// Makes up to `retries` probes, sleeping `delay` after each failed one except
/// the last. Returns false when every probe fails.
pub async fn health_check(client: &ApiClient, retries: u32, delay: Duration) -> bool {
    let probe = client.clone().with_retry_policy(RetryPolicy::none());
    let headers = HeaderMap::new();
    for attempt in 1 ..= retries {
        match probe.get(ADMIN_MAPPINGS_PATH, &headers).await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!(base_url = probe.base_url(), "mock server health check passed");
                return true;
            }
            Ok(response) => {
                warn!(attempt, status = response.status_code(), "health check returned non-200");
            }
            Err(err) => warn!(attempt, error = %err, "health check attempt failed"),
        }
        if attempt < retries {
            sleep(delay).await;
        }
    }
    error!(base_url = probe.base_url(), retries, "mock server health check failed after all retries");
    false
}

// ============================================================================
// SECTION: Tests
// ============================================================================
