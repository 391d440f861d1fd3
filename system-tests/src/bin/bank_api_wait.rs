// system-tests/src/bin/bank_api_wait.rs
// ============================================================================
// Module: Bank API Wait Tool
// Description: Blocks until the externally managed mock server is reachable.
// Purpose: Let CI scripts gate the suites on mock readiness.
// Dependencies: clap, system-tests, tokio, tracing
// ============================================================================

//! Readiness wait binary for the bank API system tests.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use system_tests::client::ApiClient;
use system_tests::config::SuiteConfig;
use system_tests::logging;
use system_tests::logging::LogOutput;
use system_tests::readiness::DEFAULT_HEALTH_DELAY;
use system_tests::readiness::DEFAULT_HEALTH_RETRIES;
use system_tests::readiness::health_check;
use tracing::error;
use tracing::info;

/// Exit code for configuration or client setup failures.
const SETUP_FAILURE: u8 = 2;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "bank-api-wait", about = "Wait for the mocked bank API to accept requests")]
struct Cli {
    /// Base URL to probe (overrides `BASE_URL` and `PORT`).
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Number of probes before giving up.
    #[arg(long, default_value_t = DEFAULT_HEALTH_RETRIES)]
    retries: u32,
    /// Seconds to wait between probes.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_HEALTH_DELAY.as_secs())]
    delay_secs: u64,
}

/// Entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_with(LogOutput::Stderr) {
        error!(error = %err, "bank-api-wait: .env load failed");
        return ExitCode::from(SETUP_FAILURE);
    }
    let config = match SuiteConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "bank-api-wait: config load failed");
            return ExitCode::from(SETUP_FAILURE);
        }
    };
    let base_url = cli.base_url.unwrap_or(config.base_url);
    let client = match ApiClient::new(base_url, config.timeout) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "bank-api-wait: client init failed");
            return ExitCode::from(SETUP_FAILURE);
        }
    };
    info!(base_url = client.base_url(), retries = cli.retries, "waiting for mock server");
    if health_check(&client, cli.retries, Duration::from_secs(cli.delay_secs)).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
