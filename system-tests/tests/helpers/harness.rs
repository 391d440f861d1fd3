// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Suite Harness
// Description: Per-test connection, request, and reporting helpers.
// Purpose: Reach the external mock server or skip cleanly when it is down.
// Dependencies: system-tests, bank-api-contract, reqwest, tracing
// ============================================================================

//! ## Overview
//! [`ApiHarness::connect`] loads the suite configuration, probes the mock
//! once, and returns `None` (after writing a `skipped` summary) when the mock
//! is unreachable and `BANK_API_REQUIRE_SERVER` is unset. Every request gets a
//! fresh correlation ID. [`ApiHarness::finish`] writes the transcript and a
//! `pass` summary.

use std::error::Error;
use std::fmt::Display;
use std::time::Duration;

use bank_api_contract::NotFoundError;
use bank_api_contract::Resource;
use bank_api_contract::ValidationError;
use bank_api_contract::ids::new_correlation_id;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use system_tests::artifacts::TRANSCRIPT_JSON;
use system_tests::artifacts::TestReporter;
use system_tests::artifacts::TestStatus;
use system_tests::client::ApiClient;
use system_tests::client::ApiResponse;
use system_tests::client::request_headers;
use system_tests::config::SuiteConfig;
use system_tests::logging;
use system_tests::readiness::health_check;
use tracing::info;
use tracing::warn;

/// Result type returned by every suite test.
pub type TestResult = Result<(), Box<dyn Error>>;

/// Connected client plus the reporter for one test.
pub struct ApiHarness {
    /// Client bound to the configured base URL.
    client: ApiClient,
    /// Summary writer for the test.
    reporter: TestReporter,
    /// Notes carried into the summary.
    notes: Vec<String>,
    /// Whether [`ApiHarness::finish`] ran.
    finished: bool,
}

impl ApiHarness {
    /// Connects to the mock server, or returns `None` when the test should be
    /// skipped.
    pub async fn connect(test_name: &str) -> Result<Option<Self>, Box<dyn Error>> {
        logging::init()?;
        let config = SuiteConfig::load()?;
        let mut reporter = TestReporter::new(test_name, &config)?;
        let client = ApiClient::from_config(&config)?;
        if health_check(&client, 1, Duration::ZERO).await {
            return Ok(Some(Self {
                client,
                reporter,
                notes: Vec::new(),
                finished: false,
            }));
        }
        let note = format!("mock server unreachable at {}", client.base_url());
        if config.require_server {
            reporter.finish(TestStatus::Fail, vec![note.clone()], Vec::new())?;
            return Err(note.into());
        }
        warn!(test = test_name, base_url = client.base_url(), "mock server unreachable; skipping");
        reporter.finish(TestStatus::Skipped, vec![note], Vec::new())?;
        Ok(None)
    }

    /// Adds a line to the test summary.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Sends a GET with fresh standard headers.
    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, Box<dyn Error>> {
        info!("Testing GET {endpoint}");
        let headers = request_headers(&new_correlation_id())?;
        Ok(self.client.get(endpoint, &headers).await?)
    }

    /// Sends a POST with fresh standard headers.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<ApiResponse, Box<dyn Error>> {
        info!("Testing POST {endpoint}");
        let headers = request_headers(&new_correlation_id())?;
        Ok(self.client.post(endpoint, payload, &headers).await?)
    }

    /// GETs `endpoint`, requires a 200, and decodes the body.
    pub async fn get_ok<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Box<dyn Error>> {
        let response = self.get(endpoint).await?;
        expect_status(&response, StatusCode::OK)?;
        Ok(response.json()?)
    }

    /// POSTs to `resource`, requires a 201, and decodes the created entity.
    pub async fn create<P, T>(&self, resource: Resource, payload: &P) -> Result<T, Box<dyn Error>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(resource.collection_path(), payload).await?;
        expect_status(&response, StatusCode::CREATED)?;
        Ok(response.json()?)
    }

    /// GETs an unknown `id` and checks the 404 body for `resource`.
    pub async fn expect_not_found(&mut self, resource: Resource, id: &str) -> TestResult {
        let response = self.get(&resource.item_path(id)).await?;
        expect_status(&response, StatusCode::NOT_FOUND)?;
        let body: NotFoundError = response.json()?;
        body.expect_for(resource)?;
        self.note(format!("GET {} returned {}", resource.item_path(id), body.code));
        Ok(())
    }

    /// POSTs an incomplete payload to `resource` and checks the 400 body
    /// lists every required field.
    pub async fn expect_rejected<P: Serialize + ?Sized>(
        &mut self,
        resource: Resource,
        payload: &P,
    ) -> Result<ValidationError, Box<dyn Error>> {
        let response = self.post(resource.collection_path(), payload).await?;
        expect_status(&response, StatusCode::BAD_REQUEST)?;
        let body: ValidationError = response.json()?;
        body.expect_for(resource)?;
        self.note(format!(
            "POST {resource} rejected; requiredFields = {}",
            body.required_fields.join(", ")
        ));
        Ok(body)
    }

    /// Writes the transcript and a `pass` summary.
    pub fn finish(mut self) -> TestResult {
        self.reporter.write_transcript(&self.client.transcript())?;
        let notes = std::mem::take(&mut self.notes);
        self.reporter.finish(TestStatus::Pass, notes, vec![TRANSCRIPT_JSON.to_string()])?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for ApiHarness {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.reporter.write_transcript(&self.client.transcript());
        }
    }
}

/// Fails unless `response` carries `expected`.
pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> TestResult {
    if response.status() == expected {
        Ok(())
    } else {
        Err(format!(
            "{} returned {}, expected {expected}: {}",
            response.url(),
            response.status(),
            response.text()
        )
        .into())
    }
}

/// Fails with `message` unless `condition` holds.
pub fn require(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(message.into().into()) }
}

/// Fails unless `left == right`.
pub fn require_eq<T: PartialEq + Display + ?Sized>(left: &T, right: &T, context: &str) -> TestResult {
    if left == right {
        Ok(())
    } else {
        Err(format!("{context}: left={left} right={right}").into())
    }
}
