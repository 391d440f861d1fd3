// system-tests/src/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Per-test artifact directories and run summaries.
// Purpose: Leave a deterministic record of every suite test on disk.
// Dependencies: serde, serde_jcs, time
// ============================================================================

//! ## Overview
//! Every suite test owns a directory holding `summary.json`, `summary.md`,
//! and, once it reached the mock, `transcript.json`. JSON artifacts use
//! canonical JCS serialization so reruns diff cleanly. A reporter dropped
//! without [`TestReporter::finish`] still writes a summary, marked `panic` or
//! `unknown`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::client::TranscriptEntry;
use crate::config::SuiteConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Subdirectory of the cargo target directory holding default run roots.
const ARTIFACT_SUBDIR: &str = "system-tests";
/// Overrides the cargo target directory, as cargo itself does.
const TARGET_DIR_ENV: &str = "CARGO_TARGET_DIR";
/// Machine-readable summary.
pub const SUMMARY_JSON: &str = "summary.json";
/// Human-readable summary.
pub const SUMMARY_MD: &str = "summary.md";
/// Request/response transcript.
pub const TRANSCRIPT_JSON: &str = "transcript.json";

// ============================================================================
// SECTION: Status
// ============================================================================

/// Final outcome recorded for a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Every assertion held.
    Pass,
    /// The test reported a failure.
    Fail,
    /// The mock server was unreachable.
    Skipped,
    /// The test panicked before finishing.
    Panic,
    /// The test ended without reporting.
    Unknown,
}

impl TestStatus {
    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skipped => "skipped",
            Self::Panic => "panic",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// SECTION: Directories
// ============================================================================

/// Directory that receives one test's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    /// Absolute or workspace-relative directory path.
    path: PathBuf,
}

impl ArtifactDir {
    /// Resolves and creates the directory for `test_name`.
    ///
    /// With `BANK_API_RUN_ROOT` set the directory is `<root>/<test>`;
    /// otherwise it is `<target>/system-tests/run_<unix-ms>/<test>`, where
    /// the run stamp is fixed for the life of the process.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn for_test(config: &SuiteConfig, test_name: &str) -> io::Result<Self> {
        let run_root = config.run_root.as_deref().unwrap_or_else(|| default_run_root());
        Self::create(run_root.join(test_name))
    }

    /// Creates the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn create(path: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&path)?;
        Ok(Self {
            path,
        })
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `value` as canonical JSON to `file`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn put_json<T: Serialize>(&self, file: &str, value: &T) -> io::Result<PathBuf> {
        let bytes = serde_jcs::to_vec(value).map_err(io::Error::other)?;
        self.put_bytes(file, &bytes)
    }

    /// Writes UTF-8 text to `file`.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn put_text(&self, file: &str, text: &str) -> io::Result<PathBuf> {
        self.put_bytes(file, text.as_bytes())
    }

    /// Writes raw bytes to `file`.
    fn put_bytes(&self, file: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let target = self.path.join(file);
        fs::write(&target, bytes)?;
        Ok(target)
    }
}

/// Run root shared by every test in this process.
fn default_run_root() -> &'static Path {
    static RUN_ROOT: OnceLock<PathBuf> = OnceLock::new();
    RUN_ROOT.get_or_init(|| {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        run_root_under(std::env::var_os(TARGET_DIR_ENV).map(PathBuf::from), millis)
    })
}

/// Builds `<target>/system-tests/run_<millis>`, defaulting `target` to the
/// workspace's `target/` directory.
fn run_root_under(target_dir: Option<PathBuf>, millis: i128) -> PathBuf {
    let target_dir = target_dir.unwrap_or_else(|| {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest.parent().unwrap_or(manifest).join("target")
    });
    target_dir.join(ARTIFACT_SUBDIR).join(format!("run_{millis}"))
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Contents of `summary.json`.
#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    /// Test function name.
    test: &'a str,
    /// Final outcome.
    status: TestStatus,
    /// Mock server the test targeted.
    base_url: Option<&'a str>,
    /// RFC 3339 start time.
    started_at: String,
    /// RFC 3339 end time.
    finished_at: String,
    /// Wall-clock duration.
    elapsed_ms: u64,
    /// Exchanges recorded in the transcript.
    requests: usize,
    /// Free-form notes.
    notes: &'a [String],
    /// Artifact files written next to the summary.
    files: &'a [String],
}

impl SummaryRecord<'_> {
    /// Renders the record as Markdown.
    fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.test);
        out.push_str("| Field | Value |\n|---|---|\n");
        let _ = writeln!(out, "| Status | {} |", self.status.label());
        let _ = writeln!(out, "| Base URL | {} |", self.base_url.unwrap_or("-"));
        let _ = writeln!(out, "| Started | {} |", self.started_at);
        let _ = writeln!(out, "| Elapsed (ms) | {} |", self.elapsed_ms);
        let _ = writeln!(out, "| Requests | {} |", self.requests);
        render_list(&mut out, "Notes", self.notes);
        render_list(&mut out, "Files", self.files);
        out
    }
}

/// Appends a bulleted section, or `_none_` when `items` is empty.
fn render_list(out: &mut String, heading: &str, items: &[String]) {
    let _ = write!(out, "\n## {heading}\n\n");
    if items.is_empty() {
        out.push_str("_none_\n");
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

/// Formats a timestamp as RFC 3339, or empty when it cannot be rendered.
fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_default()
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Writes the summary for one test, even when the test panics.
#[derive(Debug)]
pub struct TestReporter {
    /// Where artifacts go.
    dir: ArtifactDir,
    /// Test function name.
    test: String,
    /// Mock server the test targets.
    base_url: Option<String>,
    /// Wall-clock start.
    started_at: OffsetDateTime,
    /// Monotonic start.
    started: Instant,
    /// Exchanges written by [`TestReporter::write_transcript`].
    requests: usize,
    /// Whether a summary has been written.
    done: bool,
}

impl TestReporter {
    /// Creates a reporter for `test_name` under the configured run root.
    ///
    /// # Errors
    ///
    /// Returns an error when the artifact directory cannot be created.
    pub fn new(test_name: &str, config: &SuiteConfig) -> io::Result<Self> {
        let mut reporter = Self::in_dir(test_name, ArtifactDir::for_test(config, test_name)?);
        reporter.base_url = Some(config.base_url.clone());
        Ok(reporter)
    }

    /// Creates a reporter writing into an existing directory.
    #[must_use]
    pub fn in_dir(test_name: &str, dir: ArtifactDir) -> Self {
        Self {
            dir,
            test: test_name.to_string(),
            base_url: None,
            started_at: OffsetDateTime::now_utc(),
            started: Instant::now(),
            requests: 0,
            done: false,
        }
    }

    /// Artifact directory.
    #[must_use]
    pub const fn dir(&self) -> &ArtifactDir {
        &self.dir
    }

    /// Writes `transcript.json` and remembers how many exchanges it holds.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_transcript(&mut self, entries: &[TranscriptEntry]) -> io::Result<PathBuf> {
        self.requests = entries.len();
        self.dir.put_json(TRANSCRIPT_JSON, &entries)
    }

    /// Writes `summary.json` and `summary.md`.
    ///
    /// # Errors
    ///
    /// Returns an error when either file cannot be written.
    pub fn finish(
        &mut self,
        status: TestStatus,
        notes: Vec<String>,
        files: Vec<String>,
    ) -> io::Result<()> {
        let record = SummaryRecord {
            test: &self.test,
            status,
            base_url: self.base_url.as_deref(),
            started_at: rfc3339(self.started_at),
            finished_at: rfc3339(OffsetDateTime::now_utc()),
            elapsed_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
            requests: self.requests,
            notes: &notes,
            files: &files,
        };
        self.dir.put_json(SUMMARY_JSON, &record)?;
        self.dir.put_text(SUMMARY_MD, &record.to_markdown())?;
        self.done = true;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let status = if std::thread::panicking() { TestStatus::Panic } else { TestStatus::Unknown };
        let _ = self.finish(status, vec!["ended without a summary".to_string()], Vec::new());
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
