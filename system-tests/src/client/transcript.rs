// system-tests/src/client/transcript.rs
// ============================================================================
// Module: Exchange Transcript
// Description: Ordered record of request/response exchanges.
// Purpose: Let a test persist exactly what it sent and received.
// Dependencies: serde, serde_json
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

/// One recorded exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Final response status, absent on transport failure.
    pub status: Option<u16>,
    /// Request payload, `null` for bodiless requests.
    pub request: Value,
    /// Response body as JSON, or as a string when not JSON.
    pub response: Value,
    /// Transport error message.
    pub error: Option<String>,
}

/// Shared, append-only transcript. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Recorded entries in arrival order.
    entries: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl Transcript {
    /// Appends an entry, assigning its sequence number.
    pub fn record(&self, mut entry: TranscriptEntry) {
        let Ok(mut guard) = self.entries.lock() else {
            return;
        };
        entry.sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(entry);
    }

    /// Returns a snapshot of the entries.
    #[must_use]
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}
