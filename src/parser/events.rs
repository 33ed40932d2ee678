//! JSON reporter event stream
//!
//! `flutter test --reporter=json` prints one JSON object per line, interleaved
//! with plain log text. Only `testDone` events contribute to the counts.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::models::TestCounts;

const TEST_DONE: &str = "testDone";
const RESULT_SUCCESS: &str = "success";

/// The subset of a reporter event this tool cares about
#[derive(Debug, Default, Deserialize)]
pub struct TestEvent {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,

    #[serde(default)]
    pub result: Option<Value>,
}

impl TestEvent {
    /// Parse a single line, returning `None` for anything that is not a JSON object
    pub fn parse_line(line: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(line).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub fn is_test_done(&self) -> bool {
        self.kind.as_ref().and_then(Value::as_str) == Some(TEST_DONE)
    }

    pub fn is_success(&self) -> bool {
        self.result.as_ref().and_then(Value::as_str) == Some(RESULT_SUCCESS)
    }
}

/// Count finished tests in a reporter stream
pub fn parse_event_stream(output: &str) -> TestCounts {
    let mut counts = TestCounts::default();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(event) = TestEvent::parse_line(line) else {
            trace!("Skipping non-JSON line: {}", line);
            continue;
        };

        if event.is_test_done() {
            counts.record(event.is_success());
        }
    }

    counts
}
