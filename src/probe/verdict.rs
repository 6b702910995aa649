//! Check outcomes

use serde::Serialize;
use serde_json::Value;

/// The outcome a single check produces
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    /// Passed only because a duplicate/"already done" answer was accepted
    pub tolerated: bool,
    pub message: String,
    /// Response body kept for diagnostics on failures
    pub payload: Option<Value>,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            tolerated: false,
            message: message.into(),
            payload: None,
        }
    }

    /// A pass that relied on the server reporting the work as already done
    pub fn tolerated(message: impl Into<String>) -> Self {
        Self {
            tolerated: true,
            ..Self::pass(message)
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            tolerated: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Attach the response body, ignoring non-JSON (`Null`) bodies
    pub fn with_payload(mut self, payload: &Value) -> Self {
        if !payload.is_null() {
            self.payload = Some(payload.clone());
        }
        self
    }
}

/// One recorded entry of a run
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub endpoint: String,
    pub passed: bool,
    pub tolerated: bool,
    /// Not executed because a prerequisite was missing
    pub skipped: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub elapsed_ms: u64,
}
