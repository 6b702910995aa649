//! Aggregated run results

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::verdict::CheckResult;

/// Everything recorded during one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
}

/// Counts derived from a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub tolerated: usize,
    pub skipped: usize,
    pub success: bool,
}

impl Report {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// True iff every recorded check passed
    pub fn success(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn summary(&self) -> Summary {
        let passed = self.passed();
        Summary {
            total: self.total(),
            passed,
            failed: self.total() - passed,
            tolerated: self.results.iter().filter(|r| r.tolerated).count(),
            skipped: self.results.iter().filter(|r| r.skipped).count(),
            success: self.success(),
        }
    }
}
