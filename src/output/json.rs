//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

use crate::probe::{CheckResult, Report, Summary};

/// Envelope for every JSON document the CLI prints
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the document was produced (RFC 3339)
    pub timestamp: String,
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Run report as emitted by `run --format json`
#[derive(Debug, Serialize)]
pub struct RunDocument<'a> {
    pub base_url: &'a str,
    pub started_at: String,
    pub passed: usize,
    pub total: usize,
    pub success: bool,
    pub summary: Summary,
    pub results: &'a [CheckResult],
}

impl<'a> From<&'a Report> for RunDocument<'a> {
    fn from(report: &'a Report) -> Self {
        let summary = report.summary();
        Self {
            base_url: &report.base_url,
            started_at: report.started_at.to_rfc3339(),
            passed: summary.passed,
            total: summary.total,
            success: summary.success,
            summary,
            results: &report.results,
        }
    }
}
