//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::probe::{Check, CheckResult};

/// Format rows as a rounded table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// One executed check
#[derive(Debug, Tabled)]
pub struct ResultRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "CHECK")]
    pub name: String,
    #[tabled(rename = "RESULT")]
    pub outcome: &'static str,
    #[tabled(rename = "ENDPOINT")]
    pub endpoint: String,
    #[tabled(rename = "MESSAGE")]
    pub message: String,
}

impl ResultRow {
    pub fn new(position: usize, result: &CheckResult) -> Self {
        let outcome = match (result.passed, result.tolerated, result.skipped) {
            (_, _, true) => "SKIP",
            (true, true, _) => "PASS*",
            (true, false, _) => "PASS",
            (false, _, _) => "FAIL",
        };
        Self {
            position,
            name: result.name.clone(),
            outcome,
            endpoint: result.endpoint.clone(),
            message: result.message.clone(),
        }
    }
}

/// One catalogue entry, as printed by `list`
#[derive(Debug, Tabled)]
pub struct CatalogRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "CHECK")]
    pub name: &'static str,
    #[tabled(rename = "ENDPOINT")]
    pub endpoint: &'static str,
    #[tabled(rename = "SUITE")]
    pub suite: String,
    #[tabled(rename = "REQUIRES")]
    pub requires: String,
}

impl CatalogRow {
    pub fn new(position: usize, check: Check) -> Self {
        let requires: Vec<_> = check.requires().iter().map(|p| p.to_string()).collect();
        Self {
            position,
            name: check.name(),
            endpoint: check.endpoint(),
            suite: check.suite().to_string(),
            requires: if requires.is_empty() {
                "-".to_string()
            } else {
                requires.join(", ")
            },
        }
    }
}
