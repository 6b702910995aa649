//! Human-oriented progress and summary output (`--format pretty`)

use colored::Colorize;

use crate::probe::{Check, CheckResult, Observer, Report};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Prints each check as it runs
pub struct Console;

impl Observer for Console {
    fn on_start(&mut self, _position: usize, _total: usize, check: Check) {
        println!("{}", start_line(check));
    }

    fn on_result(&mut self, result: &CheckResult) {
        println!("{}", result_lines(result));
    }
}

pub fn start_line(check: Check) -> String {
    format!("\n🧪 Running: {}", check.name().bold())
}

/// Outcome line, plus the response payload indented underneath for failures
pub fn result_lines(result: &CheckResult) -> String {
    let status = if result.passed {
        "✅ PASS".green().bold()
    } else {
        "❌ FAIL".red().bold()
    };
    let mut out = format!("{} {}: {}", status, result.endpoint, result.message);

    if !result.passed {
        if let Some(payload) = &result.payload {
            let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
            for line in pretty.lines() {
                out.push_str("\n   ");
                out.push_str(line);
            }
        }
    }
    out
}

pub fn banner(base_url: &str, total: usize) -> String {
    format!(
        "🚀 Probing admin panel at {} ({} checks)\n{}",
        base_url.cyan(),
        total,
        rule()
    )
}

/// Closing block: totals, tolerated passes and the failed checks
pub fn summary(report: &Report) -> String {
    let s = report.summary();
    let mut out = format!(
        "\n{}\n📊 Test Results: {}/{} tests passed",
        rule(),
        s.passed,
        s.total
    );

    if s.tolerated > 0 {
        out.push_str(&format!(
            "\n{} {} passed on an \"already done\" answer",
            "⚠".yellow(),
            s.tolerated
        ));
    }

    if s.success {
        out.push_str(&format!("\n{}", "🎉 All tests passed!".green().bold()));
        return out;
    }

    out.push_str(&format!("\n{}", "❌ Failed tests:".red().bold()));
    for result in report.failures() {
        out.push_str(&format!("\n  - {}: {}", result.name, result.message));
    }
    out
}
