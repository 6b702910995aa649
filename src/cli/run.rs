//! Run command implementation

use colored::Colorize;

use crate::cli::{GlobalOptions, OutputFormat, RunArgs, RunContext};
use crate::error::Result;
use crate::output::json::{RunDocument, format_json};
use crate::output::table::{ResultRow, format_table};
use crate::output::{Console, console};
use crate::probe::{Check, Probe, Report, Silent};

/// Run the selected checks; returns whether every check passed
pub async fn run(opts: &GlobalOptions, args: &RunArgs) -> Result<bool> {
    let ctx = RunContext::new(opts)?;
    let checks = Check::sequence(&args.suite);
    log::info!(
        "Running {} checks against {}",
        checks.len(),
        ctx.config.base_url
    );

    let mut probe = Probe::new(&ctx.client, &ctx.config);

    let report = match ctx.format {
        OutputFormat::Pretty => {
            println!("{}", console::banner(&ctx.config.base_url, checks.len()));
            let report = probe.run(&checks, &mut Console).await;
            println!("{}", console::summary(&report));
            report
        }
        OutputFormat::Table => {
            let report = probe.run(&checks, &mut Silent).await;
            print_table(&report);
            report
        }
        OutputFormat::Json => {
            let report = probe.run(&checks, &mut Silent).await;
            println!("{}", format_json(&RunDocument::from(&report))?);
            report
        }
    };

    let leftovers = probe.state().leftovers();
    if !leftovers.is_empty() {
        log::warn!("Left on the server after the run: {}", leftovers.join(", "));
    }

    Ok(report.success())
}

fn print_table(report: &Report) {
    let rows: Vec<_> = report
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| ResultRow::new(i + 1, r))
        .collect();
    println!("{}", format_table(&rows));

    let s = report.summary();
    let line = format!("{}/{} tests passed", s.passed, s.total);
    if s.success {
        println!("{}", line.green());
    } else {
        println!("{} ({} failed, {} skipped)", line.red(), s.failed, s.skipped);
    }
    if s.tolerated > 0 {
        println!("PASS* = passed on an \"already done\" answer ({})", s.tolerated);
    }
}
