//! List command implementation

use serde::Serialize;

use crate::cli::{GlobalOptions, OutputFormat, RunArgs};
use crate::error::Result;
use crate::output::json::format_json;
use crate::output::table::{CatalogRow, format_table};
use crate::probe::{Check, Prerequisite, Suite};

#[derive(Debug, Serialize)]
struct CatalogEntry {
    position: usize,
    name: &'static str,
    endpoint: &'static str,
    suite: Suite,
    requires: &'static [Prerequisite],
}

/// Print the selected checks in run order
pub fn run(opts: &GlobalOptions, args: &RunArgs) -> Result<()> {
    let checks = Check::sequence(&args.suite);

    match opts.format {
        OutputFormat::Json => {
            let entries: Vec<_> = checks
                .iter()
                .enumerate()
                .map(|(i, check)| CatalogEntry {
                    position: i + 1,
                    name: check.name(),
                    endpoint: check.endpoint(),
                    suite: check.suite(),
                    requires: check.requires(),
                })
                .collect();
            println!("{}", format_json(&entries)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            let rows: Vec<_> = checks
                .iter()
                .enumerate()
                .map(|(i, check)| CatalogRow::new(i + 1, *check))
                .collect();
            println!("{}", format_table(&rows));
        }
    }

    Ok(())
}
