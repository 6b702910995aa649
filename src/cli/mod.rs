//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

use crate::probe::Suite;

pub mod args;
pub mod context;
pub mod list;
pub mod run;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::RunContext;

/// panelprobe - sequential black-box probe for the e-commerce admin panel API
#[derive(Parser, Debug)]
#[command(name = "panelprobe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "PANELPROBE_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "PANELPROBE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Admin panel base URL
    #[arg(long, global = true, env = "PANELPROBE_BASE_URL", hide_env = true)]
    pub base_url: Option<String>,

    /// Admin login email
    #[arg(long, global = true, env = "PANELPROBE_EMAIL", hide_env = true)]
    pub email: Option<String>,

    /// Admin login password
    #[arg(long, global = true, env = "PANELPROBE_PASSWORD", hide_env = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "PANELPROBE_TIMEOUT", hide_env = true)]
    pub timeout: Option<u64>,

    /// Fail checks that only passed because the server reported the work as already done
    #[arg(long, global = true, env = "PANELPROBE_STRICT", hide_env = true)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "PANELPROBE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the check sequence against the admin panel
    Run(RunArgs),

    /// List the checks in run order
    List(RunArgs),

    /// Show the resolved configuration without contacting the server
    Status,

    /// Display version information
    Version,
}

/// Check selection shared by `run` and `list`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Only run checks from these suites (repeatable or comma-separated)
    #[arg(long, short = 's', value_enum, value_delimiter = ',')]
    pub suite: Vec<Suite>,
}
