//! Global CLI options shared across all commands
//!
//! Flags and their environment variables are resolved by clap; the config
//! file and built-in defaults are layered underneath in
//! [`RunContext`](crate::cli::context::RunContext).

use crate::cli::{Cli, OutputFormat};
use crate::config::Overrides;

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.panelprobe/config.yaml)
    pub config: Option<String>,

    pub base_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Reject tolerated "already done" outcomes
    pub strict: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            base_url: cli.base_url.clone(),
            email: cli.email.clone(),
            password: cli.password.clone(),
            timeout: cli.timeout,
            strict: cli.strict,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// The layer these options put over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            timeout_secs: self.timeout,
            strict: self.strict,
        }
    }
}
