//! Command execution context
//!
//! Loads the config file, layers the CLI/env overrides on top, validates
//! the result and opens the HTTP session every check shares.

use std::time::Duration;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::SessionClient;
use crate::config::Config;
use crate::error::Result;

/// Resolve configuration for `opts` without opening a session
pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_at(opts.config_ref())?;
    config.apply(&opts.overrides());
    config.base_url = config.normalized_base_url();
    Ok(config)
}

/// Everything a probe run needs
pub struct RunContext {
    /// Resolved and validated configuration
    pub config: Config,
    /// Cookie-carrying session shared by every check of the run
    pub client: SessionClient,
    pub format: OutputFormat,
}

impl RunContext {
    /// Build the context.
    ///
    /// # Errors
    /// Returns error if the config file cannot be read, the resolved
    /// configuration is invalid, or the HTTP client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = resolve_config(opts)?;
        config.validate()?;

        let client = SessionClient::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        log::debug!(
            "Session ready for {} (timeout {}s, strict {})",
            config.base_url,
            config.timeout_secs,
            config.strict
        );

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }
}
