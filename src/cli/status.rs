//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::context::resolve_config;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::{Config, Fixtures};
use crate::error::Result;
use crate::output::json::format_json;

/// Resolved settings as shown by `status`; the password is never printed
#[derive(Debug, Serialize)]
struct StatusView<'a> {
    config_file: String,
    config_file_found: bool,
    base_url: &'a str,
    timeout_secs: u64,
    strict: bool,
    email: &'a str,
    password_set: bool,
    fixtures: &'a Fixtures,
}

/// Run the status command to display the resolved configuration
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let config = resolve_config(opts)?;
    let validation = config.validate();

    let view = StatusView {
        config_file: path.display().to_string(),
        config_file_found: path.exists(),
        base_url: &config.base_url,
        timeout_secs: config.timeout_secs,
        strict: config.strict,
        email: &config.credentials.email,
        password_set: !config.credentials.password.is_empty(),
        fixtures: &config.fixtures,
    };

    if opts.format == OutputFormat::Json {
        println!("{}", format_json(&view)?);
        return validation;
    }

    println!("{}\n", "panelprobe Configuration Status".bold());

    if view.config_file_found {
        println!("Config file: {}", view.config_file.cyan());
    } else {
        println!(
            "Config file: {} {}",
            view.config_file.cyan(),
            "(not found, using defaults)".dimmed()
        );
    }
    println!();

    println!("{} Base URL: {}", "✓".green(), view.base_url.cyan());
    println!("{} Timeout: {}s", "✓".green(), view.timeout_secs);
    if view.strict {
        println!("{} Strict mode: tolerated outcomes fail", "⚠".yellow());
    } else {
        println!("{} Strict mode off", "○".dimmed());
    }

    if view.password_set {
        println!("{} Admin login: {}", "✓".green(), view.email);
    } else {
        println!("{} Admin login: {} (no password)", "✗".red(), view.email);
    }

    println!();
    println!("{}", "Fixtures".bold());
    let f = view.fixtures;
    println!("  Order:           {}", f.order_id);
    println!("  Discount code:   {}", f.discount_code);
    println!("  Promo code:      {}", f.promo_code);
    println!("  Staff invite:    {}", f.staff_email);
    println!("  Review product:  {}", f.review_product);
    println!("  Operator:        {}", f.operator);
    println!();

    validation
}
