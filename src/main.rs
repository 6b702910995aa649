//! panelprobe - sequential black-box probe for the e-commerce admin panel API

use clap::Parser;

mod checks;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod probe;

use cli::{Cli, Commands, GlobalOptions, RunArgs};
use error::Result;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if debug {
        builder.filter_module("panelprobe", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Dispatch the command; `Ok(false)` means the run finished with failures
async fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        None => cli::run::run(&opts, &RunArgs::default()).await,
        Some(Commands::Run(args)) => cli::run::run(&opts, &args).await,
        Some(Commands::List(args)) => cli::list::run(&opts, &args).map(|_| true),
        Some(Commands::Status) => cli::status::run(&opts).map(|_| true),
        Some(Commands::Version) => {
            println!("panelprobe version {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
    }
}
