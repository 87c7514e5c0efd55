//! # odv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use odv_cli::check::{run_check, CheckArgs};
use odv_cli::config::CheckConfig;
use odv_cli::table::{run_table, TableArgs};
use odv_cli::EXIT_ERROR;

/// ODIM_H5 metadata compliance checker.
///
/// Compares the metadata layout of weather radar files with the tables of
/// the ODIM_H5 information model and reports every deviation.
#[derive(Parser, Debug)]
#[command(name = "odv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check layout snapshots against their standard tables.
    Check(CheckArgs),

    /// Print the standard table a layout snapshot resolves to.
    Table(TableArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "odv starting");

    let result = CheckConfig::load_or_default(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Check(args) => run_check(&args, &config),
            Commands::Table(args) => run_table(&args, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
