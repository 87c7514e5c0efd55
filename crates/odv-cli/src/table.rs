//! # Table Subcommand
//!
//! Prints the standard table a layout snapshot resolves to, without
//! running a comparison.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use odv_core::StandardVersion;
use odv_layout::{LayoutSource, SnapshotSource};

use crate::config::CheckConfig;
use crate::EXIT_COMPLIANT;

/// Arguments for the `odv table` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Layout snapshot (.json, .yaml or .yml).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory holding the standard tables.
    #[arg(long, value_name = "DIR")]
    pub tables_dir: Option<PathBuf>,

    /// Standard version to use instead of the one the file declares.
    #[arg(long, value_name = "X.Y")]
    pub standard_version: Option<StandardVersion>,
}

/// Execute the table subcommand, printing to stdout.
pub fn run_table(args: &TableArgs, config: &CheckConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_table_to(args, config, &mut out)
}

/// Execute the table subcommand, printing to `out`.
pub fn run_table_to(args: &TableArgs, config: &CheckConfig, out: &mut dyn Write) -> Result<u8> {
    let observed = SnapshotSource::new()
        .load(&args.file)
        .with_context(|| format!("cannot load layout {}", args.file.display()))?;
    let path = config
        .table_locator(args.tables_dir.as_deref())
        .resolve(&observed, args.standard_version)
        .with_context(|| format!("cannot choose a table for {}", args.file.display()))?;

    if !path.is_file() {
        tracing::warn!(path = %path.display(), "resolved table does not exist");
    }
    writeln!(out, "{}", path.display())?;
    Ok(EXIT_COMPLIANT)
}
