//! # Check Subcommand
//!
//! Loads each layout snapshot, resolves and loads its standard table, runs
//! the comparison and prints one report per file.
//!
//! Tables are loaded once per run and shared by every file that resolves to
//! the same path. Any operational failure stops the run with an error; a
//! non-compliant file does not.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use odv_compare::{compare, CompareOptions, ComplianceReport};
use odv_core::{Diagnostics, RuleTable, StandardVersion};
use odv_layout::{LayoutSource, SnapshotSource};
use odv_standard::{load_rule_table, TableLocator};

use crate::config::CheckConfig;
use crate::{EXIT_COMPLIANT, EXIT_NON_COMPLIANT};

/// Report format.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per file, one indented line per violation.
    #[default]
    Text,
    /// A JSON array with one report object per file.
    Json,
}

/// Arguments for the `odv check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Layout snapshots to check (.json, .yaml or .yml).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Check every file against this table instead of resolving one per file.
    #[arg(long, value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Directory holding the standard tables.
    #[arg(long, value_name = "DIR")]
    pub tables_dir: Option<PathBuf>,

    /// Standard version to check against instead of the one the file declares.
    #[arg(long, value_name = "X.Y")]
    pub standard_version: Option<StandardVersion>,

    /// Also report failing optional entries.
    #[arg(long)]
    pub check_optional: bool,

    /// Also report nodes that no table entry describes.
    #[arg(long)]
    pub check_extras: bool,

    /// Suppress per-rule informational events.
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CheckArgs {
    /// Comparison policy from the flags, falling back to `config`.
    pub fn compare_options(&self, config: &CheckConfig) -> CompareOptions {
        let diagnostics = if self.quiet || !config.print_info {
            Diagnostics::quiet()
        } else {
            Diagnostics::verbose()
        };
        CompareOptions::default()
            .with_check_optional(self.check_optional || config.check_optional)
            .with_check_extras(self.check_extras || config.check_extras)
            .with_diagnostics(diagnostics)
    }
}

/// The result for one checked file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// The layout snapshot.
    pub file: PathBuf,
    /// The table it was checked against.
    pub table: PathBuf,
    /// Comparison result.
    pub report: ComplianceReport,
}

/// Execute the check subcommand, printing to stdout.
///
/// Returns exit code: 0 when every file is compliant, 1 otherwise.
/// Operational failures are returned as errors.
pub fn run_check(args: &CheckArgs, config: &CheckConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_check_to(args, config, &mut out)
}

/// Execute the check subcommand, printing to `out`.
pub fn run_check_to(args: &CheckArgs, config: &CheckConfig, out: &mut dyn Write) -> Result<u8> {
    let options = args.compare_options(config);
    let locator = config.table_locator(args.tables_dir.as_deref());
    let source = SnapshotSource::new();

    if args.table.is_some() && args.standard_version.is_some() {
        tracing::warn!("--standard-version is ignored when --table names the table");
    }

    let mut tables = HashMap::new();
    let mut outcomes = Vec::with_capacity(args.files.len());
    for file in &args.files {
        outcomes.push(check_file(
            file,
            args,
            &options,
            &locator,
            &source,
            &mut tables,
        )?);
    }

    match args.format {
        OutputFormat::Text => write_text(out, &outcomes)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcomes)
                .context("failed to serialize reports")?;
            writeln!(out, "{json}")?;
        }
    }

    if outcomes.iter().all(|o| o.report.is_compliant()) {
        Ok(EXIT_COMPLIANT)
    } else {
        Ok(EXIT_NON_COMPLIANT)
    }
}

fn check_file(
    file: &Path,
    args: &CheckArgs,
    options: &CompareOptions,
    locator: &TableLocator,
    source: &dyn LayoutSource,
    tables: &mut HashMap<PathBuf, RuleTable>,
) -> Result<FileOutcome> {
    let observed = source
        .load(file)
        .with_context(|| format!("cannot load layout {}", file.display()))?;

    let table_path = match &args.table {
        Some(path) => path.clone(),
        None => locator
            .resolve(&observed, args.standard_version)
            .with_context(|| format!("cannot choose a table for {}", file.display()))?,
    };

    let rules = match tables.entry(table_path.clone()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => entry.insert(
            load_rule_table(&table_path)
                .with_context(|| format!("cannot load table for {}", file.display()))?,
        ),
    };

    if args.standard_version.is_none() {
        if let (Some(declared), Some(table)) = (observed.declared_version(), rules.version) {
            if declared != table {
                tracing::warn!(
                    file = %file.display(),
                    %declared,
                    %table,
                    "file declares a different standard version than its table"
                );
            }
        }
    }

    tracing::info!(
        file = %file.display(),
        table = %table_path.display(),
        nodes = observed.len(),
        rules = rules.len(),
        "checking file"
    );

    let report = compare(&observed, rules, options).with_context(|| {
        format!(
            "cannot check {} against {}",
            file.display(),
            table_path.display()
        )
    })?;

    Ok(FileOutcome {
        file: file.to_path_buf(),
        table: table_path,
        report,
    })
}

fn write_text(out: &mut dyn Write, outcomes: &[FileOutcome]) -> Result<()> {
    for outcome in outcomes {
        let report = &outcome.report;
        if report.is_compliant() {
            writeln!(
                out,
                "{}: compliant with {} ({} rules, {} nodes)",
                outcome.file.display(),
                outcome.table.display(),
                report.rules_checked(),
                report.nodes_observed()
            )?;
        } else {
            writeln!(
                out,
                "{}: NOT compliant with {}: {} violation(s)",
                outcome.file.display(),
                outcome.table.display(),
                report.violations().len()
            )?;
            for violation in report.violations() {
                writeln!(out, "  FAIL: {violation}")?;
            }
        }
    }

    let passed = outcomes
        .iter()
        .filter(|o| o.report.is_compliant())
        .count();
    writeln!(out, "Files: {}/{} compliant", passed, outcomes.len())?;
    Ok(())
}
