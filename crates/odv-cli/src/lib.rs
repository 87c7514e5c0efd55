//! # odv-cli — ODIM_H5 Compliance Checker CLI
//!
//! Provides the `odv` command-line interface.
//!
//! ## Subcommands
//!
//! - `odv check` — Compare one or more layout snapshots with their standard
//!   tables and report violations.
//! - `odv table` — Print the table a file resolves to.
//!
//! ```bash
//! odv check T_PAGZ41_C_LZIB_20180403000000.yaml --tables-dir data
//! odv check scan.json --table data/ODIM_H5_V2_4_SCAN.csv --check-optional
//! odv check *.json --standard-version 2.3 --format json
//! odv table pvol.yaml --standard-version 2.3
//! ```
//!
//! ## Exit Status
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | every checked file is compliant |
//! | 1 | at least one file is not compliant |
//! | 2 | operational error: unreadable input, malformed table or constraint |

pub mod check;
pub mod config;
pub mod table;

/// Every checked file is compliant.
pub const EXIT_COMPLIANT: u8 = 0;
/// At least one file violates its standard table.
pub const EXIT_NON_COMPLIANT: u8 = 1;
/// The check could not be carried out.
pub const EXIT_ERROR: u8 = 2;
