//! # odv-standard — ODIM_H5 Standard Tables
//!
//! Loads the rule tables that describe one revision and product of the
//! ODIM_H5 information model, and locates the right table for an observed
//! file.
//!
//! ## Table Format
//!
//! Semicolon-separated text with a header row. Column names are matched
//! case-insensitively:
//!
//! | Column | Required | Content |
//! |--------|----------|---------|
//! | `Node` | yes | `/what/source`, `/what#source`, `/dataset[0-9]+` |
//! | `Category` | yes | `group`, `dataset` or `attribute` |
//! | `Type` | yes | `string`, `real`, `integer`, `sequence`, ... (may be empty) |
//! | `IsMandatory` | yes | `TRUE`/`FALSE`, `yes`/`no`, `1`/`0` |
//! | `PossibleValues` | yes | constraint expression, empty for presence only |
//! | `Description` | no | free text |
//!
//! Fields may be double-quoted; `""` inside a quoted field is a literal
//! quote. Blank lines and lines starting with `#` are skipped.
//!
//! ## Naming
//!
//! Tables are named `{prefix}_V{major}_{minor}_{product}.csv`, for example
//! `ODIM_H5_V2_1_PVOL.csv`. The revision and product of a loaded table are
//! taken from its file name.

pub mod error;
pub mod naming;
mod record;
pub mod table;

pub use error::TableError;
pub use naming::{
    parse_table_file_name, resolve_table_path, table_file_name, TableLocator, TableName,
    DEFAULT_TABLE_PREFIX,
};
pub use table::{load_rule_table, parse_rule_table};
