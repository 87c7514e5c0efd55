//! Rule table errors.

use odv_core::LocationError;
use thiserror::Error;

/// A rule table could not be located, read or parsed.
#[derive(Error, Debug)]
pub enum TableError {
    /// The table file could not be read.
    #[error("cannot read rule table '{path}': {source}")]
    Io {
        /// Path of the table.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The table has no header row.
    #[error("rule table '{path}' is empty")]
    Empty {
        /// Path of the table.
        path: String,
    },

    /// A required column is absent from the header row.
    #[error("rule table '{path}' has no '{column}' column")]
    MissingColumn {
        /// Path of the table.
        path: String,
        /// Name of the missing column.
        column: &'static str,
    },

    /// A row could not be split into fields.
    #[error("rule table '{path}' line {line}: {reason}")]
    Malformed {
        /// Path of the table.
        path: String,
        /// 1-based line number.
        line: usize,
        /// What is wrong with the row.
        reason: String,
    },

    /// The `IsMandatory` column holds something other than a boolean.
    #[error("rule table '{path}' line {line}: invalid mandatory flag {value:?}")]
    MandatoryFlag {
        /// Path of the table.
        path: String,
        /// 1-based line number.
        line: usize,
        /// The offending field.
        value: String,
    },

    /// The `Category` column names an unknown node category.
    #[error("rule table '{path}' line {line}: unknown category {value:?}")]
    Category {
        /// Path of the table.
        path: String,
        /// 1-based line number.
        line: usize,
        /// The offending field.
        value: String,
    },

    /// The `Type` column names an unknown value type.
    #[error("rule table '{path}' line {line}: {reason}")]
    ValueType {
        /// Path of the table.
        path: String,
        /// 1-based line number.
        line: usize,
        /// Why the type was rejected.
        reason: String,
    },

    /// The `Node` column is not a valid location.
    #[error("rule table '{path}' line {line}: {source}")]
    Location {
        /// Path of the table.
        path: String,
        /// 1-based line number.
        line: usize,
        /// The underlying location error.
        source: LocationError,
    },

    /// No table name can be derived for an observed file.
    #[error("cannot determine rule table: {reason}")]
    Unresolvable {
        /// What the observed file lacks.
        reason: String,
    },
}
