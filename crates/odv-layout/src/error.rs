//! Layout loading errors.

use odv_core::LocationError;
use thiserror::Error;

/// An observed layout could not be produced.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The input file could not be read.
    #[error("cannot read layout '{path}': {source}")]
    Io {
        /// Path of the input.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The input is not valid JSON or YAML.
    #[error("layout '{path}' is not valid {format}: {reason}")]
    Parse {
        /// Path of the input.
        path: String,
        /// `JSON` or `YAML`.
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The document root is not a mapping of locations to values.
    #[error("layout '{path}' must be a mapping of locations to values")]
    NotAMapping {
        /// Path of the input.
        path: String,
    },

    /// A value has no attribute representation.
    #[error("layout '{path}' entry {key:?}: {reason}")]
    UnsupportedValue {
        /// Path of the input.
        path: String,
        /// The offending key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A key is not a valid location.
    #[error("layout '{path}' entry {key:?}: {source}")]
    Location {
        /// Path of the input.
        path: String,
        /// The offending key.
        key: String,
        /// The underlying location error.
        source: LocationError,
    },
}
