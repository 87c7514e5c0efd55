//! # Error Types
//!
//! Errors raised while building core values from text. Loaders wrap these
//! with file and line context.

use thiserror::Error;

/// A location string could not be normalized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The input was empty or whitespace.
    #[error("empty location")]
    Empty,

    /// More than one `#` separator was present.
    #[error("location {input:?} has more than one attribute separator '#'")]
    MultipleAttributeSeparators {
        /// The offending input.
        input: String,
    },

    /// The attribute part after `#` was empty.
    #[error("location {input:?} names an empty attribute")]
    EmptyAttribute {
        /// The offending input.
        input: String,
    },

    /// A path without segments cannot name an attribute by its last segment.
    #[error("location {input:?} has no segment to use as attribute name")]
    NoAttributeSegment {
        /// The offending input.
        input: String,
    },
}

/// A standard version string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid standard version {input:?}: expected forms like \"2.1\", \"V2_1\", \"H5rad 2.1\" or \"ODIM_H5/V2_1\"")]
pub struct VersionError {
    /// The offending input.
    pub input: String,
}
