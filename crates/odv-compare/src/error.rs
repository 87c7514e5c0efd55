//! Comparator errors.

use odv_core::Location;
use odv_expr::ExprError;
use thiserror::Error;

/// A defect in the rule table that prevents a comparison from completing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// A rule's constraint could not be parsed or evaluated.
    #[error("rule {location} has an unusable constraint {constraint:?}: {source}")]
    Constraint {
        /// Location of the offending rule.
        location: Location,
        /// The rule's constraint text.
        constraint: String,
        /// The underlying expression error.
        source: ExprError,
    },

    /// A rule's location contains a segment pattern that is not a valid regex.
    #[error("rule location {location} has an invalid segment pattern {segment:?}: {reason}")]
    LocationPattern {
        /// Location of the offending rule.
        location: Location,
        /// The segment that failed to compile.
        segment: String,
        /// Why it failed.
        reason: String,
    },
}
