//! Expression engine errors.

use thiserror::Error;

use crate::ast::Aggregate;

/// Failure to parse or evaluate a constraint.
///
/// A clean `false` result is not an error: it is an [`Outcome`](crate::Outcome)
/// with `matched == false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// The constraint is syntactically invalid for the value's shape.
    #[error("invalid constraint {fragment:?}: {reason}")]
    Parse {
        /// The offending part of the constraint text.
        fragment: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An aggregate was requested over a zero-length sequence.
    #[error("cannot compute '{aggregate}' of an empty sequence")]
    EmptySequence {
        /// The aggregate that was requested.
        aggregate: Aggregate,
    },

    /// A sequence element is NaN or infinite, so no aggregate is meaningful.
    #[error("cannot compute '{aggregate}': element {index} is {value}")]
    NonFiniteElement {
        /// The aggregate that was requested.
        aggregate: Aggregate,
        /// Position of the first offending element.
        index: usize,
        /// The element itself.
        value: f64,
    },
}

impl ExprError {
    pub(crate) fn parse(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }
}
