//! # Expression Tree
//!
//! Typed form of a parsed constraint. A [`Constraint`] is either an anchored
//! text pattern or a numeric [`Expr`] built from three node kinds:
//!
//! - [`Expr::Comparison`]: a comparator, threshold and optional tolerance
//!   applied to a scalar.
//! - [`Expr::Aggregate`]: a comparison applied to a reduction of a sequence.
//! - [`Expr::Connective`]: two or more clauses joined by a single connective.

use std::fmt;

use regex::Regex;

use odv_core::ValueKind;

use crate::error::ExprError;

/// A parsed constraint, bound to the value kind it was parsed for.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub(crate) text: String,
    pub(crate) kind: ValueKind,
    pub(crate) body: Body,
}

#[derive(Debug, Clone)]
pub(crate) enum Body {
    Pattern(Regex),
    Expr(Expr),
}

impl Constraint {
    /// Parse `text` as a constraint on values of `kind`.
    pub fn parse(text: &str, kind: ValueKind) -> Result<Self, ExprError> {
        crate::parser::parse(text, kind)
    }

    /// The raw constraint text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The value kind this constraint applies to.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The numeric expression tree, if this is not a text pattern.
    pub fn expr(&self) -> Option<&Expr> {
        match &self.body {
            Body::Expr(expr) => Some(expr),
            Body::Pattern(_) => None,
        }
    }

    /// True for text constraints.
    pub fn is_pattern(&self) -> bool {
        matches!(self.body, Body::Pattern(_))
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.kind == other.kind
    }
}

/// A numeric expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A comparison against a scalar value.
    Comparison(Comparison),
    /// A comparison against a reduction of a sequence value.
    Aggregate {
        /// The reduction applied first.
        selector: Aggregate,
        /// The comparison applied to the reduced value.
        comparison: Comparison,
    },
    /// Clauses combined by one connective.
    Connective {
        /// How the operands combine.
        connective: Connective,
        /// The clauses, in source order. Never nested connectives.
        operands: Vec<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(c) => write!(f, "{c}"),
            Self::Aggregate {
                selector,
                comparison,
            } => write!(f, "{selector}{comparison}"),
            Self::Connective {
                connective,
                operands,
            } => {
                for (i, op) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(connective.token())?;
                    }
                    write!(f, "{op}")?;
                }
                Ok(())
            }
        }
    }
}

/// Comparator, threshold and optional tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// The comparison operator.
    pub comparator: Comparator,
    /// Right-hand side.
    pub threshold: f64,
    /// Allowed absolute deviation; only for [`Comparator::Equal`].
    pub tolerance: Option<f64>,
}

impl Comparison {
    /// Whether `actual` satisfies this comparison.
    ///
    /// Equality without tolerance is exact floating-point equality.
    pub fn holds(&self, actual: f64) -> bool {
        let t = self.threshold;
        match self.comparator {
            Comparator::Equal => match self.tolerance {
                Some(tolerance) => (actual - t).abs() <= tolerance,
                None => actual == t,
            },
            Comparator::GreaterOrEqual => actual >= t,
            Comparator::LessOrEqual => actual <= t,
            Comparator::Greater => actual > t,
            Comparator::Less => actual < t,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator.token(), self.threshold)?;
        if let Some(tolerance) = self.tolerance {
            write!(f, "+-{tolerance}")?;
        }
        Ok(())
    }
}

/// Comparison operator. `=`, `==` and a bare number all mean [`Comparator::Equal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `==`, `=`, or no operator.
    Equal,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
}

impl Comparator {
    /// Canonical token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
        }
    }

    /// Split the longest comparator token off the front of `input`.
    ///
    /// Returns `None` as the comparator when no token is present (a bare
    /// number), along with the unconsumed remainder.
    pub(crate) fn split_prefix(input: &str) -> (Option<Self>, &str) {
        const TOKENS: [(&str, Comparator); 6] = [
            ("==", Comparator::Equal),
            (">=", Comparator::GreaterOrEqual),
            ("<=", Comparator::LessOrEqual),
            ("=", Comparator::Equal),
            (">", Comparator::Greater),
            ("<", Comparator::Less),
        ];
        for (token, comparator) in TOKENS {
            if let Some(rest) = input.strip_prefix(token) {
                return (Some(comparator), rest);
            }
        }
        (None, input)
    }
}

/// Boolean connective joining clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// `&&`: every clause must hold.
    And,
    /// `||`: at least one clause must hold.
    Or,
}

impl Connective {
    /// Source token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Reduction of a number sequence to a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    /// Smallest element.
    Min,
    /// Largest element.
    Max,
    /// Arithmetic mean.
    Mean,
    /// First element.
    First,
    /// Last element.
    Last,
}

impl Aggregate {
    /// Look up an aggregate by its constraint keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "mean" => Some(Self::Mean),
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            _ => None,
        }
    }

    /// Constraint keyword.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
            Self::First => "first",
            Self::Last => "last",
        }
    }

    /// Reduce `values`. Every element must be finite, whichever aggregate
    /// is asked for.
    pub fn apply(&self, values: &[f64]) -> Result<f64, ExprError> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ExprError::NonFiniteElement {
                aggregate: *self,
                index,
                value,
            });
        }
        let empty = || ExprError::EmptySequence { aggregate: *self };
        match self {
            Self::Min => values.iter().copied().reduce(f64::min).ok_or_else(empty),
            Self::Max => values.iter().copied().reduce(f64::max).ok_or_else(empty),
            Self::Mean => {
                if values.is_empty() {
                    return Err(empty());
                }
                Ok(values.iter().sum::<f64>() / values.len() as f64)
            }
            Self::First => values.first().copied().ok_or_else(empty),
            Self::Last => values.last().copied().ok_or_else(empty),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
