//! # Constraint Evaluation
//!
//! Evaluates parsed constraints against [`AttributeValue`]s. The value's
//! variant is dispatched first; the constraint is then parsed for that
//! shape and applied.
//!
//! Every clause of a connective is evaluated, without short-circuiting, so
//! an aggregate over an empty sequence is reported no matter where it
//! appears in the chain.

use odv_core::{AttributeValue, Diagnostics, ValueKind};

use crate::ast::{Body, Connective, Constraint, Expr};
use crate::error::ExprError;
use crate::source;

/// Result of a clean evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the value satisfies the constraint.
    pub matched: bool,
    /// Why the value does not satisfy the constraint. Empty when matched.
    pub explanation: String,
}

impl Outcome {
    /// A satisfied constraint.
    pub fn pass() -> Self {
        Self {
            matched: true,
            explanation: String::new(),
        }
    }

    /// A violated constraint.
    pub fn fail(explanation: impl Into<String>) -> Self {
        Self {
            matched: false,
            explanation: explanation.into(),
        }
    }
}

/// Evaluate `constraint_text` against `value` with default diagnostics.
pub fn evaluate(value: &AttributeValue, constraint_text: &str) -> Result<Outcome, ExprError> {
    Evaluator::default().evaluate(value, constraint_text)
}

/// Evaluate a `what/source` identifier with default diagnostics.
pub fn evaluate_source_identifier(
    source_text: &str,
    constraint_text: &str,
) -> Result<Outcome, ExprError> {
    Evaluator::default().evaluate_source_identifier(source_text, constraint_text)
}

/// Constraint evaluator carrying the caller's diagnostics settings.
///
/// Holds no other state; one evaluator may be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    diagnostics: Diagnostics,
}

impl Evaluator {
    /// An evaluator using `diagnostics`.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// The diagnostics settings in use.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Parse `constraint_text` for the shape of `value` and evaluate it.
    pub fn evaluate(
        &self,
        value: &AttributeValue,
        constraint_text: &str,
    ) -> Result<Outcome, ExprError> {
        let constraint = Constraint::parse(constraint_text, value.kind())?;
        self.evaluate_constraint(&constraint, value)
    }

    /// Evaluate an already parsed constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Parse`] if `constraint` was parsed for a different
    /// value kind, [`ExprError::EmptySequence`] for aggregates over an
    /// empty sequence, and [`ExprError::NonFiniteElement`] for sequences
    /// holding NaN or infinity.
    pub fn evaluate_constraint(
        &self,
        constraint: &Constraint,
        value: &AttributeValue,
    ) -> Result<Outcome, ExprError> {
        if constraint.kind() != value.kind() {
            return Err(ExprError::parse(
                constraint.text(),
                format!(
                    "constraint parsed for {} values cannot apply to a {} value",
                    constraint.kind(),
                    value.kind()
                ),
            ));
        }

        let outcome = match (&constraint.body, value) {
            (Body::Pattern(regex), AttributeValue::Text(actual)) => {
                if regex.is_match(actual) {
                    Outcome::pass()
                } else {
                    Outcome::fail(format!(
                        "actual value {actual:?} does not match expected {:?}",
                        constraint.text()
                    ))
                }
            }
            (Body::Expr(expr), value) => evaluate_expr(expr, value)?,
            (Body::Pattern(_), _) => {
                return Err(ExprError::parse(
                    constraint.text(),
                    "text pattern cannot apply to a numeric value",
                ))
            }
        };

        if self.diagnostics.info {
            tracing::debug!(
                constraint = constraint.text(),
                value = %value,
                matched = outcome.matched,
                "evaluated constraint"
            );
        }

        Ok(outcome)
    }

    /// Evaluate a composite source identifier (`WMO:11812,NOD:skjav`).
    ///
    /// Exactly one space after each comma is removed before matching, so that
    /// `"ORG:215, CTY:644"` satisfies patterns written for `"ORG:215,CTY:644"`.
    /// A matching identifier must also consist of well-formed `TAG:value`
    /// tokens; see [`source::check_tokens`].
    pub fn evaluate_source_identifier(
        &self,
        source_text: &str,
        constraint_text: &str,
    ) -> Result<Outcome, ExprError> {
        let normalized = source::normalize_source_identifier(source_text);
        let constraint = Constraint::parse(constraint_text, ValueKind::Text)?;
        let outcome = self.evaluate_constraint(&constraint, &AttributeValue::Text(normalized.clone()))?;
        if !outcome.matched {
            return Ok(outcome);
        }

        match source::check_tokens(&normalized) {
            Ok(()) => Ok(outcome),
            Err(reason) => {
                if self.diagnostics.info {
                    tracing::debug!(source = source_text, %reason, "malformed source identifier");
                }
                Ok(Outcome::fail(format!(
                    "source identifier {source_text:?} is malformed: {reason}"
                )))
            }
        }
    }
}

/// Evaluate a numeric expression tree against a value.
pub fn evaluate_expr(expr: &Expr, value: &AttributeValue) -> Result<Outcome, ExprError> {
    match expr {
        Expr::Comparison(comparison) => {
            let actual = match value {
                AttributeValue::Number(n) => *n,
                other => {
                    return Err(ExprError::parse(
                        expr.to_string(),
                        format!("comparison requires a scalar number, found a {} value", other.kind()),
                    ))
                }
            };
            if comparison.holds(actual) {
                Ok(Outcome::pass())
            } else {
                Ok(Outcome::fail(format!(
                    "value {actual} does not satisfy {comparison}"
                )))
            }
        }
        Expr::Aggregate {
            selector,
            comparison,
        } => {
            let values = match value {
                AttributeValue::NumberSequence(values) => values,
                other => {
                    return Err(ExprError::parse(
                        expr.to_string(),
                        format!("aggregate requires a number sequence, found a {} value", other.kind()),
                    ))
                }
            };
            let actual = selector.apply(values)?;
            if comparison.holds(actual) {
                Ok(Outcome::pass())
            } else {
                Ok(Outcome::fail(format!(
                    "{selector} {actual} does not satisfy {comparison}"
                )))
            }
        }
        Expr::Connective {
            connective,
            operands,
        } => {
            let outcomes = operands
                .iter()
                .map(|op| evaluate_expr(op, value))
                .collect::<Result<Vec<_>, _>>()?;

            let matched = match connective {
                Connective::And => outcomes.iter().all(|o| o.matched),
                Connective::Or => outcomes.iter().any(|o| o.matched),
            };
            if matched {
                return Ok(Outcome::pass());
            }

            let reasons: Vec<&str> = outcomes
                .iter()
                .filter(|o| !o.matched)
                .map(|o| o.explanation.as_str())
                .collect();
            Ok(match connective {
                Connective::And => Outcome::fail(reasons.join("; ")),
                Connective::Or => Outcome::fail(format!(
                    "no alternative of {expr} holds: {}",
                    reasons.join("; ")
                )),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(x: f64, text: &str) -> Outcome {
        evaluate(&AttributeValue::Number(x), text).unwrap()
    }

    #[test]
    fn explanations_are_empty_on_success() {
        assert_eq!(num(1.256, "1.256"), Outcome::pass());
    }

    #[test]
    fn failing_comparison_names_actual_and_expected() {
        let out = num(1.255, "=1.256");
        assert!(!out.matched);
        assert!(out.explanation.contains("1.255"));
        assert!(out.explanation.contains("==1.256"));
    }

    #[test]
    fn and_explanation_lists_only_failures() {
        let out = num(1.256, ">1.254&&<1.256");
        assert!(!out.matched);
        assert_eq!(out.explanation, "value 1.256 does not satisfy <1.256");
    }

    #[test]
    fn or_explanation_lists_all_alternatives() {
        let out = num(1.255, "<1.254||>1.256");
        assert!(!out.matched);
        assert!(out.explanation.contains("<1.254"));
        assert!(out.explanation.contains(">1.256"));
    }

    #[test]
    fn text_failure_names_both_texts() {
        let out = evaluate(&AttributeValue::from("H5rad 2.0"), "H5rad 2.1").unwrap();
        assert!(!out.matched);
        assert!(out.explanation.contains("H5rad 2.0"));
        assert!(out.explanation.contains("H5rad 2.1"));
    }

    #[test]
    fn empty_sequence_surfaces_even_after_a_passing_or_clause() {
        let seq = AttributeValue::NumberSequence(vec![]);
        let err = evaluate(&seq, "max>1||min<0").unwrap_err();
        assert!(matches!(err, ExprError::EmptySequence { .. }));
    }

    #[test]
    fn kind_mismatch_between_constraint_and_value() {
        let constraint = Constraint::parse(">1", ValueKind::Number).unwrap();
        let err = Evaluator::default()
            .evaluate_constraint(&constraint, &AttributeValue::from("x"))
            .unwrap_err();
        assert!(matches!(err, ExprError::Parse { .. }));
    }

    #[test]
    fn parsed_constraint_is_reusable() {
        let constraint = Constraint::parse(">=0&&<=360", ValueKind::Number).unwrap();
        let evaluator = Evaluator::new(Diagnostics::quiet());
        for (x, expected) in [(0.0, true), (180.0, true), (360.5, false), (-1.0, false)] {
            let out = evaluator
                .evaluate_constraint(&constraint, &AttributeValue::Number(x))
                .unwrap();
            assert_eq!(out.matched, expected, "{x}");
        }
    }
}
