//! # Constraint Parser
//!
//! Turns constraint text into a [`Constraint`]. Parsing depends on the kind
//! of value the constraint will be evaluated against:
//!
//! - `Text`: the whole text is a regular expression, anchored at both ends.
//! - `Number`: clauses without aggregates.
//! - `NumberSequence`: clauses that each start with an aggregate.
//!
//! Connectives are split first. An expression uses either `&&` or `||`
//! throughout; mixing them has no agreed precedence and is rejected.

use regex::Regex;

use odv_core::ValueKind;

use crate::ast::{Aggregate, Body, Comparator, Comparison, Connective, Constraint, Expr};
use crate::error::ExprError;

const TOLERANCE_TOKEN: &str = "+-";

/// Parse `text` as a constraint on values of `kind`.
pub fn parse(text: &str, kind: ValueKind) -> Result<Constraint, ExprError> {
    let body = match kind {
        ValueKind::Text => Body::Pattern(compile_pattern(text)?),
        ValueKind::Number | ValueKind::NumberSequence => Body::Expr(parse_expr(text, kind)?),
    };
    Ok(Constraint {
        text: text.to_string(),
        kind,
        body,
    })
}

/// Compile a fully-anchored pattern.
fn compile_pattern(text: &str) -> Result<Regex, ExprError> {
    Regex::new(&format!("^(?:{text})$")).map_err(|e| ExprError::parse(text, e.to_string()))
}

/// Parse a numeric expression: one clause, or clauses joined by one connective.
pub fn parse_expr(text: &str, kind: ValueKind) -> Result<Expr, ExprError> {
    let has_and = text.contains(Connective::And.token());
    let has_or = text.contains(Connective::Or.token());

    let connective = match (has_and, has_or) {
        (true, true) => {
            return Err(ExprError::parse(
                text,
                "mixing '&&' and '||' in one expression is not supported",
            ))
        }
        (true, false) => Connective::And,
        (false, true) => Connective::Or,
        (false, false) => return parse_clause(text, kind),
    };

    let operands = text
        .split(connective.token())
        .map(|clause| {
            if clause.trim().is_empty() {
                Err(ExprError::parse(
                    text,
                    format!("empty clause around '{}'", connective.token()),
                ))
            } else {
                parse_clause(clause, kind)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Expr::Connective {
        connective,
        operands,
    })
}

/// Parse a single clause: `[aggregate] comparator threshold [+- tolerance]`.
fn parse_clause(clause: &str, kind: ValueKind) -> Result<Expr, ExprError> {
    let trimmed = clause.trim();
    if trimmed.is_empty() {
        return Err(ExprError::parse(clause, "empty expression"));
    }

    let word_len = trimmed
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (word, rest) = trimmed.split_at(word_len);

    let selector = if word.is_empty() {
        None
    } else {
        match Aggregate::from_name(word) {
            Some(aggregate) => Some(aggregate),
            None => {
                return Err(ExprError::parse(
                    trimmed,
                    format!("unknown aggregate or comparator {word:?}"),
                ))
            }
        }
    };

    match (kind, selector) {
        (ValueKind::NumberSequence, None) => Err(ExprError::parse(
            trimmed,
            "no aggregate specified for a number sequence (use min, max, mean, first or last)",
        )),
        (ValueKind::NumberSequence, Some(selector)) => {
            let comparison = parse_comparison(rest.trim_start(), trimmed, true)?;
            Ok(Expr::Aggregate {
                selector,
                comparison,
            })
        }
        (_, Some(selector)) => Err(ExprError::parse(
            trimmed,
            format!("aggregate '{selector}' applies only to number sequences"),
        )),
        (_, None) => Ok(Expr::Comparison(parse_comparison(trimmed, trimmed, false)?)),
    }
}

/// Parse `comparator threshold [+- tolerance]`. `clause` is used for errors.
fn parse_comparison(
    input: &str,
    clause: &str,
    require_comparator: bool,
) -> Result<Comparison, ExprError> {
    let (comparator, rest) = Comparator::split_prefix(input);
    if comparator.is_none() && require_comparator {
        return Err(ExprError::parse(
            clause,
            "expected a comparator after the aggregate",
        ));
    }
    let comparator = comparator.unwrap_or(Comparator::Equal);

    let (threshold_text, tolerance_text) = match rest.find(TOLERANCE_TOKEN) {
        Some(at) => (&rest[..at], Some(&rest[at + TOLERANCE_TOKEN.len()..])),
        None => (rest, None),
    };

    let threshold = parse_number(threshold_text, clause, "threshold")?;

    let tolerance = match tolerance_text {
        None => None,
        Some(_) if comparator != Comparator::Equal => {
            return Err(ExprError::parse(
                clause,
                "a tolerance is only allowed after '=' or '=='",
            ))
        }
        Some(text) => {
            let tolerance = parse_number(text, clause, "tolerance")?;
            if tolerance < 0.0 {
                return Err(ExprError::parse(clause, "tolerance must not be negative"));
            }
            Some(tolerance)
        }
    };

    Ok(Comparison {
        comparator,
        threshold,
        tolerance,
    })
}

fn parse_number(text: &str, clause: &str, what: &str) -> Result<f64, ExprError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ExprError::parse(clause, format!("missing {what}")));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| ExprError::parse(clause, format!("invalid {what} {text:?}")))?;
    if !value.is_finite() {
        return Err(ExprError::parse(clause, format!("{what} must be finite")));
    }
    Ok(value)
}
