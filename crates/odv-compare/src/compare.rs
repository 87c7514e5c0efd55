//! # Comparison Walk
//!
//! One pass over the rule table in order, then one pass over the observed
//! tree for undescribed nodes. Literal rule locations are resolved through a
//! location index; patterned ones scan the tree in extraction order.

use std::collections::HashMap;

use odv_core::{AttributeValue, Location, ObservedNode, ObservedTree, RuleEntry, RuleTable};
use odv_expr::{Evaluator, ExprError, Outcome};

use crate::error::CompareError;
use crate::matcher::LocationMatcher;
use crate::options::CompareOptions;
use crate::report::{ComplianceReport, Violation, ViolationKind};

const SOURCE_ATTRIBUTE: &str = "source";
const WHAT_GROUP: &str = "what";

/// Compare `observed` against `rules`.
///
/// # Errors
///
/// Returns [`CompareError::Constraint`] when a matched rule, mandatory or
/// optional, carries a malformed constraint, and [`CompareError::LocationPattern`] when
/// a rule location contains an invalid segment pattern. Failing rules are
/// reported as violations, never as errors.
pub fn compare(
    observed: &ObservedTree,
    rules: &RuleTable,
    options: &CompareOptions,
) -> Result<ComplianceReport, CompareError> {
    let evaluator = Evaluator::new(options.diagnostics);
    let nodes = observed.nodes();

    let mut index: HashMap<&Location, Vec<usize>> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.entry(&node.location).or_default().push(i);
    }

    let mut described = vec![false; nodes.len()];
    let mut violations = Vec::new();

    for entry in rules {
        let matcher = LocationMatcher::compile(&entry.location)?;
        let hits: Vec<usize> = if matcher.is_literal() {
            index.get(&entry.location).cloned().unwrap_or_default()
        } else {
            nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| matcher.matches(&node.location))
                .map(|(i, _)| i)
                .collect()
        };

        if options.diagnostics.info {
            tracing::info!(
                rule = %entry.location,
                mandatory = entry.mandatory,
                constraint = %entry.constraint_text,
                matches = hits.len(),
                "checking rule"
            );
        }

        if hits.is_empty() {
            if entry.mandatory {
                violations.push(Violation::missing(entry.clone()));
            }
            continue;
        }

        // Optional rules are always evaluated so malformed constraints surface,
        // but their failures only count under `check_optional`.
        let enforced = entry.mandatory || options.check_optional;
        for i in hits {
            described[i] = true;
            let failure = check_node(&evaluator, entry, &nodes[i])?;
            if let Some(kind) = failure.filter(|_| enforced) {
                violations.push(Violation {
                    entry: entry.clone(),
                    kind,
                });
            }
        }
    }

    if options.check_extras {
        for (node, seen) in nodes.iter().zip(&described) {
            if !seen && !node.implied {
                if options.diagnostics.info {
                    tracing::info!(node = %node.location, "node not described by the rule table");
                }
                violations.push(Violation::unexpected(RuleEntry::unexpected(
                    node.location.clone(),
                    rules.version,
                )));
            }
        }
    }

    tracing::debug!(
        rules = rules.len(),
        nodes = nodes.len(),
        violations = violations.len(),
        "comparison finished"
    );

    Ok(ComplianceReport::new(violations, rules.len(), nodes.len()))
}

/// Verdict of [`compare`] without the violation list.
pub fn is_compliant(
    observed: &ObservedTree,
    rules: &RuleTable,
    options: &CompareOptions,
) -> Result<bool, CompareError> {
    compare(observed, rules, options).map(|report| report.is_compliant())
}

/// Check one matched node; `None` means it satisfies the rule.
fn check_node(
    evaluator: &Evaluator,
    entry: &RuleEntry,
    node: &ObservedNode,
) -> Result<Option<ViolationKind>, CompareError> {
    let actual = node.value.as_ref().map(AttributeValue::kind);
    if let Some(expected) = entry.expected_kind {
        let mismatched = match actual {
            Some(kind) => kind != expected,
            None => node.location.is_attribute(),
        };
        if mismatched {
            return Ok(Some(ViolationKind::KindMismatch {
                observed: node.location.clone(),
                expected,
                actual,
            }));
        }
    }

    let Some(value) = &node.value else {
        return Ok(None);
    };
    if entry.is_presence_only() {
        return Ok(None);
    }

    let outcome = evaluate(evaluator, entry, node, value).map_err(|source| {
        CompareError::Constraint {
            location: entry.location.clone(),
            constraint: entry.constraint_text.clone(),
            source,
        }
    })?;

    Ok((!outcome.matched).then(|| ViolationKind::ValueMismatch {
        observed: node.location.clone(),
        explanation: outcome.explanation,
    }))
}

fn evaluate(
    evaluator: &Evaluator,
    entry: &RuleEntry,
    node: &ObservedNode,
    value: &AttributeValue,
) -> Result<Outcome, ExprError> {
    let constraint = entry.constraint_text.trim();
    match value {
        AttributeValue::Text(text) if is_source_identifier(&node.location) => {
            evaluator.evaluate_source_identifier(text, constraint)
        }
        _ => evaluator.evaluate(value, constraint),
    }
}

fn is_source_identifier(location: &Location) -> bool {
    location.attribute_name() == Some(SOURCE_ATTRIBUTE)
        && location.last_segment() == Some(WHAT_GROUP)
}
