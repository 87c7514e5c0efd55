//! # Compliance Reports
//!
//! The verdict of one comparison and the violations behind it, in the order
//! they were found: rule-table order first, then undescribed nodes in
//! observed order.

use std::fmt;

use serde::Serialize;

use odv_core::{Location, RuleEntry, ValueKind};

/// Why a rule entry was reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A mandatory node is absent.
    Missing,
    /// The observed value does not satisfy the rule's constraint.
    ValueMismatch {
        /// The observed node that failed.
        observed: Location,
        /// Explanation from the expression engine.
        explanation: String,
    },
    /// The observed value has a different kind than the rule declares.
    KindMismatch {
        /// The observed node that failed.
        observed: Location,
        /// The kind the rule declares.
        expected: ValueKind,
        /// The kind that was found, `None` for a group or dataset.
        actual: Option<ValueKind>,
    },
    /// The node is present but no rule describes it.
    Unexpected,
}

/// A failed rule entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The rule that failed, or a synthetic entry for an unexpected node.
    pub entry: RuleEntry,
    /// What went wrong.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// A missing mandatory node.
    pub fn missing(entry: RuleEntry) -> Self {
        Self {
            entry,
            kind: ViolationKind::Missing,
        }
    }

    /// An undescribed node, reported through a synthetic entry.
    pub fn unexpected(entry: RuleEntry) -> Self {
        Self {
            entry,
            kind: ViolationKind::Unexpected,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.entry.mandatory {
            "mandatory"
        } else {
            "optional"
        };
        match &self.kind {
            ViolationKind::Missing => {
                write!(f, "{}: {status} entry is missing", self.entry.location)
            }
            ViolationKind::ValueMismatch {
                observed,
                explanation,
            } => write!(
                f,
                "{observed}: {status} entry does not satisfy {:?}: {explanation}",
                self.entry.constraint_text
            ),
            ViolationKind::KindMismatch {
                observed,
                expected,
                actual,
            } => {
                let actual = actual.map_or("group or dataset", |k| k.as_str());
                write!(
                    f,
                    "{observed}: {status} entry should be a {expected} value, found {actual}"
                )
            }
            ViolationKind::Unexpected => write!(
                f,
                "{}: present but not described by the standard",
                self.entry.location
            ),
        }
    }
}

/// Verdict and violations of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    compliant: bool,
    rules_checked: usize,
    nodes_observed: usize,
    violations: Vec<Violation>,
}

impl ComplianceReport {
    /// Build a report; the verdict follows from `violations`.
    pub fn new(violations: Vec<Violation>, rules_checked: usize, nodes_observed: usize) -> Self {
        Self {
            compliant: violations.is_empty(),
            rules_checked,
            nodes_observed,
            violations,
        }
    }

    /// True iff there are no violations.
    pub fn is_compliant(&self) -> bool {
        self.compliant
    }

    /// Violations in discovery order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The failed rule entries in discovery order.
    pub fn failed_entries(&self) -> impl Iterator<Item = &RuleEntry> {
        self.violations.iter().map(|v| &v.entry)
    }

    /// Number of rules evaluated.
    pub fn rules_checked(&self) -> usize {
        self.rules_checked
    }

    /// Number of observed nodes considered.
    pub fn nodes_observed(&self) -> usize {
        self.nodes_observed
    }

    /// Consume the report and return its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
