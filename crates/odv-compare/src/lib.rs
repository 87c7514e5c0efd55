//! # odv-compare — Hierarchical Compliance Comparator
//!
//! Walks an [`ObservedTree`](odv_core::ObservedTree) against a
//! [`RuleTable`](odv_core::RuleTable) and produces a [`ComplianceReport`].
//!
//! ## Policy
//!
//! | Rule | Observed | Result |
//! |------|----------|--------|
//! | mandatory | absent | `Missing` violation |
//! | optional | absent | nothing |
//! | mandatory | present, constraint fails | violation |
//! | optional | present, constraint fails | violation only with `check_optional` |
//! | — | present, no rule | `Unexpected` violation only with `check_extras` |
//!
//! ## Architecture
//!
//! ```text
//! odv-standard (RuleTable)  ─┐
//!                            ├─▶  odv-compare::compare  ─▶  ComplianceReport
//! odv-layout (ObservedTree) ─┘          │
//!                                       ▼
//!                              odv-expr::Evaluator
//! ```
//!
//! A malformed constraint in the table is a defect of the standard, not of the
//! file: it aborts the comparison with [`CompareError`] instead of becoming a
//! violation.

pub mod compare;
pub mod error;
pub mod matcher;
pub mod options;
pub mod report;

pub use compare::{compare, is_compliant};
pub use error::CompareError;
pub use matcher::LocationMatcher;
pub use options::CompareOptions;
pub use report::{ComplianceReport, Violation, ViolationKind};
