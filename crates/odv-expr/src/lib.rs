//! # odv-expr — Constraint Expression Engine
//!
//! Parses the constraint column of an ODIM_H5 standard table into a typed
//! expression tree and evaluates it against observed attribute values.
//!
//! ## Grammar
//!
//! ```text
//! expression := clause ( connective clause )*
//! connective := "&&" | "||"            one kind per expression
//! clause     := [aggregate] comparator threshold [tolerance]
//!             | pattern                  text values only
//! aggregate  := "min" | "max" | "mean" | "first" | "last"
//! comparator := "==" | "=" | ">=" | "<=" | ">" | "<" | ""   ("" means "==")
//! tolerance  := "+-" number              equality only
//! pattern    := regular expression matched against the whole text
//! ```
//!
//! The value's shape selects the interpretation: text values treat the whole
//! constraint as an anchored pattern, scalars evaluate clause chains, and
//! sequences require every clause to reduce the sequence with an aggregate.
//!
//! ## Examples
//!
//! | Constraint | Meaning |
//! |------------|---------|
//! | `H5rad 2.1` | text equals `H5rad 2.1` |
//! | `=1.254+-0.002` | within 0.002 of 1.254 |
//! | `>1.254&&<1.256` | inside the open interval |
//! | `<1.254\|\|>1.256` | outside the closed interval |
//! | `min>=0&&max<=90` | every element of the sequence in range |
//!
//! ## Crate Policy
//!
//! - Evaluation is a pure function of (value, constraint); nothing is cached
//!   between calls.
//! - Malformed constraints are errors, never silent non-matches.

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod source;

pub use ast::{Aggregate, Comparator, Comparison, Connective, Constraint, Expr};
pub use error::ExprError;
pub use eval::{evaluate, evaluate_source_identifier, Evaluator, Outcome};
pub use source::normalize_source_identifier;
