//! # odv-core — Foundational Types for the ODIM_H5 Validator
//!
//! This crate defines the data model shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged attribute values.** An observed attribute is exactly one of
//!    `Text`, `Number`, or `NumberSequence`. Consumers dispatch on the variant
//!    instead of guessing the meaning of a raw string.
//!
//! 2. **Structural locations.** `Location` stores group/dataset segments and
//!    an optional attribute name. Two locations compare equal when their
//!    segments do, regardless of how the source text spelled the path
//!    (`//what/`, `/what`, `/what#source`).
//!
//! 3. **Immutable inputs.** `RuleTable` and `ObservedTree` are built once by
//!    their loaders and only read afterwards.
//!
//! 4. **Explicit diagnostics.** The informational-logging toggle is a
//!    `Diagnostics` value passed by the caller, never process-global state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `odv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostics;
pub mod error;
pub mod location;
pub mod observed;
pub mod rule;
pub mod value;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use diagnostics::Diagnostics;
pub use error::{LocationError, VersionError};
pub use location::Location;
pub use observed::{ObservedNode, ObservedTree};
pub use rule::{RuleEntry, RuleTable};
pub use value::{AttributeValue, ValueKind};
pub use version::StandardVersion;
