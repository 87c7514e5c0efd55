//! # odv-layout — Observed Layouts
//!
//! Produces the [`ObservedTree`](odv_core::ObservedTree) of an input file.
//! Reading HDF5 itself sits behind the [`LayoutSource`] trait; this crate
//! ships [`SnapshotSource`], which reads a layout dump in JSON or YAML.
//!
//! ## Snapshot Format
//!
//! A single mapping, read in document order:
//!
//! ```yaml
//! /#Conventions: ODIM_H5/V2_1
//! /what: null                   # group
//! /what/object: PVOL            # attribute, last segment is the name
//! /what#source: WMO:11812,NOD:skjav
//! /dataset1/where/elangle: 0.5
//! /how/elangles: [0.5, 1.5, 2.5]
//! ```
//!
//! | Value | Node |
//! |-------|------|
//! | `null` | group or dataset |
//! | string | `Text` attribute |
//! | number | `Number` attribute |
//! | array of numbers | `NumberSequence` attribute |
//!
//! Groups an attribute lives in are added to the tree ahead of it when the
//! snapshot does not list them, so structural rules see the same groups an
//! HDF5 file would expose. Such groups are marked
//! [`implied`](odv_core::ObservedNode::implied) and are never reported as
//! undescribed nodes; listing a group explicitly clears the mark.

pub mod error;
pub mod snapshot;
pub mod source;

pub use error::LayoutError;
pub use snapshot::{SnapshotFormat, SnapshotSource};
pub use source::LayoutSource;
