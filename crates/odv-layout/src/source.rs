//! The seam between file readers and the comparator.

use std::path::Path;

use odv_core::ObservedTree;

use crate::error::LayoutError;

/// Something that can turn an input file into an observed tree.
///
/// Implementations must return nodes in a stable order: the comparator
/// reports pattern matches and undescribed nodes in tree order.
pub trait LayoutSource {
    /// Read `path` into an observed tree.
    fn load(&self, path: &Path) -> Result<ObservedTree, LayoutError>;
}
