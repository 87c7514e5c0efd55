//! Comparison policy flags.

use odv_core::Diagnostics;
use serde::{Deserialize, Serialize};

/// How strictly a comparison treats optional rules and undescribed nodes.
///
/// The default enforces mandatory rules only, with informational
/// diagnostics enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Report failing constraints of optional rules.
    #[serde(default)]
    pub check_optional: bool,
    /// Report observed nodes that no rule describes.
    #[serde(default)]
    pub check_extras: bool,
    /// Informational logging toggle.
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl CompareOptions {
    /// Enforce optional rules and report extras.
    pub fn strict() -> Self {
        Self {
            check_optional: true,
            check_extras: true,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Set `check_optional`.
    pub fn with_check_optional(mut self, check: bool) -> Self {
        self.check_optional = check;
        self
    }

    /// Set `check_extras`.
    pub fn with_check_extras(mut self, check: bool) -> Self {
        self.check_extras = check;
        self
    }

    /// Set the diagnostics toggle.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
