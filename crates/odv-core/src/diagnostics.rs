//! Informational diagnostics toggle.

use serde::{Deserialize, Serialize};

/// Controls whether non-error informational events are emitted while
/// evaluating rules (for example, which rule is being checked).
///
/// Has no effect on verdicts. Passed by value so concurrent comparisons
/// never share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Emit informational events. Enabled by default.
    pub info: bool,
}

impl Diagnostics {
    /// Diagnostics with informational events enabled.
    pub const fn verbose() -> Self {
        Self { info: true }
    }

    /// Diagnostics with informational events suppressed.
    pub const fn quiet() -> Self {
        Self { info: false }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::verbose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_verbose() {
        assert!(Diagnostics::default().info);
        assert!(!Diagnostics::quiet().info);
    }
}
