//! Motion preference capability flag.

/// Whether decorative animation is allowed.
///
/// Injected from configuration rather than queried from the environment, so
/// presentation logic stays testable without a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    /// Animations run normally.
    #[default]
    Full,
    /// Shimmer and cross-fades are skipped.
    Reduced,
}

impl MotionPreference {
    /// Returns true if animation should be suppressed.
    #[must_use]
    pub const fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }

    /// Builds a preference from a "reduce motion" flag.
    #[must_use]
    pub const fn from_reduce_flag(reduce: bool) -> Self {
        if reduce { Self::Reduced } else { Self::Full }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reduce_flag() {
        assert_eq!(MotionPreference::from_reduce_flag(true), MotionPreference::Reduced);
        assert_eq!(MotionPreference::from_reduce_flag(false), MotionPreference::Full);
        assert!(MotionPreference::Reduced.is_reduced());
        assert!(!MotionPreference::default().is_reduced());
    }
}
