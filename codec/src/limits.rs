//! Limits for struct decoding.

/// Bounds enforced while unpacking untrusted bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of elements in one list or repeated body.
    pub max_list_elements: usize,
    /// Maximum nesting of structs, lists and bodies.
    pub max_depth: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_list_elements: 8192,
            max_depth: 16,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_list_elements: 64,
            max_depth: 6,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_list_elements: usize::MAX,
            max_depth: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = CodecLimits::default();
        assert!(limits.max_list_elements >= 1024);
        assert!(limits.max_depth >= 4);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();
        assert!(test_limits.max_list_elements < default_limits.max_list_elements);
        assert!(test_limits.max_depth < default_limits.max_depth);
    }

    #[test]
    fn unlimited_is_max() {
        let limits = CodecLimits::unlimited();
        assert_eq!(limits.max_list_elements, usize::MAX);
        assert_eq!(limits.max_depth, usize::MAX);
    }
}
