//! Error types for the checked boundary layer.
//!
//! The kernels themselves never fail. These errors are only produced by
//! [`crate::checked`] and the fallible generator constructors, which validate
//! the preconditions the hot paths leave to the caller.

use thiserror::Error;

/// Precondition violations detected at the checked boundary.
///
/// # Variants
/// - `LengthMismatch`: Parallel buffers of different lengths
/// - `DegenerateLane`: A generator lane whose two state words are both zero
/// - `UnsortedInput`: A CDF table that is not ascending
/// - `EmptyInput`: An operation that needs at least one element got none
///
/// # Examples
/// ```
/// use statistics_kernel::KernelError;
///
/// let err = KernelError::DegenerateLane { lane: 2 };
/// assert_eq!(format!("{}", err), "Degenerate generator lane 2: both state words are zero");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KernelError {
    /// A parameter buffer does not match the output buffer length.
    #[error("Length mismatch for '{name}': expected {expected}, got {actual}")]
    LengthMismatch {
        /// Name of the offending buffer
        name: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// A lane would emit zeros forever.
    #[error("Degenerate generator lane {lane}: both state words are zero")]
    DegenerateLane {
        /// Index of the all-zero lane (0..4)
        lane: usize,
    },

    /// Table is not sorted ascending.
    #[error("Input not sorted ascending at index {index}")]
    UnsortedInput {
        /// First index whose element is smaller than its predecessor
        index: usize,
    },

    /// Empty input where at least one element is required.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = KernelError::LengthMismatch {
            name: "num_trials",
            expected: 16,
            actual: 15,
        };
        assert_eq!(
            format!("{}", err),
            "Length mismatch for 'num_trials': expected 16, got 15"
        );
    }

    #[test]
    fn test_unsorted_display() {
        let err = KernelError::UnsortedInput { index: 3 };
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn test_empty_display() {
        let err = KernelError::EmptyInput("cdf");
        assert_eq!(err.to_string(), "Empty input: cdf");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = KernelError::DegenerateLane { lane: 0 };
        let _: &dyn std::error::Error = &err;
        assert_eq!(err.clone(), err);
    }
}
