//! Error types for binary-string operations.
//!
//! The checked `try_*` operations on [`BinaryString`](crate::BinaryString)
//! return these errors; their panicking counterparts panic with the same
//! message text.

use thiserror::Error;

/// Precondition violations on binary-string operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HammingError {
    /// Write to a bit position past the string's capacity
    #[error("Index out of bounds: index {index}, capacity {capacity} bits")]
    IndexOutOfBounds {
        /// The bit position that was written
        index: usize,
        /// Capacity in bits (`num_groups * 64`)
        capacity: usize,
    },

    /// Hamming distance requested between strings of different group counts
    #[error("Group count mismatch: left has {left} groups, right has {right}")]
    GroupCountMismatch {
        /// Group count of the left operand
        left: usize,
        /// Group count of the right operand
        right: usize,
    },
}

/// A specialized `Result` type for binary-string operations.
pub type Result<T> = std::result::Result<T, HammingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HammingError::IndexOutOfBounds {
            index: 128,
            capacity: 128,
        };
        assert_eq!(
            err.to_string(),
            "Index out of bounds: index 128, capacity 128 bits"
        );

        let err = HammingError::GroupCountMismatch { left: 2, right: 4 };
        assert_eq!(
            err.to_string(),
            "Group count mismatch: left has 2 groups, right has 4"
        );
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<u64> {
            Ok(42)
        }

        assert_eq!(returns_result(), Ok(42));
    }
}
