//! Error types for shape-checked algebra.
//!
//! These errors work in `no_std` environments. They signal contract
//! violations in callers (feeding mismatched shapes into a product), not
//! recoverable runtime conditions, so every variant carries the offending
//! shapes for the panic-free diagnostic path.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors from the core algebra layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreError {
    /// Matrix product attempted with incompatible inner dimensions.
    DimensionMismatch {
        /// Shape of the left operand (rows, cols).
        left: (usize, usize),
        /// Shape of the right operand (rows, cols).
        right: (usize, usize),
    },
    /// A matrix was reinterpreted as a vector but is not a 1×3 row.
    NotARowVector {
        /// Rows of the offending matrix.
        rows: usize,
        /// Columns of the offending matrix.
        cols: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { left, right } => write!(
                f,
                "matrix dimension mismatch: {}x{} * {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Self::NotARowVector { rows, cols } => {
                write!(f, "expected a 1x3 row vector, got {rows}x{cols}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = CoreError::DimensionMismatch {
            left: (3, 3),
            right: (1, 3),
        };
        let msg = err.to_string();
        assert!(msg.contains("3x3"));
        assert!(msg.contains("1x3"));
    }

    #[test]
    fn test_not_a_row_vector_display() {
        let err = CoreError::NotARowVector { rows: 2, cols: 3 };
        assert!(err.to_string().contains("2x3"));
    }
}
