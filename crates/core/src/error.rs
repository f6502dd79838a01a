//! Errors for construction-time misuse.
//!
//! Collisions and game over are ordinary outcomes and are reported as `bool`;
//! the variants here only fire when a caller hands the engine something that
//! can never be valid.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("piece must define at least one rotation state")]
    NoRotations,
    #[error("piece defines {found} rotation states, at most {max} are supported")]
    TooManyRotations { found: usize, max: usize },
    #[error("rotation state {index} has no filled cells")]
    EmptyRotation { index: usize },
    #[error("rotation index {index} is out of range for a piece with {len} states")]
    RotationOutOfRange { index: usize, len: usize },
    #[error("grid is {found_rows}x{found_cols}, board is {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}

impl EngineError {
    pub fn code(self) -> &'static str {
        match self {
            EngineError::ZeroDimension { .. }
            | EngineError::RaggedRows { .. }
            | EngineError::DimensionMismatch { .. } => "invalid_grid",
            EngineError::NoRotations
            | EngineError::TooManyRotations { .. }
            | EngineError::EmptyRotation { .. } => "invalid_piece",
            EngineError::RotationOutOfRange { .. } => "invalid_rotation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EngineError::NoRotations.code(), "invalid_piece");
        assert_eq!(
            EngineError::ZeroDimension { rows: 0, cols: 3 }.code(),
            "invalid_grid"
        );
        assert_eq!(
            EngineError::RotationOutOfRange { index: 4, len: 4 }.code(),
            "invalid_rotation"
        );
    }

    #[test]
    fn test_error_message_names_the_offending_row() {
        let err = EngineError::RaggedRows {
            row: 2,
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "row 2 has 3 cells, expected 4");
    }
}
