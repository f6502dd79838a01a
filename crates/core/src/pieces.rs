//! Pieces module - tetromino definitions and their rotation tables
//!
//! Each piece is an ordered list of precomputed rotation states. Nothing is
//! rotated at runtime: the rotator just steps through the list.
//!
//! The standard tables are 4x4 masks, one inner array per row, listed in
//! counter-clockwise order starting from the spawn orientation
//! (spawn, left, 180, right). Filled cells carry the piece's colour code.

use arrayvec::ArrayVec;
use blockfall_types::{PieceKind, MAX_ROTATIONS, PIECE_BOX};

use crate::error::EngineError;
use crate::matrix::Grid;

/// One rotation state as a 0/1 mask
type Mask = [[u8; PIECE_BOX]; PIECE_BOX];

/// Immutable piece definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotations: ArrayVec<Grid, MAX_ROTATIONS>,
}

impl Piece {
    /// Build a piece from caller-supplied rotation states
    ///
    /// Fails on an empty list, more than [`MAX_ROTATIONS`] states, or a state
    /// with no filled cells.
    pub fn new(kind: PieceKind, rotations: Vec<Grid>) -> Result<Self, EngineError> {
        if rotations.is_empty() {
            return Err(EngineError::NoRotations);
        }
        if rotations.len() > MAX_ROTATIONS {
            return Err(EngineError::TooManyRotations {
                found: rotations.len(),
                max: MAX_ROTATIONS,
            });
        }
        if let Some(index) = rotations.iter().position(Grid::is_empty) {
            return Err(EngineError::EmptyRotation { index });
        }
        Ok(Self {
            kind,
            rotations: rotations.into_iter().collect(),
        })
    }

    /// One of the seven standard tetrominoes
    pub fn standard(kind: PieceKind) -> Self {
        let code = kind.code();
        Self {
            kind,
            rotations: masks(kind)
                .iter()
                .map(|mask| Grid::from_mask(mask, code))
                .collect(),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Number of rotation states
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// All rotation states in order
    pub fn shapes(&self) -> &[Grid] {
        &self.rotations
    }

    /// Rotation state at `index`
    pub fn shape(&self, index: usize) -> Option<&Grid> {
        self.rotations.get(index)
    }

    /// Spawn orientation
    pub fn spawn_shape(&self) -> &Grid {
        &self.rotations[0]
    }
}

/// The seven standard pieces in generator pool order
pub fn standard_pieces() -> Vec<Piece> {
    PieceKind::ALL.iter().map(|&k| Piece::standard(k)).collect()
}

fn masks(kind: PieceKind) -> &'static [Mask; 4] {
    match kind {
        PieceKind::I => &I_MASKS,
        PieceKind::J => &J_MASKS,
        PieceKind::L => &L_MASKS,
        PieceKind::O => &O_MASKS,
        PieceKind::S => &S_MASKS,
        PieceKind::T => &T_MASKS,
        PieceKind::Z => &Z_MASKS,
    }
}

const I_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
];

const J_MASKS: [Mask; 4] = [
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const L_MASKS: [Mask; 4] = [
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
];

// O looks the same in every orientation but still carries four states so the
// rotator treats it like any other piece.
const O_MASKS: [Mask; 4] = [
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

const S_MASKS: [Mask; 4] = [
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
];

const T_MASKS: [Mask; 4] = [
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const Z_MASKS: [Mask; 4] = [
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_state_has_four_cells() {
        for piece in standard_pieces() {
            assert_eq!(piece.rotation_count(), 4);
            for (i, shape) in piece.shapes().iter().enumerate() {
                assert_eq!(shape.rows(), PIECE_BOX);
                assert_eq!(shape.cols(), PIECE_BOX);
                assert_eq!(
                    shape.count_filled(),
                    4,
                    "{:?} state {} should have 4 minos",
                    piece.kind(),
                    i
                );
            }
        }
    }

    #[test]
    fn test_standard_cells_use_piece_code() {
        for piece in standard_pieces() {
            let code = piece.kind().code();
            for shape in piece.shapes() {
                assert!(shape.filled_cells().all(|(_, _, c)| c == code));
            }
        }
    }

    #[test]
    fn test_i_spawn_is_horizontal_on_row_one() {
        let piece = Piece::standard(PieceKind::I);
        let cells: Vec<_> = piece
            .spawn_shape()
            .filled_cells()
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(cells, vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_rotation_states_are_distinct_except_o() {
        for piece in standard_pieces() {
            let shapes = piece.shapes();
            if piece.kind() == PieceKind::O {
                assert!(shapes.iter().all(|s| s == &shapes[0]));
            } else {
                assert_ne!(shapes[0], shapes[1]);
                assert_ne!(shapes[1], shapes[2]);
            }
        }
    }

    #[test]
    fn test_new_validates_rotations() {
        assert_eq!(
            Piece::new(PieceKind::T, vec![]),
            Err(EngineError::NoRotations)
        );

        let one = Grid::from_rows(&[[3u8]]).unwrap();
        let five = vec![one.clone(); 5];
        assert_eq!(
            Piece::new(PieceKind::L, five),
            Err(EngineError::TooManyRotations { found: 5, max: 4 })
        );

        let blank = Grid::new(2, 2).unwrap();
        assert_eq!(
            Piece::new(PieceKind::L, vec![one.clone(), blank]),
            Err(EngineError::EmptyRotation { index: 1 })
        );

        let single = Piece::new(PieceKind::L, vec![one]).unwrap();
        assert_eq!(single.rotation_count(), 1);
    }
}
