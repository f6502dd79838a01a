//! Rotator module - tracks which rotation state of the active piece is in use
//!
//! Rotation is a plain step to the next state in the piece's table, wrapping
//! at the table length. There are no wall kicks: the board asks for the next
//! state, tests it in place, and only then commits it.

use std::sync::Arc;

use crate::error::EngineError;
use crate::matrix::Grid;
use crate::pieces::Piece;

/// Candidate rotation returned by [`PieceRotator::next_shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextShape<'a> {
    pub shape: &'a Grid,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct PieceRotator {
    piece: Arc<Piece>,
    current: usize,
}

impl PieceRotator {
    pub fn new(piece: Arc<Piece>) -> Self {
        Self { piece, current: 0 }
    }

    /// Replace the managed piece and go back to its spawn state
    pub fn set_brick(&mut self, piece: Arc<Piece>) {
        self.piece = piece;
        self.current = 0;
    }

    pub fn piece(&self) -> &Arc<Piece> {
        &self.piece
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_shape(&self) -> &Grid {
        &self.piece.shapes()[self.current]
    }

    /// The state one step on, without committing to it
    pub fn next_shape(&self) -> NextShape<'_> {
        let index = (self.current + 1) % self.piece.rotation_count();
        NextShape {
            shape: &self.piece.shapes()[index],
            index,
        }
    }

    /// Commit a rotation index
    pub fn set_current_shape(&mut self, index: usize) -> Result<(), EngineError> {
        let len = self.piece.rotation_count();
        if index >= len {
            return Err(EngineError::RotationOutOfRange { index, len });
        }
        self.current = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::PieceKind;

    fn rotator(kind: PieceKind) -> PieceRotator {
        PieceRotator::new(Arc::new(Piece::standard(kind)))
    }

    #[test]
    fn test_starts_at_spawn_state() {
        let r = rotator(PieceKind::T);
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.current_shape(), r.piece().spawn_shape());
    }

    #[test]
    fn test_next_shape_does_not_mutate() {
        let r = rotator(PieceKind::J);
        let next = r.next_shape();
        assert_eq!(next.index, 1);
        assert_eq!(next.shape, r.piece().shape(1).unwrap());
        assert_eq!(r.current_index(), 0);
    }

    #[test]
    fn test_next_shape_wraps() {
        let mut r = rotator(PieceKind::S);
        r.set_current_shape(3).unwrap();
        assert_eq!(r.next_shape().index, 0);
    }

    #[test]
    fn test_wraps_at_piece_table_length() {
        let a = Grid::from_rows(&[[5u8, 5]]).unwrap();
        let b = Grid::from_rows(&[[5u8], [5]]).unwrap();
        let piece = Piece::new(PieceKind::S, vec![a, b]).unwrap();
        let mut r = PieceRotator::new(Arc::new(piece));

        let next = r.next_shape();
        assert_eq!(next.index, 1);
        r.set_current_shape(next.index).unwrap();
        assert_eq!(r.next_shape().index, 0);
    }

    #[test]
    fn test_set_current_shape_out_of_range() {
        let mut r = rotator(PieceKind::L);
        assert_eq!(
            r.set_current_shape(4),
            Err(EngineError::RotationOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(r.current_index(), 0);
    }

    #[test]
    fn test_set_brick_resets_index() {
        let mut r = rotator(PieceKind::Z);
        r.set_current_shape(2).unwrap();
        r.set_brick(Arc::new(Piece::standard(PieceKind::I)));
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.piece().kind(), PieceKind::I);
    }
}
