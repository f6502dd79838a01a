//! Board module - the game-state machine
//!
//! The board owns the settled grid, the active piece (through the rotator and
//! an `(x, y)` offset), the piece generator, the score and the level
//! counters. Every mutation goes through the operations below; everything
//! read from outside is a copy.
//!
//! A piece's life on the board:
//!
//! 1. [`Board::create_new_brick`] spawns it at (4, 0) and reports game over
//! 2. `move_brick_*` / [`Board::rotate_left_brick`] move it while nothing collides
//! 3. once `move_brick_down` fails, [`Board::merge_brick_to_background`] settles it
//! 4. [`Board::clear_rows`] removes complete rows and advances the level
//!
//! Collisions are ordinary outcomes and come back as `false`; nothing here
//! returns an error once the board exists.

use std::sync::Arc;

use blockfall_types::{
    DANGER_ZONE_ROWS, INITIAL_LEVEL, LINES_PER_LEVEL, PIECE_BOX, SPAWN_X, SPAWN_Y,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::EngineError;
use crate::generator::PieceGenerator;
use crate::matrix::{self, ClearRow, Grid};
use crate::pieces::Piece;
use crate::rotator::PieceRotator;
use crate::score::{Score, ScoreHandle};
use crate::view::{GameStats, ViewData};

#[derive(Debug, Clone)]
pub struct Board<R: Rng = ChaCha8Rng> {
    grid: Grid,
    generator: PieceGenerator<R>,
    rotator: PieceRotator,
    x: i32,
    y: i32,
    score: Score,
    level: u32,
    /// Goes negative on an overshooting clear; the remainder carries over
    lines_until_next_level: i32,
    total_lines_cleared: u32,
}

impl Board<ChaCha8Rng> {
    /// Board with a randomly seeded piece sequence
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        Self::with_rng(rows, cols, ChaCha8Rng::seed_from_u64(rand::rng().random()))
    }

    /// Board whose piece sequence is reproducible from `seed`
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(rows, cols, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Board<R> {
    /// Board drawing pieces from the given random source
    ///
    /// The first piece is already in place at the spawn offset and the next
    /// one is queued.
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Result<Self, EngineError> {
        let grid = Grid::new(rows, cols)?;
        let mut generator = PieceGenerator::with_rng(rng);
        let rotator = PieceRotator::new(generator.get_brick());
        Ok(Self {
            grid,
            generator,
            rotator,
            x: SPAWN_X,
            y: SPAWN_Y,
            score: Score::new(),
            level: INITIAL_LEVEL,
            lines_until_next_level: LINES_PER_LEVEL,
            total_lines_cleared: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Commit the offset if the current shape fits there
    fn attempt_move(&mut self, x: i32, y: i32) -> bool {
        if matrix::intersect(&self.grid, self.rotator.current_shape(), x, y) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    pub fn move_brick_down(&mut self) -> bool {
        self.attempt_move(self.x, self.y + 1)
    }

    pub fn move_brick_left(&mut self) -> bool {
        self.attempt_move(self.x - 1, self.y)
    }

    pub fn move_brick_right(&mut self) -> bool {
        self.attempt_move(self.x + 1, self.y)
    }

    /// Step to the next rotation state in place; no kicks
    pub fn rotate_left_brick(&mut self) -> bool {
        let next = self.rotator.next_shape();
        if matrix::intersect(&self.grid, next.shape, self.x, self.y) {
            return false;
        }
        let index = next.index;
        self.rotator.set_current_shape(index).is_ok()
    }

    /// Bring the queued piece into play at the spawn offset
    ///
    /// Returns `true` when the game is over: either the new piece collides
    /// where it spawns, or settled blocks already reach into the danger zone.
    /// The danger-zone check is skipped while the board is still empty.
    pub fn create_new_brick(&mut self) -> bool {
        self.spawn();
        self.check_game_over()
    }

    fn spawn(&mut self) {
        let piece = self.generator.get_brick();
        self.rotator.set_brick(piece);
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
    }

    fn check_game_over(&self) -> bool {
        if matrix::intersect(&self.grid, self.rotator.current_shape(), self.x, self.y) {
            return true;
        }
        !self.is_empty() && self.is_danger_zone_breached()
    }

    /// Any settled cell inside the hidden top rows
    pub fn is_danger_zone_breached(&self) -> bool {
        (0..DANGER_ZONE_ROWS).any(|row| self.grid.is_row_occupied(row))
    }

    /// No settled cells at all
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Write the active piece into the grid where it stands
    ///
    /// Call once per landed piece, after `move_brick_down` has failed.
    pub fn merge_brick_to_background(&mut self) {
        self.grid = matrix::merge(&self.grid, self.rotator.current_shape(), self.x, self.y);
    }

    /// Remove complete rows and advance the level counters
    pub fn clear_rows(&mut self) -> ClearRow {
        let result = matrix::check_removing(&self.grid, self.level);
        self.grid = result.grid().clone();
        if result.lines_removed() > 0 {
            self.update_level_progress(result.lines_removed());
        }
        result
    }

    fn update_level_progress(&mut self, lines: usize) {
        let lines = lines as u32;
        self.total_lines_cleared = self.total_lines_cleared.saturating_add(lines);
        self.lines_until_next_level -= lines as i32;
        if self.lines_until_next_level <= 0 {
            self.level += 1;
            self.lines_until_next_level += LINES_PER_LEVEL;
        }
    }

    /// Row the active piece would come to rest on
    pub fn ghost_y(&self) -> i32 {
        let shape = self.rotator.current_shape();
        let mut ghost = self.y;
        while ghost < self.grid.rows() as i32
            && !matrix::intersect(&self.grid, shape, self.x, ghost + 1)
        {
            ghost += 1;
        }
        ghost
    }

    pub fn view_data(&self) -> ViewData {
        let next_brick = match self.generator.next_brick() {
            Some(piece) => piece.spawn_shape().clone(),
            None => Grid::from_mask(&[[0; PIECE_BOX]; PIECE_BOX], 0),
        };
        ViewData {
            brick: self.rotator.current_shape().clone(),
            x: self.x,
            y: self.y,
            next_brick,
            ghost_y: self.ghost_y(),
        }
    }

    /// Read-only borrow of the settled grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the settled grid
    pub fn grid_snapshot(&self) -> Grid {
        matrix::copy(&self.grid)
    }

    /// Replace the settled grid with a pre-built one of the same size
    pub fn replace_grid(&mut self, grid: Grid) -> Result<(), EngineError> {
        if grid.rows() != self.grid.rows() || grid.cols() != self.grid.cols() {
            return Err(EngineError::DimensionMismatch {
                rows: self.grid.rows(),
                cols: self.grid.cols(),
                found_rows: grid.rows(),
                found_cols: grid.cols(),
            });
        }
        self.grid = grid;
        Ok(())
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Append-only access to the score
    pub fn score_mut(&mut self) -> ScoreHandle<'_> {
        ScoreHandle::new(&mut self.score)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_until_next_level(&self) -> i32 {
        self.lines_until_next_level
    }

    pub fn total_lines_cleared(&self) -> u32 {
        self.total_lines_cleared
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            score: self.score.value(),
            level: self.level,
            lines_until_next_level: self.lines_until_next_level,
            total_lines_cleared: self.total_lines_cleared,
        }
    }

    /// Offset of the active piece as (x, y)
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn current_piece(&self) -> &Arc<Piece> {
        self.rotator.piece()
    }

    pub fn current_rotation(&self) -> usize {
        self.rotator.current_index()
    }

    pub fn next_piece(&self) -> Option<&Arc<Piece>> {
        self.generator.next_brick()
    }

    /// Start over on the same board: empty grid, zero score, level 1 and a
    /// fresh current/next pair
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.level = INITIAL_LEVEL;
        self.lines_until_next_level = LINES_PER_LEVEL;
        self.total_lines_cleared = 0;
        self.generator.reset();
        self.spawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::{PieceKind, BOARD_COLS, BOARD_ROWS};

    fn board() -> Board {
        Board::with_seed(BOARD_ROWS, BOARD_COLS, 12345).unwrap()
    }

    fn single_cell(code: u8) -> Arc<Piece> {
        let kind = PieceKind::from_code(code).unwrap();
        let shape = Grid::from_rows(&[[code]]).unwrap();
        Arc::new(Piece::new(kind, vec![shape]).unwrap())
    }

    #[test]
    fn test_new_board_state() {
        let board = board();
        assert!(board.is_empty());
        assert_eq!(board.position(), (SPAWN_X, SPAWN_Y));
        assert_eq!(board.level(), 1);
        assert_eq!(board.lines_until_next_level(), 10);
        assert_eq!(board.total_lines_cleared(), 0);
        assert_eq!(board.score().value(), 0);
        assert!(board.next_piece().is_some());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(Board::with_seed(0, 10, 1).is_err());
        assert!(Board::with_seed(25, 0, 1).is_err());
    }

    #[test]
    fn test_first_spawn_is_not_game_over() {
        let mut board = board();
        assert!(!board.create_new_brick());
    }

    #[test]
    fn test_failed_move_keeps_position() {
        let mut board = board();
        while board.move_brick_left() {}
        let (x, y) = board.position();
        assert!(!board.move_brick_left());
        assert_eq!(board.position(), (x, y));
    }

    #[test]
    fn test_single_cell_clears_bottom_row() {
        let mut board = board();
        for col in 0..BOARD_COLS as i32 {
            if col != 5 {
                board.grid.set(24, col, 1);
            }
        }
        board.rotator.set_brick(single_cell(3));
        board.x = 5;
        board.y = 23;
        assert!(board.move_brick_down());
        assert!(!board.move_brick_down());
        board.merge_brick_to_background();
        assert_eq!(board.grid.get(24, 5), Some(3));

        let result = board.clear_rows();
        assert_eq!(result.lines_removed(), 1);
        assert_eq!(result.score_bonus(), 100 * board.level() as i64);
        assert!(!board.grid.is_row_occupied(24));
        assert_eq!(board.total_lines_cleared(), 1);
        assert_eq!(board.lines_until_next_level(), 9);
    }

    #[test]
    fn test_single_state_piece_rotates_onto_itself() {
        let mut board = board();
        board.rotator.set_brick(single_cell(2));
        assert!(board.rotate_left_brick());
        assert_eq!(board.current_rotation(), 0);
    }

    #[test]
    fn test_level_progress_carries_remainder() {
        let mut board = board();
        board.update_level_progress(4);
        board.update_level_progress(4);
        assert_eq!(board.level(), 1);
        assert_eq!(board.lines_until_next_level(), 2);

        board.update_level_progress(4);
        assert_eq!(board.level(), 2);
        assert_eq!(board.lines_until_next_level(), 8);
        assert_eq!(board.total_lines_cleared(), 12);
    }

    #[test]
    fn test_ghost_on_blocked_spawn_stays_put() {
        let mut board = board();
        let mut full = Grid::new(BOARD_ROWS, BOARD_COLS).unwrap();
        for row in 0..BOARD_ROWS as i32 {
            for col in 0..BOARD_COLS as i32 {
                full.set(row, col, 7);
            }
        }
        board.replace_grid(full).unwrap();
        assert_eq!(board.ghost_y(), SPAWN_Y);
    }

    #[test]
    fn test_replace_grid_dimension_mismatch() {
        let mut board = board();
        let small = Grid::new(5, 5).unwrap();
        assert_eq!(
            board.replace_grid(small),
            Err(EngineError::DimensionMismatch {
                rows: 25,
                cols: 10,
                found_rows: 5,
                found_cols: 5,
            })
        );
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut board = board();
        board.score_mut().add(500);
        board.grid.set(20, 0, 4);
        board.update_level_progress(11);
        board.move_brick_down();

        board.new_game();
        assert!(board.is_empty());
        assert_eq!(board.score().value(), 0);
        assert_eq!(board.level(), 1);
        assert_eq!(board.lines_until_next_level(), 10);
        assert_eq!(board.total_lines_cleared(), 0);
        assert_eq!(board.position(), (SPAWN_X, SPAWN_Y));
        assert_eq!(board.current_rotation(), 0);
        assert!(board.next_piece().is_some());
    }
}
