//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the board lives here: the grid
//! operations, the piece tables, rotation, the random piece supply, scoring
//! and the [`Board`] state machine tying them together. There is no I/O and
//! no timing; a host drives the board and draws what it reports.
//!
//! # Module Structure
//!
//! - [`matrix`]: collision, merge, copy and row clearing on plain grids
//! - [`pieces`]: the seven tetrominoes as precomputed rotation tables
//! - [`rotator`]: which rotation state of the active piece is current
//! - [`generator`]: seeded random piece queue with a one-piece preview
//! - [`score`]: the running score and the point tables
//! - [`board`]: the game-state machine
//! - [`view`]: owned snapshots for the presentation layer
//!
//! # Rules
//!
//! - Pieces spawn with their bounding box at column 4, row 0
//! - Rotation steps to the next state in place; no wall kicks
//! - Line clears score `[0, 100, 300, 500, 800][n] * level`
//! - Every 10 cleared lines raise the level by one
//! - The top two rows are a danger zone: a spawn with settled blocks up there ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::Board;
//! use blockfall_core::types::{BOARD_COLS, BOARD_ROWS};
//!
//! let mut board = Board::with_seed(BOARD_ROWS, BOARD_COLS, 12345).unwrap();
//!
//! while board.move_brick_down() {}
//! board.merge_brick_to_background();
//! let cleared = board.clear_rows();
//! assert_eq!(cleared.lines_removed(), 0);
//!
//! let game_over = board.create_new_brick();
//! assert!(!game_over);
//! ```

pub mod board;
pub mod error;
pub mod generator;
pub mod matrix;
pub mod pieces;
pub mod rotator;
pub mod score;
pub mod view;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::EngineError;
pub use generator::PieceGenerator;
pub use matrix::{check_removing, copy, intersect, merge, ClearRow, Grid};
pub use pieces::{standard_pieces, Piece};
pub use rotator::{NextShape, PieceRotator};
pub use score::{drop_points, line_clear_bonus, Score, ScoreHandle};
pub use view::{GameStats, ViewData};
