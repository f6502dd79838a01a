//! Snapshot types handed to the presentation layer.
//!
//! Both are plain owned values: they never alias board state, so a caller can
//! keep one around while the board moves on, but it goes stale the moment the
//! board changes. Take a fresh one after every operation.

use crate::matrix::Grid;

/// What the renderer needs to draw the falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ViewData {
    /// Current rotation state of the active piece
    pub brick: Grid,
    /// Column of the piece's bounding box
    pub x: i32,
    /// Row of the piece's bounding box
    pub y: i32,
    /// Spawn orientation of the upcoming piece
    pub next_brick: Grid,
    /// Row the piece would land on if dropped now
    pub ghost_y: i32,
}

/// Score and progression counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameStats {
    pub score: i64,
    pub level: u32,
    pub lines_until_next_level: i32,
    pub total_lines_cleared: u32,
}
