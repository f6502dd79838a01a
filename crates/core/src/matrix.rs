//! Matrix module - the playfield grid and the pure operations over it
//!
//! A [`Grid`] is a rows x cols block of cell codes stored flat in row-major
//! order (`row * cols + col`) for cache locality. Piece rotation states are
//! small grids too, so every operation here takes a *shape* and places it on
//! a *grid* at an `(x, y)` offset.
//!
//! # Coordinate convention
//!
//! - `x` is a column offset, `y` is a row offset; row 0 is the top.
//! - Shape cell `(r, c)` lands on grid cell `(y + r, x + c)`.
//!
//! Shape tables in [`crate::pieces`] are authored in the same row-major
//! orientation (each inner array is one row), so what you see in the table is
//! what lands on the board.
//!
//! None of the operations mutate their inputs: [`merge`] and
//! [`check_removing`] return fresh grids.

use blockfall_types::EMPTY_CELL;

use crate::error::EngineError;
use crate::score::line_clear_bonus;

/// Rectangular block of cell codes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::ZeroDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![EMPTY_CELL; rows * cols],
        })
    }

    /// Build a grid from nested rows; every row must have the same length
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, EngineError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut grid = Self::new(rows.len(), cols)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(EngineError::RaggedRows {
                    row: y,
                    expected: cols,
                    found: row.len(),
                });
            }
            grid.cells[y * cols..(y + 1) * cols].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Build a square shape grid from a 0/1 mask, writing `code` into the 1s
    pub(crate) fn from_mask<const N: usize>(mask: &[[u8; N]; N], code: u8) -> Self {
        let cells = mask
            .iter()
            .flatten()
            .map(|&m| if m == EMPTY_CELL { EMPTY_CELL } else { code })
            .collect();
        Self {
            rows: N,
            cols: N,
            cells,
        }
    }

    /// Height in rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width in columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Get cell at (row, col), None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<u8> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, code: u8) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = code;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(EMPTY_CELL)
    }

    /// In bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(code) if code != EMPTY_CELL)
    }

    /// Borrow one row, None if out of bounds
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        Some(self.row_slice(row))
    }

    fn row_slice(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Every cell of the row is filled
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&c| c != EMPTY_CELL))
    }

    /// Any cell of the row is filled
    pub fn is_row_occupied(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().any(|&c| c != EMPTY_CELL))
    }

    /// No filled cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY_CELL)
    }

    /// Number of filled cells
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Iterate `(row, col, code)` over filled cells in row-major order
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &code)| code != EMPTY_CELL)
            .map(move |(idx, &code)| (idx / cols, idx % cols, code))
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Convert to nested rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows).map(|y| self.row_slice(y).to_vec()).collect()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }
}

/// Outcome of one row-clear pass
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClearRow {
    lines_removed: usize,
    grid: Grid,
    score_bonus: i64,
}

impl ClearRow {
    /// Number of complete rows removed
    pub fn lines_removed(&self) -> usize {
        self.lines_removed
    }

    /// Grid after removal and gravity drop
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Line clear bonus already multiplied by level
    pub fn score_bonus(&self) -> i64 {
        self.score_bonus
    }
}

/// True when any filled shape cell would leave the grid or hit a filled cell
pub fn intersect(grid: &Grid, shape: &Grid, x: i32, y: i32) -> bool {
    shape
        .filled_cells()
        .any(|(r, c, _)| !grid.is_vacant(y + r as i32, x + c as i32))
}

/// Deep copy of a grid
pub fn copy(grid: &Grid) -> Grid {
    grid.clone()
}

/// Return a new grid with the shape written in at (x, y)
///
/// Overwrites unconditionally; callers check [`intersect`] first. Cells that
/// fall outside the grid are dropped.
pub fn merge(grid: &Grid, shape: &Grid, x: i32, y: i32) -> Grid {
    let mut result = copy(grid);
    for (r, c, code) in shape.filled_cells() {
        result.set(y + r as i32, x + c as i32, code);
    }
    result
}

/// Remove complete rows and drop the rest down
///
/// Two-pointer pass from the bottom: surviving rows are copied to the next
/// free slot from the bottom, so their relative order is kept, and whatever
/// is left at the top stays empty.
pub fn check_removing(grid: &Grid, level: u32) -> ClearRow {
    let cols = grid.cols;
    let mut cells = vec![EMPTY_CELL; grid.cells.len()];
    let mut write_y = grid.rows;
    let mut lines_removed = 0;

    for read_y in (0..grid.rows).rev() {
        if grid.is_row_complete(read_y) {
            lines_removed += 1;
        } else {
            write_y -= 1;
            cells[write_y * cols..(write_y + 1) * cols].copy_from_slice(grid.row_slice(read_y));
        }
    }

    ClearRow {
        lines_removed,
        grid: Grid {
            rows: grid.rows,
            cols,
            cells,
        },
        score_bonus: line_clear_bonus(lines_removed, level),
    }
}
