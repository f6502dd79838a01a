//! Scoring module - the score counter and the point tables behind it
//!
//! - Line clears: `[0, 100, 300, 500, 800][lines] * level`
//! - Soft drop: +1 per user-initiated row
//! - Hard drop: +2 per row travelled

use blockfall_types::{HARD_DROP_POINTS_PER_ROW, LINE_CLEAR_SCORES, SOFT_DROP_POINTS};

/// Monotonic score counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Score {
    value: i64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Add points; callers are trusted, so negative values are not rejected.
    /// Saturates instead of wrapping.
    pub fn add(&mut self, points: i64) {
        self.value = self.value.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Borrowed view of a [`Score`] that can read and append but never reset
#[derive(Debug)]
pub struct ScoreHandle<'a> {
    score: &'a mut Score,
}

impl<'a> ScoreHandle<'a> {
    pub(crate) fn new(score: &'a mut Score) -> Self {
        Self { score }
    }

    pub fn value(&self) -> i64 {
        self.score.value()
    }

    pub fn add(&mut self, points: i64) {
        self.score.add(points);
    }
}

/// Line clear bonus for `lines` rows removed at once
///
/// More than four rows cannot come from a single piece and score nothing.
pub fn line_clear_bonus(lines: usize, level: u32) -> i64 {
    let base = LINE_CLEAR_SCORES.get(lines).copied().unwrap_or(0);
    base.saturating_mul(i64::from(level))
}

/// Drop points for `rows` travelled
pub fn drop_points(rows: u32, is_hard_drop: bool) -> i64 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS_PER_ROW
    } else {
        SOFT_DROP_POINTS
    };
    i64::from(rows) * per_row
}
