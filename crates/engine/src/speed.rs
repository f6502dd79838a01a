//! Level to auto-fall interval
//!
//! The timer that actually fires ticks lives outside the engine; it re-arms
//! with this interval whenever the controller reports a level change.

use std::time::Duration;

use blockfall_types::{FALL_STEP_MS, INITIAL_FALL_MS, MIN_FALL_MS};

/// Time between timer ticks at `level`
///
/// 400ms at level 1, 50ms faster per level, never below 100ms.
pub fn fall_interval(level: u32) -> Duration {
    let steps = u64::from(level.saturating_sub(1));
    let ms = INITIAL_FALL_MS
        .saturating_sub(steps.saturating_mul(FALL_STEP_MS))
        .max(MIN_FALL_MS);
    Duration::from_millis(ms)
}
