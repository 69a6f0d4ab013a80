//! Level thresholds and progress-bar math.

use serde::Serialize;

use crate::constants::MAX_LEVEL_XP_SPAN;
use crate::numbers::{clamp_f64_to_f32, i64_to_f64};

/// Cumulative XP required to hold each level; index 0 is level 1.
pub const LEVEL_XP_THRESHOLDS: [i64; 15] = [
    0, 100, 250, 500, 800, 1_200, 1_700, 2_300, 3_000, 4_000, 5_000, 7_500, 10_000, 15_000, 20_000,
];

/// Level implied by an XP total. Never below 1, even for negative XP.
#[must_use]
pub fn level_for(xp: i64) -> u32 {
    for (index, threshold) in LEVEL_XP_THRESHOLDS.iter().enumerate().rev() {
        if xp >= *threshold {
            return u32::try_from(index + 1).unwrap_or(1);
        }
    }
    1
}

/// Progress toward the next level, for rendering an XP bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: i64,
    /// XP floor of the current level.
    pub current_threshold: i64,
    /// XP needed for the next level; synthetic past the table's end.
    pub next_threshold: i64,
    /// Fill percentage in `0.0..=100.0`.
    pub percent: f32,
}

#[must_use]
pub fn level_progress(xp: i64) -> LevelProgress {
    let level = level_for(xp);
    let index = usize::try_from(level.saturating_sub(1)).unwrap_or(0);
    let current_threshold = LEVEL_XP_THRESHOLDS.get(index).copied().unwrap_or(0);
    let next_threshold = LEVEL_XP_THRESHOLDS
        .get(index + 1)
        .copied()
        .unwrap_or(current_threshold + MAX_LEVEL_XP_SPAN);
    let span = next_threshold - current_threshold;
    let percent = if span > 0 {
        let ratio = i64_to_f64(xp - current_threshold) / i64_to_f64(span);
        clamp_f64_to_f32((ratio * 100.0).clamp(0.0, 100.0))
    } else {
        100.0
    };
    LevelProgress {
        level,
        xp,
        current_threshold,
        next_threshold,
        percent,
    }
}
