//! Scoring module - classic line-clear points and speed progression
//!
//! - Line clears use the classic table `[0, 40, 100, 300, 1200]` scaled by `level + 1`.
//! - Hard drops pay 2 points per row descended.
//! - Level rises every 10 cleared lines; gravity speeds up 80ms per level down to 80ms.

use crate::types::{
    BASE_DROP_MS, DROP_FLOOR_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_DIVISOR, SOFT_DROP_MIN_MS,
};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: level in effect before the clear (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level.saturating_add(1)),
        None => 0,
    }
}

/// Points for a hard drop over `rows` rows.
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level: `max(80, 1000 - 80 * level)` ms.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_FLOOR_MS)
}

/// Gravity interval while soft drop is held: `max(30, base / 6)` ms.
pub fn get_soft_drop_interval_ms(base_interval: u32) -> u32 {
    (base_interval / SOFT_DROP_DIVISOR).max(SOFT_DROP_MIN_MS)
}
