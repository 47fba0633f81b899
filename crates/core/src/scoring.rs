//! Scoring module - classic line-clear scoring
//!
//! One lock can clear at most four rows (shapes are at most 4x4). Points
//! come straight from [`LINE_SCORES`]; there is no level multiplier, combo or
//! drop bonus.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows in a single lock.
///
/// # Panics
///
/// `lines > 4` is unreachable under the board's invariants and panics.
///
/// # Examples
///
/// ```
/// use simple_tetris_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(4), 1200);
/// ```
pub fn line_clear_score(lines: usize) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&points) => points,
        None => unreachable!("cleared {lines} lines in one lock"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 40);
        assert_eq!(line_clear_score(2), 100);
        assert_eq!(line_clear_score(3), 300);
        assert_eq!(line_clear_score(4), 1200);
    }

    #[test]
    #[should_panic(expected = "cleared 5 lines")]
    fn test_five_lines_is_unreachable() {
        line_clear_score(5);
    }
}
