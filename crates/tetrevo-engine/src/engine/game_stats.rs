/// Base points for line clears, multiplied by the level at clear time.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Lines needed per level: the level goes up once cumulative lines reach `6 × level`.
const LINES_PER_LEVEL: usize = 6;

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// # Scoring
///
/// - Clearing `n` lines at once awards `SCORE_TABLE[n] × level`, using the
///   level in effect before the clear.
/// - Every manual drop step awards 1 point ([`Self::add_drop_points`]).
/// - The level starts at 1 and goes up by one whenever the cumulative line
///   count reaches `6 × level`.
///
/// # Example
///
/// ```
/// use tetrevo_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.level(), 1);
///
/// stats.complete_piece_drop(2); // 6 lines reached
/// assert_eq!(stats.score(), 1300);
/// assert_eq!(stats.level(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker: score 0, level 1, no lines or pieces.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of stones that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Adds points earned by manual drop steps.
    pub const fn add_drop_points(&mut self, points: usize) {
        self.score += points;
    }

    /// Updates statistics after a stone locks.
    ///
    /// Returns `true` if the level went up.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> bool {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.score += SCORE_TABLE[cleared_lines] * self.level;

        if self.total_cleared_lines >= self.level * LINES_PER_LEVEL {
            self.level += 1;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points_scale_with_level() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(3);
        stats.complete_piece_drop(3); // level 1 -> 2 after this clear
        assert_eq!(stats.score(), 600);
        assert_eq!(stats.level(), 2);

        stats.complete_piece_drop(1);
        assert_eq!(stats.score(), 680);
    }

    #[test]
    fn test_level_up_threshold() {
        let mut stats = GameStats::new();
        for _ in 0..5 {
            assert!(!stats.complete_piece_drop(1));
        }
        assert_eq!(stats.level(), 1);
        assert!(stats.complete_piece_drop(1));
        assert_eq!(stats.level(), 2);
        // Next level needs 12 cumulative lines.
        for _ in 0..5 {
            assert!(!stats.complete_piece_drop(1));
        }
        assert!(stats.complete_piece_drop(1));
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_level_goes_up_once_per_lock() {
        let mut stats = GameStats::new();
        for _ in 0..4 {
            stats.complete_piece_drop(4);
        }
        // 1 -> 2 at 8 lines, 2 -> 3 at 12 lines; 16 lines fall short of 18.
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_drop_points_and_piece_count() {
        let mut stats = GameStats::new();
        stats.add_drop_points(21);
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(2);
        assert_eq!(stats.score(), 121);
        assert_eq!(stats.completed_pieces(), 2);
        assert_eq!(stats.total_cleared_lines(), 2);
    }
}
