use std::time::Duration;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Each value is multiplied by the level at the time of the clear.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

const LINES_PER_LEVEL: usize = 10;
const SOFT_DROP_POINTS: usize = 1;
const HARD_DROP_POINTS_PER_ROW: usize = 2;

const INITIAL_DROP_INTERVAL_MILLIS: u64 = 1000;
const MIN_DROP_INTERVAL_MILLIS: u64 = 100;
const DROP_INTERVAL_STEP_MILLIS: u64 = 50;

/// Returns the gravity interval for a level: `max(100, 1000 - (level - 1) * 50)` ms.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::drop_interval_for_level;
///
/// assert_eq!(drop_interval_for_level(1), Duration::from_millis(1000));
/// assert_eq!(drop_interval_for_level(3), Duration::from_millis(900));
/// assert_eq!(drop_interval_for_level(50), Duration::from_millis(100));
/// ```
#[must_use]
pub fn drop_interval_for_level(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = INITIAL_DROP_INTERVAL_MILLIS
        .saturating_sub(steps.saturating_mul(DROP_INTERVAL_STEP_MILLIS))
        .max(MIN_DROP_INTERVAL_MILLIS);
    Duration::from_millis(millis)
}

/// Score, level and line progression of one game.
///
/// - **Score**: line clears (`SCORE_TABLE[n] * level`), soft drops (1 per row)
///   and hard drops (2 per row)
/// - **Level**: `total_cleared_lines / 10 + 1`, starting at 1
/// - **Drop interval**: recomputed on every level increase, never increases
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 lines
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    drop_interval: Duration,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            drop_interval: Duration::from_millis(INITIAL_DROP_INTERVAL_MILLIS),
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

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Array indices represent:
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`: singles
    /// - `[2]`: doubles
    /// - `[3]`: triples
    /// - `[4]`: four-line clears
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the current gravity interval.
    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Updates statistics after a piece locks.
    ///
    /// Line points use the level before this clear is counted. Returns `true`
    /// when the level increased.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> bool {
        let index = cleared_lines.min(SCORE_TABLE.len() - 1);
        self.completed_pieces += 1;
        self.line_cleared_counter[index] += 1;
        if cleared_lines == 0 {
            return false;
        }

        self.total_cleared_lines += cleared_lines;
        self.score += SCORE_TABLE[index] * self.level;

        let new_level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        if new_level <= self.level {
            return false;
        }
        self.level = new_level;
        self.drop_interval = drop_interval_for_level(new_level);
        true
    }

    /// Awards points for one successful manual soft-drop step.
    pub fn award_soft_drop(&mut self) {
        self.score += SOFT_DROP_POINTS;
    }

    /// Awards points for a hard drop over `distance` rows.
    pub fn award_hard_drop(&mut self, distance: usize) {
        self.score += distance * HARD_DROP_POINTS_PER_ROW;
    }
}
