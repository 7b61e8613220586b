use std::time::Duration;

use serde::Serialize;

use crate::core::{
    grid::Grid,
    piece::{Piece, PieceKind},
};

use super::{
    config::GameConfig,
    game_field::GameField,
    game_stats::GameStats,
    piece_queue::{PieceQueue, PieceSeed},
    snapshot::GameSnapshot,
};

/// Lifecycle state of a [`GameSession`].
///
/// ```text
/// Idle --start--> Running <--pause/resume--> Paused
///                    |
///                    v
///                 GameOver --start--> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// A single game, driven by intents and elapsed-time ticks.
///
/// The session exclusively owns the grid, the falling piece, the queue and
/// the statistics. Collaborators read them through accessors and mutate them
/// only through intents ([`Self::move_left`], [`Self::hard_drop`], ...) and
/// [`Self::tick`]. Intents and ticks are no-ops unless the session is
/// [`SessionState::Running`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::{GameConfig, GameSession, SessionState};
///
/// let mut session = GameSession::new(GameConfig::default());
/// assert_eq!(session.session_state(), SessionState::Idle);
///
/// session.start();
/// assert!(session.session_state().is_running());
///
/// session.move_left();
/// session.rotate();
/// session.tick(Duration::from_millis(16));
/// let distance = session.hard_drop().unwrap();
/// assert!(session.stats().score() >= distance * 2);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    drop_counter: Duration,
    play_time: Duration,
}

impl GameSession {
    /// Creates an idle session with a randomly seeded piece queue.
    ///
    /// # Panics
    ///
    /// Panics if either dimension of `config` is zero. Use
    /// [`GameConfig::validate`] to check user-provided configs first.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_queue(config, PieceQueue::new())
    }

    /// Like [`Self::new`], but the piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Self {
        Self::with_queue(config, PieceQueue::with_seed(seed))
    }

    fn with_queue(config: GameConfig, queue: PieceQueue) -> Self {
        Self {
            config,
            field: GameField::new(&config, queue),
            stats: GameStats::new(),
            session_state: SessionState::Idle,
            drop_counter: Duration::ZERO,
            play_time: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.field.grid()
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.field.next_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Returns the running time credited through [`Self::tick`].
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Captures a self-contained copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Starts a fresh game from [`SessionState::Idle`] or [`SessionState::GameOver`].
    ///
    /// Clears the grid, statistics and timers, then spawns the first piece.
    /// Does nothing while a game is running or paused.
    pub fn start(&mut self) {
        if !(self.session_state.is_idle() || self.session_state.is_game_over()) {
            return;
        }
        self.field.reset();
        self.stats = GameStats::new();
        self.drop_counter = Duration::ZERO;
        self.play_time = Duration::ZERO;
        self.session_state = SessionState::Running;
        log::info!(
            "game started on a {}x{} grid",
            self.config.width,
            self.config.height
        );
        if self.field.spawn_piece().is_err() {
            self.game_over();
        }
    }

    pub fn pause(&mut self) {
        if self.session_state.is_running() {
            self.session_state = SessionState::Paused;
        }
    }

    /// Continues a paused game. The drop counter keeps the progress it had
    /// when the game was paused.
    pub fn resume(&mut self) {
        if self.session_state.is_paused() {
            self.session_state = SessionState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.session_state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Idle | SessionState::GameOver => {}
        }
    }

    /// Advances gravity by `elapsed` wall-clock time.
    ///
    /// Once the accumulated time strictly exceeds the drop interval, the
    /// falling piece moves down one row (or locks if it cannot) and the
    /// accumulator resets to zero. Leftover time is not carried over.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.session_state.is_running() {
            return;
        }
        self.play_time += elapsed;
        self.drop_counter += elapsed;
        if self.drop_counter > self.stats.drop_interval() {
            self.drop_counter = Duration::ZERO;
            self.auto_drop_and_complete();
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Moves the falling piece down one row, awarding a point on success.
    ///
    /// A blocked soft drop does not lock the piece; gravity does that.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.stats.award_soft_drop();
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        self.session_state.is_running() && self.field.try_rotate_right().is_ok()
    }

    /// Drops the falling piece to its lowest position and locks it at once.
    ///
    /// Returns the number of rows dropped, or `None` when not running.
    pub fn hard_drop(&mut self) -> Option<usize> {
        if !self.session_state.is_running() {
            return None;
        }
        let distance = self.field.drop_distance();
        let dy = i32::try_from(distance).unwrap_or(i32::MAX);
        if self.field.try_move(0, dy).is_err() {
            return None;
        }
        self.stats.award_hard_drop(distance);
        self.complete_piece_drop();
        Some(distance)
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        self.session_state.is_running() && self.field.try_move(dx, dy).is_ok()
    }

    fn auto_drop_and_complete(&mut self) {
        if self.field.try_move(0, 1).is_ok() {
            return;
        }
        self.complete_piece_drop();
    }

    fn complete_piece_drop(&mut self) {
        if let Some(piece) = self.field.falling_piece() {
            let position = piece.position();
            log::debug!(
                "locking {:?} at ({}, {})",
                piece.kind(),
                position.x(),
                position.y()
            );
        }
        let (cleared_lines, result) = self.field.complete_piece_drop();
        if cleared_lines > 0 {
            log::debug!("cleared {cleared_lines} line(s)");
        }
        if self.stats.complete_piece_drop(cleared_lines) {
            log::info!(
                "level {} reached, drop interval {:?}",
                self.stats.level(),
                self.stats.drop_interval()
            );
        }
        if result.is_err() {
            self.game_over();
            return;
        }
        if let Some(piece) = self.field.falling_piece() {
            log::debug!("spawned {:?}", piece.kind());
        }
    }

    fn game_over(&mut self) {
        self.session_state = SessionState::GameOver;
        log::info!(
            "game over: score {}, level {}, lines {}",
            self.stats.score(),
            self.stats.level(),
            self.stats.total_cleared_lines()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    fn running_session() -> GameSession {
        let mut session = GameSession::with_seed(GameConfig::default(), SEED);
        session.start();
        session
    }

    fn falling_y(session: &GameSession) -> i32 {
        session.falling_piece().unwrap().position().y()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(GameConfig::default());
        assert_eq!(session.config(), &GameConfig::default());
        assert!(session.session_state().is_idle());
        assert!(session.falling_piece().is_none());
        assert!(session.next_piece().is_none());
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_intents_are_noops_when_idle() {
        let mut session = GameSession::with_seed(GameConfig::default(), SEED);
        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.soft_drop());
        assert!(!session.rotate());
        assert_eq!(session.hard_drop(), None);
        session.tick(Duration::from_secs(5));
        assert_eq!(session.play_time(), Duration::ZERO);
        assert!(session.session_state().is_idle());
    }

    #[test]
    fn test_start_spawns_current_and_next() {
        let session = running_session();
        assert!(session.session_state().is_running());
        let piece = session.falling_piece().unwrap();
        assert_eq!(*piece, Piece::spawn(piece.kind(), 10));
        assert!(session.next_piece().is_some());
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().level(), 1);
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let mut session = running_session();
        session.soft_drop();
        let piece = *session.falling_piece().unwrap();
        session.start();
        assert_eq!(session.falling_piece(), Some(&piece));
        assert_eq!(session.stats().score(), 1);
    }

    #[test]
    fn test_tick_uses_strict_threshold() {
        let mut session = running_session();
        let y = falling_y(&session);

        session.tick(Duration::from_millis(1000));
        assert_eq!(falling_y(&session), y);

        session.tick(Duration::from_millis(1));
        assert_eq!(falling_y(&session), y + 1);

        // Counter was reset, not carried over.
        session.tick(Duration::from_millis(1000));
        assert_eq!(falling_y(&session), y + 1);
        assert_eq!(session.play_time(), Duration::from_millis(2001));
    }

    #[test]
    fn test_large_elapsed_moves_one_row() {
        let mut session = running_session();
        let y = falling_y(&session);
        session.tick(Duration::from_secs(10));
        assert_eq!(falling_y(&session), y + 1);
    }

    #[test]
    fn test_pause_freezes_gravity() {
        let mut session = running_session();
        let y = falling_y(&session);
        session.tick(Duration::from_millis(600));

        session.pause();
        assert!(session.session_state().is_paused());
        session.tick(Duration::from_secs(30));
        assert!(!session.move_left());
        assert_eq!(falling_y(&session), y);

        session.resume();
        session.tick(Duration::from_millis(401));
        assert_eq!(falling_y(&session), y + 1);
        assert_eq!(session.play_time(), Duration::from_millis(1001));
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = GameSession::with_seed(GameConfig::default(), SEED);
        session.toggle_pause();
        assert!(session.session_state().is_idle());

        session.start();
        session.toggle_pause();
        assert!(session.session_state().is_paused());
        session.start();
        assert!(session.session_state().is_paused());
        session.toggle_pause();
        assert!(session.session_state().is_running());
    }

    #[test]
    fn test_soft_drop_scores_only_on_success() {
        let mut session = running_session();
        assert!(session.soft_drop());
        assert_eq!(session.stats().score(), 1);

        while session.soft_drop() {}
        let score = session.stats().score();
        assert!(!session.soft_drop());
        assert_eq!(session.stats().score(), score);
        assert_eq!(session.stats().completed_pieces(), 0);
    }

    #[test]
    fn test_hard_drop_scores_and_locks() {
        let mut session = running_session();
        let kind = session.falling_piece().unwrap().kind();
        let next = session.next_piece().unwrap();
        let expected = session.field().drop_distance();

        let distance = session.hard_drop().unwrap();
        assert_eq!(distance, expected);
        assert_eq!(session.stats().score(), distance * 2);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.falling_piece().unwrap().kind(), next);

        let locked = session
            .grid()
            .rows()
            .flatten()
            .filter(|cell| cell.color_id() == kind.color_id())
            .count();
        assert_eq!(locked, 4);
    }

    #[test]
    fn test_gravity_locks_piece() {
        let mut session = running_session();
        while session.soft_drop() {}
        assert_eq!(session.stats().completed_pieces(), 0);

        session.tick(Duration::from_millis(1001));
        assert_eq!(session.stats().completed_pieces(), 1);
        assert!(!session.grid().is_empty());
    }

    #[test]
    fn test_stacking_ends_in_game_over_and_restart_resets() {
        let mut session = running_session();
        for _ in 0..200 {
            if session.session_state().is_game_over() {
                break;
            }
            session.hard_drop();
        }
        assert!(session.session_state().is_game_over());
        assert!(session.hard_drop().is_none());
        assert!(!session.move_left());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::GameOver);

        session.start();
        assert!(session.session_state().is_running());
        assert!(session.grid().is_empty());
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().completed_pieces(), 0);
        assert_eq!(session.play_time(), Duration::ZERO);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut session1 = running_session();
        let mut session2 = running_session();
        for _ in 0..10 {
            session1.move_left();
            session2.move_left();
            session1.rotate();
            session2.rotate();
            assert_eq!(session1.hard_drop(), session2.hard_drop());
        }
        assert_eq!(session1.snapshot(), session2.snapshot());
    }
}
