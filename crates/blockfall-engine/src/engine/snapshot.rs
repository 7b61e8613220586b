use serde::Serialize;

use crate::core::piece::{Piece, PieceKind};

use super::game_session::{GameSession, SessionState};

/// Owned copy of everything a renderer needs from a [`GameSession`].
///
/// The grid is stored row by row as color ids (0 = empty, 1..=7 = locked
/// piece). Serializes to JSON via serde.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameSession, SessionState};
///
/// let mut session = GameSession::new(GameConfig::default());
/// session.start();
///
/// let snapshot = session.snapshot();
/// assert_eq!(snapshot.state, SessionState::Running);
/// assert_eq!(snapshot.grid.len(), 20);
/// assert!(snapshot.active.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub grid: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub drop_interval_ms: u64,
    pub state: SessionState,
}

/// The falling piece inside a [`GameSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color_id: u8,
    pub x: i32,
    pub y: i32,
    /// Occupancy matrix, one entry per row.
    pub shape: Vec<Vec<bool>>,
}

impl GameSnapshot {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            grid: session
                .grid()
                .rows()
                .map(|row| row.iter().map(|cell| cell.color_id()).collect())
                .collect(),
            active: session.falling_piece().map(ActiveSnapshot::from),
            next: session.next_piece(),
            score: stats.score(),
            level: stats.level(),
            lines: stats.total_cleared_lines(),
            drop_interval_ms: u64::try_from(stats.drop_interval().as_millis()).unwrap_or(u64::MAX),
            state: session.session_state(),
        }
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        let position = piece.position();
        Self {
            kind: piece.kind(),
            color_id: piece.color_id(),
            x: position.x(),
            y: position.y(),
            shape: piece.shape().rows().map(<[bool]>::to_vec).collect(),
        }
    }
}
