//! Game logic built on top of [`crate::core`].
//!
//! - [`GameField`] - Grid, falling piece and piece queue of one game
//! - [`GameSession`] - State machine, gravity timing and player intents
//! - [`GameStats`] - Score, level, cleared lines and drop interval
//! - [`PieceQueue`] - Uniform random piece selection with one-piece lookahead
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameSnapshot`] - Serializable copy of the observable state
//! - [`GameConfig`] - Field dimensions
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (it starts [`SessionState::Idle`])
//! 2. [`GameSession::start`] spawns the first piece
//! 3. The host calls [`GameSession::tick`] once per frame with the elapsed
//!    time, and forwards player input as intents
//! 4. Locked pieces clear full rows and the next piece spawns
//! 5. A spawn collision ends the game; [`GameSession::start`] begins a new one
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use blockfall_engine::{GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::default());
//! session.start();
//!
//! while session.session_state().is_running() {
//!     session.move_right();
//!     session.tick(Duration::from_millis(16));
//!     session.hard_drop();
//! }
//!
//! assert!(session.session_state().is_game_over());
//! ```

pub use self::{
    config::*, game_field::*, game_session::*, game_stats::*, piece_queue::*, snapshot::*,
};

mod config;
mod game_field;
mod game_session;
mod game_stats;
mod piece_queue;
mod snapshot;
