//! Game-state engine for a falling-block puzzle.
//!
//! The crate owns everything with invariants: the grid, piece shapes and
//! rotation with wall kicks, collision, line clearing, scoring, piece
//! selection and the gravity timer. Rendering and input live elsewhere and
//! talk to a [`GameSession`] through read-only accessors and intents.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("move or rotation blocked by the grid edge or locked cells")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("spawned piece collides with locked cells")]
pub struct SpawnCollisionError;
