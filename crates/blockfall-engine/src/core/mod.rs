//! Core data structures: the grid and the piece catalog.
//!
//! - [`Grid`] - Fixed-size field of locked cells, with collision, placement
//!   and line clearing
//! - [`Piece`] - A live piece: kind, shape matrix and grid position
//! - [`PieceKind`] - The seven catalog pieces and their color ids
//! - [`PieceShape`] - Square occupancy matrix with clockwise rotation
//!
//! Nothing here knows about time, score or game state; see
//! [`crate::engine`] for that.

pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;
