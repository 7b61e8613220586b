use crate::{
    PieceCollisionError, SpawnCollisionError,
    core::{
        grid::Grid,
        piece::{Piece, PieceKind},
    },
};

use super::{config::GameConfig, piece_queue::PieceQueue};

/// Board-level state of one game: the grid, the falling piece and the queue.
#[derive(Debug, Clone)]
pub struct GameField {
    grid: Grid,
    falling_piece: Option<Piece>,
    queue: PieceQueue,
}

impl GameField {
    /// Creates an empty field. No piece is falling until [`Self::spawn_piece`].
    #[must_use]
    pub fn new(config: &GameConfig, queue: PieceQueue) -> Self {
        Self {
            grid: Grid::new(config.width, config.height),
            falling_piece: None,
            queue,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.queue.peek_next()
    }

    /// Empties the grid and drops the falling piece and lookahead.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.grid.width(), self.grid.height());
        self.falling_piece = None;
        self.queue.reset();
    }

    /// Makes the queued piece current at the centred spawn position.
    ///
    /// The new piece becomes current even when it collides; the error tells
    /// the caller the game is over. The grid is never touched.
    pub fn spawn_piece(&mut self) -> Result<(), SpawnCollisionError> {
        let piece = Piece::spawn(self.queue.pop_next(), self.grid.width());
        self.falling_piece = Some(piece);
        if self.grid.is_colliding(&piece) {
            return Err(SpawnCollisionError);
        }
        Ok(())
    }

    /// Shifts the falling piece by `(dx, dy)` if the target is free.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.ok_or(PieceCollisionError)?;
        if self.grid.collides(&piece, dx, dy) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(piece.moved(dx, dy));
        Ok(())
    }

    /// Rotates the falling piece clockwise, applying wall kicks.
    ///
    /// On failure the falling piece is left unchanged.
    pub fn try_rotate_right(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .and_then(|piece| piece.super_rotated_right(&self.grid))
            .ok_or(PieceCollisionError)?;
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Counts the single-row downward moves available before the falling
    /// piece collides.
    #[must_use]
    pub fn drop_distance(&self) -> usize {
        let Some(piece) = self.falling_piece else {
            return 0;
        };
        (0..)
            .take_while(|&dy| !self.grid.collides(&piece, 0, dy + 1))
            .count()
    }

    /// Locks the falling piece, clears filled rows and spawns the next piece.
    ///
    /// Returns the number of cleared rows together with the spawn result.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), SpawnCollisionError>) {
        if let Some(piece) = self.falling_piece.take() {
            self.grid.fill_piece(&piece);
        }
        let cleared_lines = self.grid.clear_lines();
        (cleared_lines, self.spawn_piece())
    }
}
