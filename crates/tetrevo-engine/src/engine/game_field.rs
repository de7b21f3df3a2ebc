use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{Board, Placement, StoneKind},
};

use super::piece_buffer::{PieceBuffer, PieceSeed};

/// Single-turn game state: settled board, falling placement and stone stream.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling: Placement,
    piece_buffer: PieceBuffer,
}

impl GameField {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut piece_buffer = PieceBuffer::with_seed(seed);
        let falling = Placement::spawn_kind(piece_buffer.pop_next());
        Self {
            board: Board::EMPTY,
            falling,
            piece_buffer,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_placement(&self) -> Placement {
        self.falling
    }

    /// Returns the stone that spawns after the falling one locks.
    #[must_use]
    pub fn next_stone(&self) -> StoneKind {
        self.piece_buffer.peek_next()
    }

    pub fn set_falling_placement(&mut self, placement: Placement) -> Result<(), PieceCollisionError> {
        if placement.is_colliding(&self.board) {
            return Err(PieceCollisionError);
        }
        self.falling = placement;
        Ok(())
    }

    /// Locks the falling stone in place, clears full rows and spawns the next stone.
    ///
    /// The falling placement must be at rest. Returns the number of cleared
    /// rows together with an error when the new stone collides at its spawn
    /// offset (the game is over).
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.board
            .fill_stone(self.falling.stone(), self.falling.x(), self.falling.y());
        let cleared_lines = self.board.clear_full_rows_in_place();

        self.falling = Placement::spawn_kind(self.piece_buffer.pop_next());
        if self.falling.is_colliding(&self.board) {
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Empties the board and spawns the next stone of the stream.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.falling = Placement::spawn_kind(self.piece_buffer.pop_next());
    }
}
