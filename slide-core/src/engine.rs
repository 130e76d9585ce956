//! Move validation and application.
//!
//! A move slides the current player's piece exactly one cell up, down, left
//! or right into an empty cell. Checks run in a fixed order and stop at the
//! first failure:
//!
//! 1. source on the board
//! 2. source holds a piece of the side to move
//! 3. destination on the board
//! 4. destination empty
//!
//! `GameState` is `Copy` and every method here takes `&self`, so a rejected
//! move can never disturb the caller's state.

use std::fmt;

use crate::{Cell, Direction, GameState, Pos};

/// Which end of a move fell off the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Reasons a move request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{end} position ({row},{col}) is off the board")]
    OutOfBounds { end: Endpoint, row: i64, col: i64 },

    #[error("starting position ({row},{col}) holds no piece of the current player")]
    NotYourPiece { row: u8, col: u8 },

    #[error("destination ({row},{col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },
}

/// A single-step slide of the piece at `from`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    pub from: Pos,
    pub direction: Direction,
}

impl Move {
    pub fn new(from: Pos, direction: Direction) -> Move {
        Move { from, direction }
    }

    /// Destination cell, or `None` if the slide leaves the board.
    #[inline]
    pub fn to(&self) -> Option<Pos> {
        self.from.step(self.direction)
    }
}

impl GameState {
    /// Slide the piece at (`from_row`, `from_col`) one cell towards
    /// `direction`, returning the successor state.
    pub fn move_piece(
        &self,
        from_row: i64,
        from_col: i64,
        direction: Direction,
    ) -> Result<GameState, MoveError> {
        let from = Pos::new(from_row, from_col).ok_or(MoveError::OutOfBounds {
            end: Endpoint::Source,
            row: from_row,
            col: from_col,
        })?;
        self.try_move(Move::new(from, direction))
    }

    /// Apply an already-bounded move, returning the successor state.
    pub fn try_move(&self, mov: Move) -> Result<GameState, MoveError> {
        let Move { from, direction } = mov;
        let mover = self.current_turn;

        if self.board.cell(from) != Cell::from(mover) {
            return Err(MoveError::NotYourPiece {
                row: from.row(),
                col: from.col(),
            });
        }

        let to = mov.to().ok_or_else(|| {
            let (dr, dc) = direction.offset();
            MoveError::OutOfBounds {
                end: Endpoint::Destination,
                row: from.row() as i64 + dr,
                col: from.col() as i64 + dc,
            }
        })?;

        if !self.board.is_empty(to) {
            return Err(MoveError::CellOccupied {
                row: to.row(),
                col: to.col(),
            });
        }

        let mut next = *self;
        next.board.set_cell(to, mover.into());
        next.board.set_cell(from, Cell::Empty);
        next.current_turn = mover.opponent();
        Ok(next)
    }
}
