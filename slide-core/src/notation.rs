//! Text notation for moves.
//!
//! A move is written `(row,col)D` where `D` is one of `U`, `D`, `L`, `R`,
//! e.g. `(0,0)D` slides the piece at the top-left corner down one cell.
//! A game is a whitespace-separated list of moves.

use std::fmt;
use std::str::FromStr;

use crate::{Direction, Move, Pos};

/// Errors from parsing move notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid move {0:?}: expected (row,col)D")]
    Format(String),

    #[error("invalid move {notation:?}: ({row},{col}) is off the board")]
    OffBoard { notation: String, row: i64, col: i64 },

    #[error("invalid move {notation:?}: unknown direction {letter:?}")]
    Direction { notation: String, letter: String },
}

impl Direction {
    /// Single-letter notation (U, D, L, R).
    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    fn from_letter(letter: &str) -> Option<Direction> {
        match letter {
            "U" | "u" => Some(Direction::Up),
            "D" | "d" => Some(Direction::Down),
            "L" | "l" => Some(Direction::Left),
            "R" | "r" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}){}",
            self.from.row(),
            self.from.col(),
            self.direction.letter()
        )
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Move, NotationError> {
        let notation = s.trim();
        let format_err = || NotationError::Format(notation.to_string());

        let (coords, letter) = notation
            .strip_prefix('(')
            .and_then(|rest| rest.split_once(')'))
            .ok_or_else(format_err)?;
        let (row, col) = coords.split_once(',').ok_or_else(format_err)?;
        let row: i64 = row.trim().parse().map_err(|_| format_err())?;
        let col: i64 = col.trim().parse().map_err(|_| format_err())?;

        let direction =
            Direction::from_letter(letter.trim()).ok_or_else(|| NotationError::Direction {
                notation: notation.to_string(),
                letter: letter.trim().to_string(),
            })?;
        let from = Pos::new(row, col).ok_or_else(|| NotationError::OffBoard {
            notation: notation.to_string(),
            row,
            col,
        })?;

        Ok(Move::new(from, direction))
    }
}

/// Parse a whitespace-separated move list.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, NotationError> {
    s.split_whitespace().map(str::parse).collect()
}
