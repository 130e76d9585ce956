//! Sliding-piece game logic on a 4x4 board with a bit-packed representation.
//!
//! # Board Encoding (32-bit)
//!
//! ```text
//! 16 cells × 2 bits per cell, row-major:
//!   Bits 2i..2i+2: cell i (0=empty, 1=white, 2=black, 3=never used)
//!
//! Cell indices:
//!   (0,0)=0   (0,1)=1   (0,2)=2   (0,3)=3
//!   (1,0)=4   (1,1)=5   (1,2)=6   (1,3)=7
//!   (2,0)=8   (2,1)=9   (2,2)=10  (2,3)=11
//!   (3,0)=12  (3,1)=13  (3,2)=14  (3,3)=15
//! ```
//!
//! # State Encoding (64-bit)
//!
//! ```text
//! Bits 0-31:  board
//! Bit 32:     current turn (0 = White, 1 = Black)
//! Bits 33-63: zero
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod engine;
pub mod notation;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{Endpoint, Move, MoveError};
pub use notation::{parse_moves, NotationError};

/// Rows and columns on the board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Errors from decoding raw codes or packed encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid cell code {0} (expected 0, 1 or 2)")]
    InvalidCell(u8),

    #[error("invalid turn code {0} (expected 1 or 2)")]
    InvalidTurn(u8),

    #[error("invalid direction code {0} (expected 0-3)")]
    InvalidDirection(u8),

    #[error("encoding {0:#x} has bits set above the turn bit")]
    UnusedBits(u64),
}

/// Contents of a single cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    White = 1,
    Black = 2,
}

impl Cell {
    /// Convert from the 2-bit code (0, 1 or 2).
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Cell> {
        match bits {
            0 => Some(Cell::Empty),
            1 => Some(Cell::White),
            2 => Some(Cell::Black),
            _ => None,
        }
    }

    /// Color of the piece in this cell, if any.
    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Color::White),
            Cell::Black => Some(Color::Black),
        }
    }

    /// Console glyph: `·` empty, `+` white, `-` black.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '·',
            Cell::White => '+',
            Cell::Black => '-',
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell as u8
    }
}

impl TryFrom<u8> for Cell {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Cell, DecodeError> {
        Cell::from_bits(code).ok_or(DecodeError::InvalidCell(code))
    }
}

/// Piece color; also identifies whose turn it is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Color {
    White = 1,
    Black = 2,
}

impl Color {
    /// Get the opposing color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Cell {
        match color {
            Color::White => Cell::White,
            Color::Black => Cell::Black,
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color as u8
    }
}

impl TryFrom<u8> for Color {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Color, DecodeError> {
        match code {
            1 => Ok(Color::White),
            2 => Ok(Color::Black),
            _ => Err(DecodeError::InvalidTurn(code)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// One of the four axis directions a piece can slide.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert from the wire code (0=Up, 1=Down, 2=Left, 3=Right).
    #[inline]
    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unit offset as (row delta, col delta).
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Direction, DecodeError> {
        Direction::from_code(code).ok_or(DecodeError::InvalidDirection(code))
    }
}

/// A coordinate known to lie on the board.
///
/// Layout:
/// ```text
///    0  1  2  3
///    4  5  6  7
///    8  9 10 11
///   12 13 14 15
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Pos(u8);

impl Pos {
    /// Create a position from signed row and column, or `None` if either
    /// falls outside `[0, 4)`.
    #[inline]
    pub fn new(row: i64, col: i64) -> Option<Pos> {
        let range = 0..BOARD_SIZE as i64;
        if range.contains(&row) && range.contains(&col) {
            Some(Pos((row * BOARD_SIZE as i64 + col) as u8))
        } else {
            None
        }
    }

    /// Create a position from a cell index (0-15).
    #[inline]
    pub fn from_index(index: usize) -> Option<Pos> {
        (index < NUM_CELLS).then_some(Pos(index as u8))
    }

    /// Row-major cell index (0-15).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the row (0-3).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }

    /// Get the column (0-3).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// The neighbouring position one step towards `direction`, or `None`
    /// when that step leaves the board.
    #[inline]
    pub fn step(self, direction: Direction) -> Option<Pos> {
        let (dr, dc) = direction.offset();
        Pos::new(self.row() as i64 + dr, self.col() as i64 + dc)
    }

    /// Iterate over all 16 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..NUM_CELLS as u8).map(Pos)
    }
}

/// The 4x4 grid, packed two bits per cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board(u32);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u32 = 0b11;

    /// A board with every cell empty.
    #[inline]
    pub const fn empty() -> Board {
        Board(0)
    }

    /// Starting layout: row 0 white, row 3 black, rows 1 and 2 empty.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for col in 0..BOARD_SIZE as i64 {
            if let Some(pos) = Pos::new(0, col) {
                board.set_cell(pos, Cell::White);
            }
            if let Some(pos) = Pos::new(BOARD_SIZE as i64 - 1, col) {
                board.set_cell(pos, Cell::Black);
            }
        }
        board
    }

    /// Create a board from its raw 32-bit encoding, rejecting the unused
    /// cell code.
    pub fn from_bits(bits: u32) -> Result<Board, DecodeError> {
        for index in 0..NUM_CELLS as u32 {
            let code = ((bits >> (index * Self::CELL_BITS)) & Self::CELL_MASK) as u8;
            if Cell::from_bits(code).is_none() {
                return Err(DecodeError::InvalidCell(code));
            }
        }
        Ok(Board(bits))
    }

    /// Get the raw 32-bit encoding.
    #[inline]
    pub fn to_bits(self) -> u32 {
        self.0
    }

    /// Get the contents of a cell.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        match (self.0 >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK {
            1 => Cell::White,
            2 => Cell::Black,
            _ => Cell::Empty,
        }
    }

    /// Set the contents of a cell.
    #[inline]
    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        let shift = pos.0 as u32 * Self::CELL_BITS;
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | ((cell as u32) << shift);
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos) == Cell::Empty
    }

    /// The board as a 4x4 matrix, indexed `[row][col]`.
    pub fn rows(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for pos in Pos::all() {
            rows[pos.row() as usize][pos.col() as usize] = self.cell(pos);
        }
        rows
    }

    /// Count cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        Pos::all().filter(|&pos| self.cell(pos) == cell).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows().iter()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let glyphs: Vec<String> = row.iter().map(|cell| cell.glyph().to_string()).collect();
            writeln!(f, "{}", glyphs.join(" "))?;
        }
        Ok(())
    }
}

/// Board snapshot plus the color allowed to move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct GameState {
    pub board: Board,
    pub current_turn: Color,
}

impl GameState {
    /// Bit position for the current turn.
    const TURN_BIT: u32 = 32;

    /// Starting position with White to move.
    pub fn initial() -> GameState {
        GameState {
            board: Board::initial(),
            current_turn: Color::White,
        }
    }

    /// Create a state from an arbitrary board and turn.
    pub fn new(board: Board, current_turn: Color) -> GameState {
        GameState { board, current_turn }
    }

    /// Get the packed 64-bit encoding.
    pub fn to_u64(self) -> u64 {
        let turn: u64 = match self.current_turn {
            Color::White => 0,
            Color::Black => 1,
        };
        self.board.0 as u64 | (turn << Self::TURN_BIT)
    }

    /// Decode a packed 64-bit encoding.
    pub fn from_u64(bits: u64) -> Result<GameState, DecodeError> {
        if bits >> (Self::TURN_BIT + 1) != 0 {
            return Err(DecodeError::UnusedBits(bits));
        }
        let board = Board::from_bits(bits as u32)?;
        let current_turn = if (bits >> Self::TURN_BIT) & 1 == 0 {
            Color::White
        } else {
            Color::Black
        };
        Ok(GameState { board, current_turn })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board:")?;
        write!(f, "{}", self.board)?;
        write!(f, "Turn: {}", self.current_turn)
    }
}
