//! WASM bindings for slide-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use wasm_bindgen::prelude::*;

use crate::{Direction, GameState, Pos};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game at the starting position
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: GameState::initial(),
        }
    }

    /// Create game from u64 encoding
    #[wasm_bindgen(js_name = fromU64)]
    pub fn from_u64(bits: u64) -> Result<WasmGame, JsError> {
        let inner = GameState::from_u64(bits)?;
        Ok(WasmGame { inner })
    }

    /// Get u64 encoding of the game
    #[wasm_bindgen(js_name = toU64)]
    pub fn to_u64(&self) -> u64 {
        self.inner.to_u64()
    }

    /// Side to move (1 = White, 2 = Black)
    #[wasm_bindgen(js_name = currentTurn)]
    pub fn current_turn(&self) -> u8 {
        self.inner.current_turn.into()
    }

    /// Cell contents (0 = empty, 1 = white, 2 = black), 0 for off-board
    pub fn cell(&self, row: i32, col: i32) -> u8 {
        Pos::new(row as i64, col as i64)
            .map(|pos| self.inner.board.cell(pos).into())
            .unwrap_or(0)
    }

    /// Board as a nested 4x4 array of cell codes
    pub fn board(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.board.rows())?)
    }

    /// Slide a piece. Returns `undefined` on success or the rejection
    /// message; the game is unchanged on rejection.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, from_row: i32, from_col: i32, direction: u8) -> Option<String> {
        let Some(direction) = Direction::from_code(direction) else {
            return Some(format!("invalid direction code {direction}"));
        };
        match self
            .inner
            .move_piece(from_row as i64, from_col as i64, direction)
        {
            Ok(next) => {
                self.inner = next;
                None
            }
            Err(e) => Some(e.to_string()),
        }
    }

    /// Reset to the starting position
    pub fn reset(&mut self) {
        self.inner = GameState::initial();
    }

    /// Console rendering of the board
    pub fn render(&self) -> String {
        self.inner.board.to_string()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
