//! Web API for the 4x4 sliding-piece game.
//!
//! The server owns a single live [`GameState`]. Handlers lock it once per
//! request, so the read-validate-write of a move cannot interleave with
//! another request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use slide_core::{Cell, Color, Direction, GameState, BOARD_SIZE};

pub mod config;
pub mod error;

pub use config::ApiConfig;
pub use error::{ApiError, ConfigError};

// =============================================================================
// Shared State
// =============================================================================

/// Shared application state
pub struct AppStateInner {
    game: Mutex<GameState>,
}

impl AppStateInner {
    pub fn new(game: GameState) -> Self {
        AppStateInner {
            game: Mutex::new(game),
        }
    }

    /// Lock the live game. The state is always replaced whole, so a
    /// poisoned lock still holds a consistent value.
    fn game(&self) -> MutexGuard<'_, GameState> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the live game.
    pub fn snapshot(&self) -> GameState {
        *self.game()
    }
}

impl Default for AppStateInner {
    fn default() -> Self {
        Self::new(GameState::initial())
    }
}

pub type AppState = Arc<AppStateInner>;

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Serialize)]
pub struct GameStateModel {
    #[serde(rename = "Board")]
    pub board: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    #[serde(rename = "CurrentTurn")]
    pub current_turn: Color,
}

impl From<&GameState> for GameStateModel {
    fn from(game: &GameState) -> Self {
        GameStateModel {
            board: game.board.rows(),
            current_turn: game.current_turn,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from_row: i64,
    pub from_col: i64,
    pub direction: Direction,
}

#[derive(Serialize, Deserialize)]
pub struct StateEncodingModel {
    pub encoding: u64,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let detail = rejection.body_text();
            warn!(%detail, "rejected malformed body");
            Err(ApiError::MalformedBody(detail))
        }
    }
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game_state(State(state): State<AppState>) -> Json<GameStateModel> {
    Json(GameStateModel::from(&state.snapshot()))
}

async fn move_piece(
    State(state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameStateModel>, ApiError> {
    let req = body(payload)?;

    let mut game = state.game();
    let next = game
        .move_piece(req.from_row, req.from_col, req.direction)
        .inspect_err(|e| {
            warn!(
                from_row = req.from_row,
                from_col = req.from_col,
                direction = ?req.direction,
                error = %e,
                "move rejected"
            );
        })?;
    *game = next;
    drop(game);

    debug!(
        from_row = req.from_row,
        from_col = req.from_col,
        direction = ?req.direction,
        turn = %next.current_turn,
        "move accepted\n{}",
        next.board
    );
    Ok(Json(GameStateModel::from(&next)))
}

async fn reset_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let game = GameState::initial();
    *state.game() = game;
    info!("game reset");
    Json(GameStateModel::from(&game))
}

async fn export_state(State(state): State<AppState>) -> Json<StateEncodingModel> {
    Json(StateEncodingModel {
        encoding: state.snapshot().to_u64(),
    })
}

async fn import_state(
    State(state): State<AppState>,
    payload: Result<Json<StateEncodingModel>, JsonRejection>,
) -> Result<Json<GameStateModel>, ApiError> {
    let req = body(payload)?;
    let game = GameState::from_u64(req.encoding)?;
    *state.game() = game;
    info!(encoding = req.encoding, "state imported\n{}", game);
    Ok(Json(GameStateModel::from(&game)))
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Router
// =============================================================================

/// Build the API router around `state`.
///
/// CORS allows any origin; `OPTIONS` requests are answered by the CORS layer
/// without reaching the handlers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/game-state", get(get_game_state))
        .route("/api/move-piece", post(move_piece))
        .route("/api/reset", post(reset_game))
        .route("/api/state/export", get(export_state))
        .route("/api/state/import", post(import_state))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_model_shape() {
        let json = serde_json::to_value(GameStateModel::from(&GameState::initial())).unwrap();
        assert_eq!(json["CurrentTurn"], 1);
        assert_eq!(json["Board"][0], serde_json::json!([1, 1, 1, 1]));
        assert_eq!(json["Board"][1], serde_json::json!([0, 0, 0, 0]));
        assert_eq!(json["Board"][3], serde_json::json!([2, 2, 2, 2]));
    }

    #[test]
    fn test_move_request_field_names() {
        let req: MoveRequest =
            serde_json::from_str(r#"{"fromRow":3,"fromCol":1,"direction":0}"#).unwrap();
        assert_eq!((req.from_row, req.from_col), (3, 1));
        assert_eq!(req.direction, Direction::Up);
    }

    #[test]
    fn test_poisoned_lock_recovers() {
        let state: AppState = Arc::new(AppStateInner::default());
        let poisoner = Arc::clone(&state);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.game();
            panic!("poison the lock");
        })
        .join();
        assert_eq!(state.snapshot(), GameState::initial());
    }
}
