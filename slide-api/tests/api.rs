//! API Integration Tests
//!
//! Drives the router with `Router::oneshot`, one fresh game per test.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use slide_api::{router, AppState, AppStateInner};
use slide_core::GameState;

fn test_state() -> AppState {
    Arc::new(AppStateInner::default())
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: &Router, uri: &str, body: String) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn move_body(from_row: i64, from_col: i64, direction: u8) -> Value {
    json!({ "fromRow": from_row, "fromCol": from_col, "direction": direction })
}

#[tokio::test]
async fn test_initial_game_state() {
    let app = router(test_state());

    let response = get(&app, "/api/game-state").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "Board": [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [2, 2, 2, 2]],
            "CurrentTurn": 1
        })
    );
}

#[tokio::test]
async fn test_two_moves_then_rejections() {
    let state = test_state();
    let app = router(state.clone());

    // White (0,0) down
    let response = post_json(&app, "/api/move-piece", move_body(0, 0, 1)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["Board"][1][0], 1);
    assert_eq!(body["Board"][0][0], 0);
    assert_eq!(body["CurrentTurn"], 2);

    // Black (3,0) up
    let response = post_json(&app, "/api/move-piece", move_body(3, 0, 0)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["Board"][2][0], 2);
    assert_eq!(body["Board"][3][0], 0);
    assert_eq!(body["CurrentTurn"], 1);

    let before = state.snapshot();

    // White tries to move Black's piece
    let response = post_json(&app, "/api/move-piece", move_body(2, 0, 0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(text_body(response).await.contains("(2,0)"));
    assert_eq!(state.snapshot(), before);

    // White slides off the top edge
    let response = post_json(&app, "/api/move-piece", move_body(0, 1, 0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(text_body(response).await.contains("off the board"));
    assert_eq!(state.snapshot(), before);

    // State endpoint reflects the unchanged game
    let body = json_body(get(&app, "/api/game-state").await).await;
    assert_eq!(body["CurrentTurn"], 1);
    assert_eq!(body["Board"][2][0], 2);
}

#[tokio::test]
async fn test_occupied_destination_is_plain_text_400() {
    let app = router(test_state());

    let response = post_json(&app, "/api/move-piece", move_body(0, 0, 3)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(
        text_body(response).await,
        "destination (0,1) is already occupied"
    );
}

#[tokio::test]
async fn test_source_out_of_bounds() {
    let app = router(test_state());

    let response = post_json(&app, "/api/move-piece", move_body(-1, 0, 1)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text_body(response).await,
        "source position (-1,0) is off the board"
    );
}

#[tokio::test]
async fn test_malformed_bodies_are_400() {
    let state = test_state();
    let app = router(state.clone());

    let bodies = [
        "not json".to_string(),
        json!({ "fromRow": 0, "fromCol": 0 }).to_string(),
        json!({ "fromRow": 0, "fromCol": 0, "direction": 4 }).to_string(),
        json!({ "fromRow": "a", "fromCol": 0, "direction": 1 }).to_string(),
    ];
    for body in bodies {
        let response = post_raw(&app, "/api/move-piece", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert!(text_body(response).await.starts_with("malformed request body"));
    }
    assert_eq!(state.snapshot(), GameState::initial());
}

#[tokio::test]
async fn test_missing_content_type_is_400() {
    let app = router(test_state());

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/move-piece")
            .body(Body::from(move_body(0, 0, 1).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_options_preflight() {
    let app = router(test_state());

    let response = send(
        &app,
        Request::builder()
            .method("OPTIONS")
            .uri("/api/move-piece")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_reset() {
    let state = test_state();
    let app = router(state.clone());

    post_json(&app, "/api/move-piece", move_body(0, 2, 1)).await;
    assert_ne!(state.snapshot(), GameState::initial());

    let response = post_json(&app, "/api/reset", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["CurrentTurn"], 1);
    assert_eq!(state.snapshot(), GameState::initial());
}

#[tokio::test]
async fn test_state_export_import() {
    let state = test_state();
    let app = router(state.clone());

    post_json(&app, "/api/move-piece", move_body(0, 3, 1)).await;
    let moved = state.snapshot();

    let exported = json_body(get(&app, "/api/state/export").await).await;
    assert_eq!(exported["encoding"], moved.to_u64());

    post_json(&app, "/api/reset", json!({})).await;
    let response = post_json(&app, "/api/state/import", exported).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["CurrentTurn"], 2);
    assert_eq!(state.snapshot(), moved);

    // Unused cell code 3 in cell 0
    let response = post_json(&app, "/api/state/import", json!({ "encoding": 3 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(text_body(response).await.starts_with("invalid state encoding"));
    assert_eq!(state.snapshot(), moved);
}

#[tokio::test]
async fn test_concurrent_moves_apply_once() {
    let state = test_state();
    let app = router(state.clone());

    // Both requests try the same White move; only one can win the turn.
    let (a, b) = tokio::join!(
        post_json(&app, "/api/move-piece", move_body(0, 1, 1)),
        post_json(&app, "/api/move-piece", move_body(0, 1, 1)),
    );
    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);
    assert_eq!(state.snapshot().current_turn, slide_core::Color::Black);
}

#[tokio::test]
async fn test_health() {
    let app = router(test_state());
    let body = json_body(get(&app, "/health").await).await;
    assert_eq!(body, json!({ "status": "ok" }));
}
