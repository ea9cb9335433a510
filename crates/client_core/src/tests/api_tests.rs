use super::*;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::TripState;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn handle_start(State(state): State<ServerState>, Json(body): Json<Value>) -> Json<Value> {
    state.requests.lock().await.push(("start".into(), body));
    Json(json!({ "status": "started" }))
}

async fn handle_toggle_option(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.requests.lock().await.push(("toggle_option".into(), body));
    Json(json!({ "status": "ok" }))
}

async fn handle_toggle_state(State(state): State<ServerState>) -> Json<Value> {
    state
        .requests
        .lock()
        .await
        .push(("toggle_state".into(), Value::Null));
    Json(json!({ "status": "ok", "new_state": "2" }))
}

async fn handle_update() -> Json<Value> {
    Json(json!({
        "fare": 12.5,
        "state": "1",
        "is_running": true,
        "logs": [{ "time": "00:01", "msg": "move" }],
        "meta": { "level": "2", "move_rate": 0.06, "stop_rate": 0.024, "active_options": [] }
    }))
}

async fn handle_stop() -> Json<Value> {
    Json(json!({ "fare": 7.25 }))
}

async fn handle_history() -> Json<Value> {
    Json(json!([
        { "date": "2024-05-02 09:00:00", "name": "Alice", "fare": 4.1 },
        { "date": "2024-05-01 12:00:00", "name": "Bob", "fare": 12.5 }
    ]))
}

async fn spawn_trip_server() -> Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/start", post(handle_start))
        .route("/api/update", get(handle_update))
        .route("/api/toggle_state", post(handle_toggle_state))
        .route("/api/toggle_option", post(handle_toggle_option))
        .route("/api/stop", post(handle_stop))
        .route("/api/history", get(handle_history))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/"), state))
}

async fn spawn_failing_server() -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route(
            "/api/update",
            get(|| async { (StatusCode::OK, "<html>not json</html>") }),
        )
        .route(
            "/api/stop",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn api(server_url: &str) -> HttpTripApi {
    HttpTripApi::new(server_url, Duration::from_secs(5)).expect("client")
}

#[test]
fn trailing_slashes_are_trimmed_from_server_url() {
    let api = HttpTripApi::with_client(Client::new(), " http://localhost:5000// ");
    assert_eq!(api.server_url(), "http://localhost:5000");
    assert_eq!(api.endpoint("update"), "http://localhost:5000/api/update");
}

#[tokio::test]
async fn start_and_toggle_send_expected_json_bodies() {
    let (server_url, state) = spawn_trip_server().await.expect("spawn server");
    let api = api(&server_url);

    api.start_trip("Alice", FareLevel::new(3).expect("level"))
        .await
        .expect("start");
    api.toggle_option(SurchargeOption::Night, true)
        .await
        .expect("toggle option");
    api.toggle_state().await.expect("toggle state");

    let requests = state.requests.lock().await.clone();
    assert_eq!(
        requests,
        vec![
            ("start".to_string(), json!({ "name": "Alice", "level": 3 })),
            (
                "toggle_option".to_string(),
                json!({ "option": "night", "active": true })
            ),
            ("toggle_state".to_string(), Value::Null),
        ]
    );
}

#[tokio::test]
async fn update_stop_and_history_decode_responses() {
    let (server_url, _state) = spawn_trip_server().await.expect("spawn server");
    let api = api(&server_url);

    let snapshot = api.fetch_update().await.expect("update");
    assert_eq!(snapshot.fare, 12.5);
    assert_eq!(snapshot.state, TripState::Moving);
    assert_eq!(snapshot.meta.expect("meta").level, 2);

    assert_eq!(api.stop_trip().await.expect("stop"), 7.25);

    let history = api.history().await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].name, "Alice");
}

#[tokio::test]
async fn malformed_payloads_and_error_statuses_are_errors() {
    let server_url = spawn_failing_server().await.expect("spawn server");
    let api = api(&server_url);

    let err = api.fetch_update().await.expect_err("must fail");
    assert!(matches!(err, ClientError::Decode(_)), "unexpected error: {err}");

    let err = api.stop_trip().await.expect_err("must fail");
    assert!(matches!(err, ClientError::Http(_)), "unexpected error: {err}");
}
