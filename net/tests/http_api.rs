//! `HttpApi` against an in-process axum stand-in for the planning service.

#![allow(clippy::float_cmp)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use canvas::doc::{Obstacle, RoomModel, Waypoint, WaypointAction};
use net::api::{HttpApi, TrajectoryApi};
use net::config::ClientConfig;
use net::error::ApiError;
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Default)]
struct Service {
    posts: AtomicUsize,
}

async fn create(State(service): State<Arc<Service>>, Json(room): Json<RoomModel>) -> Response {
    service.posts.fetch_add(1, Ordering::SeqCst);
    if room.width > 50.0 {
        return (StatusCode::BAD_REQUEST, "Wall too wide").into_response();
    }
    let rows = (room.height / room.coverage_width).floor();
    Json(json!([
        { "x": 0.0, "y": 0.0, "action": "move" },
        { "x": room.width, "y": 0.0, "action": "paint" },
        { "x": room.width, "y": rows * room.coverage_width, "action": "move" },
    ]))
    .into_response()
}

/// Ids the stand-in service knows, as decoded from the path.
const KNOWN_IDS: [&str; 2] = ["abc", "run/7?v=2#x"];

async fn fetch(Path(id): Path<String>) -> Response {
    if !KNOWN_IDS.contains(&id.as_str()) {
        return (StatusCode::NOT_FOUND, "Trajectory not found").into_response();
    }
    Json(json!([
        { "x": 1.0, "y": 2.0, "action": "move" },
        { "x": 3.0, "y": 2.0, "action": "paint" },
    ]))
    .into_response()
}

async fn metrics() -> Json<serde_json::Value> {
    Json(json!({
        "total_trajectories": 3,
        "avg_coverage_percent": 81.5,
        "avg_duration": 0.42,
        "latest_timestamp": "2026-10-18T09:30:00",
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn serve() -> (HttpApi, Arc<Service>) {
    let service = Arc::new(Service::default());
    let app = Router::new()
        .route("/api/trajectories", post(create))
        .route("/api/trajectories/{id}", get(fetch))
        .route("/api/metrics", get(metrics))
        .route("/api/health", get(health))
        .with_state(Arc::clone(&service));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let api = HttpApi::new(&ClientConfig::new(&format!("http://{addr}/"))).expect("client");
    (api, service)
}

fn room(width: f64, obstacles: Vec<Obstacle>) -> RoomModel {
    RoomModel { width, height: 6.0, coverage_width: 0.15, obstacles }
}

#[tokio::test]
async fn create_returns_service_waypoints() {
    let (api, service) = serve().await;
    let obstacles = vec![Obstacle::new(2.5, 0.0, 1.0, 2.1).expect("obstacle")];

    let waypoints = api.create_trajectory(&room(10.0, obstacles)).await.expect("create");

    assert_eq!(waypoints.len(), 3);
    assert_eq!(waypoints[1], Waypoint::new(10.0, 0.0, WaypointAction::Paint));
    assert_eq!(waypoints[2].action, WaypointAction::Move);
    assert_eq!(service.posts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn out_of_bounds_obstacle_never_reaches_service() {
    let (api, service) = serve().await;
    let obstacles = vec![
        Obstacle::new(0.0, 0.0, 1.0, 1.0).expect("obstacle"),
        Obstacle::new(0.0, 5.5, 1.0, 1.0).expect("obstacle"),
    ];

    let err = api.create_trajectory(&room(10.0, obstacles)).await.expect_err("rejected");

    assert!(matches!(err, ApiError::ObstacleOutOfBounds { index: 1 }));
    assert_eq!(service.posts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_request_surfaces_status_and_body() {
    let (api, _) = serve().await;

    let err = api.create_trajectory(&room(80.0, Vec::new())).await.expect_err("rejected");

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "Wall too wide");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn fetch_returns_stored_waypoints() {
    let (api, _) = serve().await;

    let waypoints = api.fetch_trajectory("abc").await.expect("fetch");

    assert_eq!(
        waypoints,
        vec![Waypoint::new(1.0, 2.0, WaypointAction::Move), Waypoint::new(3.0, 2.0, WaypointAction::Paint)]
    );
}

#[tokio::test]
async fn fetch_sends_reserved_characters_in_id_verbatim() {
    let (api, _) = serve().await;

    let waypoints = api.fetch_trajectory("run/7?v=2#x").await.expect("fetch");

    assert_eq!(waypoints.len(), 2);
}

#[tokio::test]
async fn fetch_of_unknown_id_is_404() {
    let (api, _) = serve().await;

    let err = api.fetch_trajectory("nope").await.expect_err("missing");

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn metrics_and_health_decode() {
    let (api, _) = serve().await;

    let metrics = api.metrics().await.expect("metrics");
    assert_eq!(metrics.total_trajectories, 3);
    assert_eq!(metrics.avg_coverage_percent, 81.5);
    assert_eq!(metrics.latest_timestamp.as_deref(), Some("2026-10-18T09:30:00"));

    assert!(api.health().await.expect("health").is_ok());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let api = HttpApi::new(&ClientConfig::new(&format!("http://{addr}"))).expect("client");

    let err = api.health().await.expect_err("refused");

    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(err.status(), None);
}
