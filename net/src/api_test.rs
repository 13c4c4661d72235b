use canvas::doc::Obstacle;

use super::*;

fn room(obstacles: Vec<Obstacle>) -> RoomModel {
    RoomModel { width: 10.0, height: 6.0, coverage_width: 0.15, obstacles }
}

fn obstacle(x: f64, y: f64, w: f64, h: f64) -> Obstacle {
    Obstacle::new(x, y, w, h).expect("valid obstacle")
}

#[test]
fn validate_accepts_obstacles_inside_wall() {
    assert!(validate_room(&room(vec![obstacle(2.5, 0.0, 1.0, 2.1)])).is_ok());
    assert!(validate_room(&room(vec![])).is_ok());
}

#[test]
fn validate_accepts_obstacle_touching_far_edges() {
    assert!(validate_room(&room(vec![obstacle(9.0, 5.0, 1.0, 1.0)])).is_ok());
}

#[test]
fn validate_names_first_offender() {
    let r = room(vec![
        obstacle(0.0, 0.0, 1.0, 1.0),
        obstacle(9.5, 0.0, 1.0, 1.0),
        obstacle(0.0, 5.5, 1.0, 1.0),
    ]);
    assert!(matches!(validate_room(&r), Err(ApiError::ObstacleOutOfBounds { index: 1 })));
}

#[test]
fn http_api_rejects_non_http_base_url() {
    let config = ClientConfig::new("ws://localhost:8000");
    assert!(matches!(HttpApi::new(&config), Err(ApiError::InvalidBaseUrl(_))));
}

#[test]
fn http_api_trims_trailing_slash() {
    let api = HttpApi::new(&ClientConfig::new("http://localhost:8000/")).expect("client");
    assert_eq!(api.base_url(), "http://localhost:8000");
}

#[test]
fn status_error_exposes_code() {
    let err = ApiError::Status { status: 400, body: "Obstacle exceeds wall bounds".into() };
    assert_eq!(err.status(), Some(400));
    assert_eq!(ApiError::ObstacleOutOfBounds { index: 0 }.status(), None);
}

#[test]
fn trajectory_url_keeps_id_as_one_segment() {
    let api = HttpApi::new(&ClientConfig::new("http://localhost:8000")).expect("client");
    assert_eq!(
        api.trajectory_url("abc").expect("url").as_str(),
        "http://localhost:8000/api/trajectories/abc"
    );
    assert_eq!(
        api.trajectory_url("a/b?c#d").expect("url").as_str(),
        "http://localhost:8000/api/trajectories/a%2Fb%3Fc%23d"
    );
}
