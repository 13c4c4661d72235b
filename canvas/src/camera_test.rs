#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.distance(b), 5.0));
    assert!(approx_eq(b.distance(a), 5.0));
}

// --- Fit ---

#[test]
fn fit_width_limited_wall() {
    // 800/10 = 80, 500/6 = 83.3 -> width limits.
    let cam = Camera::fit(10.0, 6.0, 800.0, 500.0).expect("valid dims");
    assert!(approx_eq(cam.scale(), 80.0 * 0.9));
}

#[test]
fn fit_height_limited_wall() {
    // 800/4 = 200, 500/5 = 100 -> height limits.
    let cam = Camera::fit(4.0, 5.0, 800.0, 500.0).expect("valid dims");
    assert!(approx_eq(cam.scale(), 90.0));
}

#[test]
fn fit_leaves_margin_on_limiting_axis() {
    let cam = Camera::fit(10.0, 6.0, 800.0, 500.0).expect("valid dims");
    let far = cam.world_to_screen(Point::new(10.0, 6.0));
    assert!(far.x < 800.0);
    assert!(far.y < 500.0);
    assert!(approx_eq(far.x, 720.0));
}

#[test]
fn fit_rejects_zero_and_negative_dims() {
    assert!(Camera::fit(0.0, 6.0, 800.0, 500.0).is_none());
    assert!(Camera::fit(10.0, -1.0, 800.0, 500.0).is_none());
    assert!(Camera::fit(10.0, 6.0, 0.0, 500.0).is_none());
    assert!(Camera::fit(10.0, 6.0, 800.0, f64::NAN).is_none());
    assert!(Camera::fit(f64::INFINITY, 6.0, 800.0, 500.0).is_none());
}

#[test]
fn fit_recomputes_for_new_dimensions() {
    let small = Camera::fit(2.0, 2.0, 800.0, 500.0).expect("valid dims");
    let large = Camera::fit(20.0, 20.0, 800.0, 500.0).expect("valid dims");
    assert!(small.scale() > large.scale());
    assert!(approx_eq(small.scale(), large.scale() * 10.0));
}

#[test]
fn default_scale_is_one() {
    assert_eq!(Camera::default().scale(), 1.0);
}

// --- Conversions ---

#[test]
fn world_to_screen_multiplies_by_scale() {
    let cam = Camera::fit(10.0, 6.0, 800.0, 500.0).expect("valid dims");
    let s = cam.world_to_screen(Point::new(2.5, 1.0));
    assert!(point_approx_eq(s, Point::new(180.0, 72.0)));
}

#[test]
fn screen_to_world_divides_by_scale() {
    let cam = Camera::fit(10.0, 6.0, 800.0, 500.0).expect("valid dims");
    let w = cam.screen_to_world(Point::new(180.0, 72.0));
    assert!(point_approx_eq(w, Point::new(2.5, 1.0)));
}

#[test]
fn roundtrip_world_screen_world() {
    let cam = Camera::fit(7.3, 3.1, 640.0, 480.0).expect("valid dims");
    let world = Point::new(1.234, 2.345);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

#[test]
fn origin_maps_to_origin() {
    let cam = Camera::fit(10.0, 6.0, 800.0, 500.0).expect("valid dims");
    assert!(point_approx_eq(cam.world_to_screen(Point::new(0.0, 0.0)), Point::new(0.0, 0.0)));
}

#[test]
fn distance_conversions_are_inverse() {
    let cam = Camera::fit(10.0, 6.0, 800.0, 500.0).expect("valid dims");
    assert!(approx_eq(cam.world_dist_to_screen(1.0), 72.0));
    assert!(approx_eq(cam.screen_dist_to_world(72.0), 1.0));
}
