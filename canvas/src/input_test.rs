#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Mode
// =============================================================

#[test]
fn mode_default_is_draw() {
    assert_eq!(Mode::default(), Mode::Draw);
}

#[test]
fn mode_variants_distinct() {
    assert_ne!(Mode::Draw, Mode::Remove);
}

// =============================================================
// Rect normalization
// =============================================================

#[test]
fn rect_from_corners_forward_drag() {
    let r = Rect::from_corners(Point::new(1.0, 2.0), Point::new(3.0, 5.0));
    assert_eq!(r, Rect { x: 1.0, y: 2.0, width: 2.0, height: 3.0 });
}

#[test]
fn rect_from_corners_backward_drag_normalizes() {
    let r = Rect::from_corners(Point::new(3.0, 5.0), Point::new(1.0, 2.0));
    assert_eq!(r, Rect { x: 1.0, y: 2.0, width: 2.0, height: 3.0 });
}

#[test]
fn rect_from_corners_mixed_directions() {
    let r = Rect::from_corners(Point::new(3.0, 2.0), Point::new(1.0, 5.0));
    assert_eq!(r, Rect { x: 1.0, y: 2.0, width: 2.0, height: 3.0 });
}

#[test]
fn rect_from_same_corner_is_empty() {
    let r = Rect::from_corners(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
    assert_eq!(r.width, 0.0);
    assert_eq!(r.height, 0.0);
    assert!(!r.is_committable());
}

// =============================================================
// Commit threshold
// =============================================================

#[test]
fn rect_committable_requires_both_axes() {
    assert!(Rect { x: 0.0, y: 0.0, width: 0.5, height: 0.5 }.is_committable());
    assert!(!Rect { x: 0.0, y: 0.0, width: 0.5, height: 0.05 }.is_committable());
    assert!(!Rect { x: 0.0, y: 0.0, width: 0.05, height: 0.5 }.is_committable());
}

#[test]
fn rect_exactly_threshold_is_not_committable() {
    assert!(!Rect { x: 0.0, y: 0.0, width: 0.1, height: 0.5 }.is_committable());
    assert!(!Rect { x: 0.0, y: 0.0, width: 0.5, height: 0.1 }.is_committable());
}

#[test]
fn rect_just_over_threshold_is_committable() {
    assert!(Rect { x: 0.0, y: 0.0, width: 0.1001, height: 0.1001 }.is_committable());
}

// =============================================================
// UiState / InputState defaults
// =============================================================

#[test]
fn ui_state_default_has_no_preview() {
    let ui = UiState::default();
    assert_eq!(ui.mode, Mode::Draw);
    assert!(ui.pending_rect.is_none());
}

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}
