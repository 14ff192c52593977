// Host-side tests for drag, zoom, pinch and form-value parsing.

use glam::{Vec2, Vec3};
use parts_core::interaction::*;
use parts_core::{CONNECTOR_CONFIG, LAMP_CONFIG};

#[test]
fn drag_maps_pixels_to_radians() {
    let mut drag = DragState::default();
    assert!(drag.drag_to(10.0, 10.0).is_none());

    drag.begin(100.0, 100.0);
    let delta = drag.drag_to(110.0, 95.0).expect("dragging");
    // Horizontal motion spins around Y, vertical around X.
    assert!((delta - Vec2::new(-0.05, 0.1)).length() < 1e-6);

    let mut rot = Vec3::ZERO;
    apply_orbit(&mut rot, delta);
    assert!((rot.x + 0.05).abs() < 1e-6);
    assert!((rot.y - 0.1).abs() < 1e-6);

    drag.end();
    assert!(drag.drag_to(0.0, 0.0).is_none());
}

#[test]
fn drag_deltas_are_incremental() {
    let mut drag = DragState::default();
    drag.begin(0.0, 0.0);
    drag.drag_to(10.0, 0.0);
    let d = drag.drag_to(15.0, 0.0).expect("dragging");
    assert!((d.y - 0.05).abs() < 1e-6);
}

#[test]
fn lamp_wheel_steps_and_clamps() {
    let c = LAMP_CONFIG;
    let mut zoom = ZoomState::new(c.default_zoom, c.min_zoom, c.max_zoom, c.wheel_step);
    assert_eq!(zoom.wheel(120.0), 52.0);
    assert_eq!(zoom.wheel(-3.0), 50.0);
    for _ in 0..100 {
        zoom.wheel(1.0);
    }
    assert_eq!(zoom.current, 100.0);
    for _ in 0..100 {
        zoom.wheel(-1.0);
    }
    assert_eq!(zoom.current, 20.0);
}

#[test]
fn connector_wheel_uses_half_unit_steps() {
    let c = CONNECTOR_CONFIG;
    let mut zoom = ZoomState::new(c.default_zoom, c.min_zoom, c.max_zoom, c.wheel_step);
    assert_eq!(zoom.wheel(1.0), 25.5);
    // Zero delta counts as zooming in.
    assert_eq!(zoom.wheel(0.0), 25.0);
}

#[test]
fn zoom_state_clamps_on_construction_and_set() {
    let mut zoom = ZoomState::new(500.0, 10.0, 50.0, 0.5);
    assert_eq!(zoom.current, 50.0);
    assert_eq!(zoom.set(-4.0), 10.0);
}

#[test]
fn pinch_scales_inverse_to_finger_distance() {
    let mut pinch = PinchState::default();
    pinch.begin(Vec2::ZERO, Vec2::new(100.0, 0.0), 20.0);
    let z = pinch.zoom_for(Vec2::ZERO, Vec2::new(200.0, 0.0)).expect("valid");
    assert!((z - 10.0).abs() < 1e-5);
    let z = pinch.zoom_for(Vec2::ZERO, Vec2::new(50.0, 0.0)).expect("valid");
    assert!((z - 40.0).abs() < 1e-5);
}

#[test]
fn pinch_with_coincident_fingers_is_ignored() {
    let mut pinch = PinchState::default();
    pinch.begin(Vec2::ONE, Vec2::ONE, 20.0);
    assert!(pinch.zoom_for(Vec2::ZERO, Vec2::X).is_none());
}

#[test]
fn leading_float_parse() {
    assert_eq!(parse_leading_float("12.5"), Some(12.5));
    assert_eq!(parse_leading_float("  -3"), Some(-3.0));
    assert_eq!(parse_leading_float("12.5mm"), Some(12.5));
    assert_eq!(parse_leading_float("1e2"), Some(100.0));
    assert_eq!(parse_leading_float("7e"), Some(7.0));
    assert_eq!(parse_leading_float("abc"), None);
    assert_eq!(parse_leading_float(""), None);
    assert_eq!(parse_leading_float("-"), None);
}

#[test]
fn number_or_treats_zero_like_garbage() {
    assert_eq!(number_or("2.5", 1.0), 2.5);
    assert_eq!(number_or("", 1.0), 1.0);
    assert_eq!(number_or("0", 1.0), 1.0);
    assert_eq!(number_or("0", 0.0), 0.0);
    assert_eq!(number_or("x", 50.0), 50.0);
}

#[test]
fn float_offset_is_bounded_sine() {
    assert_eq!(float_offset(0.0, 0.5, 0.3), 0.0);
    let peak = float_offset(std::f32::consts::PI, 0.5, 0.3);
    assert!((peak - 0.3).abs() < 1e-6);
}
