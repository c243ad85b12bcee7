// Host-side tests for the rotation controller.

use globe_core::constants::*;
use globe_core::{sanitize_dt, RotationController, RotationParams};

const DT: f64 = 1.0 / 60.0;

#[test]
fn auto_rotation_is_monotonic_at_reference_rate() {
    let mut rot = RotationController::default();
    let mut prev = rot.composite_angle();
    for _ in 0..50 {
        let angle = rot.advance(DT, None);
        assert!(angle > prev);
        prev = angle;
    }
    assert!((prev - 50.0 * 0.003).abs() < 1e-9, "angle {prev}");
}

#[test]
fn dt_is_sanitized() {
    let mut rot = RotationController::default();
    assert_eq!(rot.advance(f64::NAN, None), 0.0);
    assert_eq!(rot.advance(-1.0, None), 0.0);
    assert_eq!(rot.advance(f64::INFINITY, None), 0.0);
    // A stalled tab resumes with a capped step
    let angle = rot.advance(5.0, None);
    assert!((angle - AUTO_ROTATE_RATE_PER_SEC * MAX_FRAME_DT_SEC).abs() < 1e-12);

    assert_eq!(sanitize_dt(0.02), 0.02);
    assert_eq!(sanitize_dt(1.0), MAX_FRAME_DT_SEC);
}

#[test]
fn drag_angle_tracks_delta_over_k_without_lag() {
    let mut rot = RotationController::default();
    rot.advance(DT, Some(150.0));
    assert!((rot.state().drag_angle - 1.5).abs() < 1e-12);
    rot.advance(DT, Some(-40.0));
    assert!((rot.state().drag_angle + 0.4).abs() < 1e-12);
    assert!(rot.state().is_dragging);
}

#[test]
fn drag_angle_is_clamped() {
    let mut rot = RotationController::default();
    rot.advance(DT, Some(1.0e6));
    assert_eq!(rot.state().drag_angle, MAX_DRAG_ANGLE);
    rot.advance(DT, Some(-1.0e6));
    assert_eq!(rot.state().drag_angle, -MAX_DRAG_ANGLE);
    rot.advance(DT, Some(f64::NAN));
    assert_eq!(rot.state().drag_angle, 0.0);
}

#[test]
fn auto_rotation_pauses_while_dragging() {
    let mut rot = RotationController::default();
    rot.advance(DT, None);
    let auto = rot.state().auto_angle;
    for i in 0..20 {
        rot.advance(DT, Some(i as f64 * 5.0));
    }
    assert_eq!(rot.state().auto_angle, auto);
}

#[test]
fn release_decays_monotonically_to_rest() {
    let mut rot = RotationController::default();
    rot.advance(DT, Some(200.0));
    let mut prev = rot.state().drag_angle;
    assert!((prev - 2.0).abs() < 1e-12);

    for _ in 0..240 {
        rot.advance(DT, None);
        let d = rot.state().drag_angle;
        assert!(d <= prev, "drag angle grew: {prev} -> {d}");
        assert!(d >= 0.0, "overshoot to {d}");
        prev = d;
    }
    assert!(rot.is_settled());
    assert_eq!(rot.state().drag_angle, 0.0);
    assert_eq!(rot.state().drag_velocity, 0.0);
}

#[test]
fn release_has_no_discontinuity() {
    let mut rot = RotationController::default();
    let before = rot.advance(DT, Some(120.0));
    let after = rot.advance(DT, None);
    // One auto step plus one frame of spring travel from rest
    assert!((after - before).abs() < 0.05, "jump {}", after - before);
    assert!(after < before);
}

#[test]
fn drag_offset_round_trips_through_k() {
    let mut rot = RotationController::default();
    rot.advance(DT, Some(75.0));
    assert!((rot.drag_offset_px() - 75.0).abs() < 1e-9);
    assert!((rot.drag_angle_for(rot.drag_offset_px()) - rot.state().drag_angle).abs() < 1e-12);
}

#[test]
fn custom_params_are_respected() {
    let params = RotationParams {
        auto_rate_per_sec: 0.0,
        drag_px_per_radian: 50.0,
        ..RotationParams::default()
    };
    let mut rot = RotationController::new(params);
    assert_eq!(rot.advance(DT, None), 0.0);
    rot.advance(DT, Some(100.0));
    assert!((rot.state().drag_angle - 2.0).abs() < 1e-12);
}
