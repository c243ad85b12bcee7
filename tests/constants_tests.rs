// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so its page constants are included directly.

#![allow(dead_code)]
mod page {
    include!("../src/constants.rs");
}

use globe_core::constants::*;
use page::*;

#[test]
fn auto_rate_matches_reference_per_frame_increment() {
    assert!((AUTO_ROTATE_RATE_PER_SEC * REFERENCE_FRAME_SEC - 0.003).abs() < 1e-12);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn spring_is_stable_and_critically_damped() {
    assert!(SPRING_OMEGA > 0.0);
    assert_eq!(SPRING_DAMPING_RATIO, 1.0);
    // Semi-implicit Euler stays stable well below 2/omega
    assert!(SPRING_MAX_SUBSTEP_SEC * SPRING_OMEGA < 0.1);
    assert!(SPRING_MAX_SUBSTEP_SEC <= REFERENCE_FRAME_SEC);
    assert!(SPRING_REST_EPSILON > 0.0 && SPRING_REST_EPSILON < 1e-3);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_and_drag_limits_are_sane() {
    assert!(MAX_FRAME_DT_SEC > REFERENCE_FRAME_SEC);
    assert_eq!(DRAG_PX_PER_RADIAN, 100.0);
    assert!(MAX_DRAG_ANGLE > 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn hover_and_fade_timing() {
    assert!(HOVER_GLOW_IDLE < HOVER_GLOW_ACTIVE);
    // Within the snap threshold after roughly 0.6 s of easing
    assert!(4.0 * HOVER_GLOW_TAU_SEC <= 0.6 + 1e-6);
    assert_eq!(FADE_IN_SEC, 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn globe_and_halo_fit_the_viewport() {
    assert!(GLOBE_RADIUS_FRACTION * (1.0 + GLOW_WIDTH_FRACTION) <= 1.0);
    assert!(AMBIENT_LIGHT + DEFAULT_DIFFUSE * (1.0 - AMBIENT_LIGHT) <= MAX_LIGHT_INTENSITY);
}

#[test]
fn page_integration_names() {
    assert_eq!(AUTO_CANVAS_ID, "globe-canvas");
    assert!(DATA_SIZE_ATTR.starts_with("data-"));
    assert!(DATA_DARK_ATTR.starts_with("data-"));
    assert_eq!(INITIAL_OPACITY, "0");
    assert!(!FADE_EASING.is_empty());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn size_limits_fit_memory_and_gpu() {
    assert!(DEFAULT_SIZE_PX <= MAX_SIZE_PX);
    assert!(MAX_SIZE_PX * 2 <= MAX_BACKING_PX);
    // RGBA8 backing store addressable with a 32-bit usize
    assert!((MAX_BACKING_PX as u64).pow(2) * 4 <= u32::MAX as u64);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pulse_rings_sit_between_globe_and_frame_edge() {
    for i in 0..2 {
        let rest = PULSE_RING_RADIUS_FRACTION[i];
        assert!(rest > GLOBE_RADIUS_FRACTION);
        assert!(rest * PULSE_RING_PEAK_SCALE[i] < 1.0);
        let (from, to) = PULSE_RING_OPACITY[i];
        assert!(from > to && to > 0.0);
    }
    assert_eq!(PULSE_PERIOD_SEC, 4.0);
    assert_eq!(PULSE_RING_DELAY_SEC, [0.0, 2.0]);
}
