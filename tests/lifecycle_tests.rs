// Host-side tests for the render loop and resource lifecycle.

mod support;

use globe_core::{Cursor, GlobeError, GlobeOptions, Phase, PointerInput};
use support::*;

#[test]
fn mount_with_size_starts_running() {
    let host = small_host();
    let counters = host.counters();
    let globe = mounted(host);
    assert_eq!(globe.phase(), Phase::Running);
    let c = counters.borrow();
    assert_eq!(c.instances_created, 1);
    assert_eq!(c.listeners_attached, 1);
    assert_eq!(c.frames_requested, 1);
    assert_eq!(globe.frame().map(|f| f.width()), Some(64));
}

#[test]
fn zero_size_defers_until_resize() {
    let host = MockHost::not_laid_out();
    let counters = host.counters();
    let mut globe = globe_with(host, GlobeOptions::new(64, true).unwrap());
    globe.mount().unwrap();
    assert_eq!(globe.phase(), Phase::Initializing);
    assert_eq!(counters.borrow().instances_created, 0);
    assert_eq!(counters.borrow().frames_requested, 0);

    // Frames are ignored until the instance exists
    globe.on_frame(16.0).unwrap();
    assert_eq!(counters.borrow().presents, 0);

    globe.host_mut().set_size(64.0, 1.0);
    globe.on_resize().unwrap();
    assert_eq!(globe.phase(), Phase::Running);
    assert_eq!(counters.borrow().instances_created, 1);
    assert_eq!(counters.borrow().frames_requested, 1);
}

#[test]
fn oversized_options_fail_before_acquiring_anything() {
    let host = small_host();
    let counters = host.counters();
    let options = GlobeOptions {
        size: 3_000_000_000,
        dark_mode: true,
    };
    let mut globe = globe_with(host, options);
    assert!(matches!(
        globe.mount(),
        Err(GlobeError::InvalidOption { name: "size", .. })
    ));
    assert_eq!(globe.phase(), Phase::Unmounted);
    let c = counters.borrow();
    assert_eq!(c.listeners_attached, 0);
    assert_eq!(c.instances_created, 0);
}

#[test]
fn each_frame_presents_and_schedules_the_next() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    let mut clock = 0.0;
    run_frames(&mut globe, &mut clock, 5);
    let c = counters.borrow();
    assert_eq!(c.presents, 5);
    assert_eq!(c.frames_requested, 6);
    assert_eq!(c.frames_cancelled, 0);
    assert_eq!(c.last_present_size, Some((64, 64)));
    drop(c);
    assert_eq!(globe.frames_presented(), 5);
}

#[test]
fn fade_in_is_revealed_once() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    assert!(!globe.is_revealed());
    let mut clock = 0.0;
    run_frames(&mut globe, &mut clock, 3);
    assert!(globe.is_revealed());
    assert_eq!(counters.borrow().reveals, vec![1.0]);
}

#[test]
fn teardown_is_idempotent_and_releases_once() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    let mut clock = 0.0;
    run_frames(&mut globe, &mut clock, 2);

    globe.teardown();
    globe.teardown();
    assert_eq!(globe.phase(), Phase::Unmounted);
    {
        let c = counters.borrow();
        assert_eq!(c.instances_released, 1);
        assert_eq!(c.frames_cancelled, 1);
        assert_eq!(c.listeners_detached, 1);
    }

    // A late frame callback does nothing
    globe.on_frame(clock + 16.0).unwrap();
    assert_eq!(counters.borrow().presents, 2);
    assert!(globe.frame().is_none());

    drop(globe);
    let c = counters.borrow();
    assert_eq!(c.instances_released, 1);
    assert_eq!(c.listeners_detached, 1);
}

#[test]
fn drop_tears_down() {
    let host = small_host();
    let counters = host.counters();
    let globe = mounted(host);
    drop(globe);
    let c = counters.borrow();
    assert_eq!(c.instances_released, 1);
    assert_eq!(c.frames_cancelled, 1);
    assert_eq!(c.listeners_detached, 1);
}

#[test]
fn resize_keeps_rotation_and_retargets_buffers() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    let mut clock = 0.0;
    run_frames(&mut globe, &mut clock, 10);
    let before = *globe.rotation();

    globe.host_mut().set_size(80.0, 1.0);
    globe.on_resize().unwrap();
    assert_eq!(*globe.rotation(), before);
    assert_eq!(globe.config().pixel_size, 80);
    assert_eq!(counters.borrow().resizes, vec![(80, 80)]);
    assert_eq!(counters.borrow().instances_created, 1);

    run_frames(&mut globe, &mut clock, 1);
    assert_eq!(globe.frame().map(|f| f.width()), Some(80));
    assert!(globe.composite_angle() > before.composite());
}

#[test]
fn resize_to_zero_keeps_running() {
    let mut globe = mounted(small_host());
    globe.host_mut().set_size(0.0, 1.0);
    globe.on_resize().unwrap();
    assert_eq!(globe.phase(), Phase::Running);
    assert_eq!(globe.config().pixel_size, 64);
}

#[test]
fn context_failure_is_reported_without_retry() {
    let mut host = small_host();
    host.fail_context = true;
    let counters = host.counters();
    let mut globe = globe_with(host, GlobeOptions::new(64, true).unwrap());
    let err = globe.mount().unwrap_err();
    assert!(matches!(err, GlobeError::ContextUnavailable(_)));
    assert_eq!(globe.phase(), Phase::Unmounted);
    assert_eq!(counters.borrow().listeners_detached, 1);
    assert_eq!(counters.borrow().frames_requested, 0);

    globe.on_resize().unwrap();
    globe.on_frame(16.0).unwrap();
    assert_eq!(globe.phase(), Phase::Unmounted);
    assert_eq!(counters.borrow().instances_created, 0);
}

#[test]
fn present_failure_tears_down() {
    let mut host = small_host();
    host.fail_present = true;
    let counters = host.counters();
    let mut globe = mounted(host);
    let err = globe.on_frame(16.0).unwrap_err();
    assert!(matches!(err, GlobeError::Present(_)));
    assert_eq!(globe.phase(), Phase::Unmounted);
    let c = counters.borrow();
    assert_eq!(c.instances_released, 1);
    assert_eq!(c.listeners_detached, 1);
    assert!(c.reveals.is_empty());
}

#[test]
fn option_change_reconstructs() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    let mut clock = 0.0;
    run_frames(&mut globe, &mut clock, 10);
    assert!(globe.composite_angle() > 0.0);

    // Same options: nothing happens
    globe.set_options(*globe.options()).unwrap();
    assert_eq!(counters.borrow().instances_created, 1);

    globe
        .set_options(GlobeOptions::new(64, false).unwrap())
        .unwrap();
    assert_eq!(globe.phase(), Phase::Running);
    assert!(!globe.config().dark_mode);
    assert_eq!(globe.composite_angle(), 0.0);
    let c = counters.borrow();
    assert_eq!(c.instances_created, 2);
    assert_eq!(c.instances_released, 1);
    assert_eq!(c.listeners_attached, 2);
    assert_eq!(c.listeners_detached, 1);
}

#[test]
fn invalid_options_are_rejected_in_place() {
    let mut globe = mounted(small_host());
    let bad = GlobeOptions {
        size: 0,
        dark_mode: true,
    };
    assert!(globe.set_options(bad).is_err());
    assert_eq!(globe.phase(), Phase::Running);
    assert_eq!(globe.options().size, 64);
}

#[test]
fn pointer_updates_cursor_through_host() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    assert_eq!(
        globe.pointer(PointerInput::Down { x: 10.0, y: 10.0 }),
        Some(Cursor::Grabbing)
    );
    globe.pointer(PointerInput::Move { x: 40.0, y: 10.0 });
    globe.pointer(PointerInput::Up);
    // Outside the surface
    globe.pointer(PointerInput::Down { x: 500.0, y: 10.0 });
    assert_eq!(
        counters.borrow().cursors,
        vec![Cursor::Grabbing, Cursor::Grab]
    );
}

#[test]
fn leaving_mid_drag_releases_and_resumes_auto_rotation() {
    let mut globe = mounted(small_host());
    let mut clock = 0.0;
    globe.pointer(PointerInput::Down { x: 10.0, y: 10.0 });
    globe.pointer(PointerInput::Move { x: 60.0, y: 10.0 });
    run_frames(&mut globe, &mut clock, 5);
    let frozen_auto = globe.rotation().auto_angle;
    assert!(globe.rotation().is_dragging);

    // A cancelled touch arrives as a leave too
    assert_eq!(globe.pointer(PointerInput::Leave), Some(Cursor::Grab));
    assert!(globe.motion().tracker().drag_delta().is_none());
    run_frames(&mut globe, &mut clock, 60);
    assert!(!globe.rotation().is_dragging);
    assert!(globe.rotation().auto_angle > frozen_auto);
    assert!(globe.rotation().drag_angle.abs() < 1e-3);
}

#[test]
fn repeated_reconstruction_balances_listeners() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    for i in 0..10 {
        globe
            .set_options(GlobeOptions::new(64, i % 2 == 1).unwrap())
            .unwrap();
    }
    globe.teardown();
    let c = counters.borrow();
    assert_eq!(c.listeners_attached, 11);
    assert_eq!(c.listeners_detached, 11);
    assert_eq!(c.instances_created, c.instances_released);
}

#[test]
fn pointer_is_ignored_when_unmounted() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = globe_with(host, GlobeOptions::new(64, true).unwrap());
    assert_eq!(globe.pointer(PointerInput::Down { x: 10.0, y: 10.0 }), None);
    assert!(counters.borrow().cursors.is_empty());
}

#[test]
fn mount_twice_is_a_no_op() {
    let host = small_host();
    let counters = host.counters();
    let mut globe = mounted(host);
    globe.mount().unwrap();
    assert_eq!(counters.borrow().instances_created, 1);
    assert_eq!(counters.borrow().listeners_attached, 1);
}
