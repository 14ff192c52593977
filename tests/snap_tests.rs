// Host-side tests for the connector snap animation.

use parts_core::*;

const EPS: f32 = 1e-4;

#[test]
fn easing_endpoints_and_midpoint() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < EPS);
    assert!((ease_in_out_cubic(1.0) - 1.0).abs() < EPS);
    assert!(ease_in_out_cubic(0.25) < 0.25);
    assert!(ease_in_out_cubic(0.75) > 0.75);
}

#[test]
fn phase_boundaries() {
    assert_eq!(phase_at(0.0), SnapPhase::Approaching);
    assert_eq!(phase_at(0.599), SnapPhase::Approaching);
    assert_eq!(phase_at(0.6), SnapPhase::Holding);
    assert_eq!(phase_at(0.699), SnapPhase::Holding);
    assert_eq!(phase_at(0.7), SnapPhase::Disconnecting);
    assert_eq!(phase_at(1.0), SnapPhase::Disconnecting);
}

#[test]
fn depth_profile() {
    assert!((depth_at(0.0) - SNAP_START_DEPTH).abs() < EPS);
    assert!((depth_at(0.3) - 6.65).abs() < 1e-3);
    assert!((depth_at(0.65) - SNAP_MATED_DEPTH).abs() < EPS);
    assert!((depth_at(0.85) - 6.65).abs() < 1e-3);
    assert!((depth_at(1.0) - SNAP_START_DEPTH).abs() < EPS);
}

#[test]
fn phase_and_depth_from_elapsed_time() {
    let (phase, depth) = phase_and_depth(1.3, SNAP_DURATION_SEC);
    assert_eq!(phase, SnapPhase::Holding);
    assert!((depth - SNAP_MATED_DEPTH).abs() < EPS);
    // Time past the end clamps to the final position.
    let (phase, depth) = phase_and_depth(5.0, SNAP_DURATION_SEC);
    assert_eq!(phase, SnapPhase::Disconnecting);
    assert!((depth - SNAP_START_DEPTH).abs() < EPS);
}

#[test]
fn initial_cycle_waits_one_second() {
    let clock = ManualClock::new(10.0);
    let mut driver = SnapDriver::new(clock);
    driver.schedule_initial(true);
    assert_eq!(driver.animation().restart_due(), Some(11.0));

    driver.clock().advance(0.5);
    assert!(driver.tick(true).is_none());
    assert_eq!(driver.animation().play_count(), 0);

    driver.clock().advance(0.5);
    let frame = driver.tick(true).expect("cycle started");
    assert_eq!(frame.phase, SnapPhase::Approaching);
    assert_eq!(driver.animation().play_count(), 1);
    assert!(driver.animation().is_playing());
}

#[test]
fn cycle_completes_then_loops_after_pause() {
    let mut anim = SnapAnimation::new();
    anim.schedule_initial(0.0, true);
    assert!(anim.update(1.0, true).is_some());

    let done = anim.update(3.0, true).expect("final frame");
    assert!(done.completed);
    assert!(!anim.is_playing());
    assert_eq!(anim.restart_due(), Some(5.0));
    assert_eq!(anim.phase(3.5), SnapPhase::Idle);

    assert!(anim.update(4.9, true).is_none());
    let frame = anim.update(5.0, true).expect("second cycle");
    assert_eq!(anim.play_count(), 2);
    assert!((frame.depth - SNAP_START_DEPTH).abs() < EPS);
}

#[test]
fn stalled_frames_resume_at_the_right_phase() {
    let mut anim = SnapAnimation::new();
    anim.schedule_initial(0.0, true);
    anim.update(1.0, true);
    // No frames for 1.3 s: phase is derived from absolute time.
    let frame = anim.update(2.3, true).expect("playing");
    assert_eq!(frame.phase, SnapPhase::Holding);
    assert!((anim.depth() - SNAP_MATED_DEPTH).abs() < EPS);
}

#[test]
fn late_first_tick_starts_a_fresh_cycle() {
    let mut anim = SnapAnimation::new();
    anim.schedule_initial(0.0, true);
    assert_eq!(anim.restart_due(), Some(1.0));

    // The tab was hidden for half a minute; the cycle begins now.
    let frame = anim.update(30.0, true).expect("cycle started");
    assert_eq!(frame.phase, SnapPhase::Approaching);
    assert!(!frame.completed);
    assert_eq!(anim.state().start_time, 30.0);
    assert_eq!(anim.play_count(), 1);
    assert!((frame.depth - SNAP_START_DEPTH).abs() < EPS);

    let frame = anim.update(31.3, true).expect("playing");
    assert_eq!(frame.phase, SnapPhase::Holding);
}

#[test]
fn late_restart_after_pause_uses_tick_time() {
    let mut anim = SnapAnimation::new();
    anim.schedule_initial(0.0, true);
    anim.update(1.0, true);
    anim.update(3.0, true).expect("final frame");
    assert_eq!(anim.restart_due(), Some(5.0));

    let frame = anim.update(12.0, true).expect("second cycle");
    assert_eq!(frame.phase, SnapPhase::Approaching);
    assert_eq!(anim.state().start_time, 12.0);
    assert_eq!(anim.play_count(), 2);
}

#[test]
fn missing_half_keeps_animation_idle() {
    let mut anim = SnapAnimation::new();
    anim.schedule_initial(0.0, false);
    assert_eq!(anim.restart_due(), None);
    assert!(anim.update(10.0, false).is_none());
    assert_eq!(anim.play_count(), 0);
    assert_eq!(anim.phase(10.0), SnapPhase::Idle);
}

#[test]
fn scheduling_twice_does_not_double_start() {
    let mut anim = SnapAnimation::new();
    anim.schedule_initial(0.0, true);
    anim.schedule_initial(0.5, true);
    assert_eq!(anim.restart_due(), Some(1.0));
}
