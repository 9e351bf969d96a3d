// Host-side tests for the orbit controller: drag, focus, cooldowns and easing.

use glam::Vec3;
use portfolio_sphere::core::constants::*;
use portfolio_sphere::core::markers::layout_markers;
use portfolio_sphere::core::orbit::facing_angles;
use portfolio_sphere::core::{portfolio_projects, DragSource, OrbitController};

fn idle_orbit() -> OrbitController {
    let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
    orbit.set_auto_rotate(false);
    orbit
}

#[test]
fn auto_rotate_advances_target_each_tick() {
    let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
    assert!(orbit.auto_rotate());
    orbit.tick(0.0);
    assert!((orbit.target_yaw - AUTO_ROTATE_SPEED).abs() < 1e-9);
    orbit.tick(0.016);
    assert!((orbit.target_yaw - 2.0 * AUTO_ROTATE_SPEED).abs() < 1e-9);
    assert!(orbit.yaw > 0.0 && orbit.yaw < orbit.target_yaw);
}

#[test]
fn tick_is_idempotent_at_target() {
    let mut orbit = idle_orbit();
    orbit.tick(0.0);
    assert_eq!(orbit.yaw, 0.0);
    assert_eq!(orbit.pitch, 0.0);
}

#[test]
fn easing_converges_without_overshoot() {
    let mut orbit = idle_orbit();
    orbit.target_yaw = 1.0;
    orbit.target_pitch = -0.5;
    let mut last_gap = 1.0f32;
    for _ in 0..300 {
        orbit.tick(0.0);
        let gap = orbit.target_yaw - orbit.yaw;
        assert!(gap >= 0.0, "overshot by {}", -gap);
        assert!(gap <= last_gap);
        // Each step covers at most the smoothing fraction of the remaining distance.
        assert!(last_gap - gap <= ORBIT_SMOOTHING * last_gap + 1e-6);
        assert!(orbit.pitch >= -0.5);
        last_gap = gap;
    }
    assert!((orbit.yaw - 1.0).abs() < 1e-4);
    assert!((orbit.pitch + 0.5).abs() < 1e-4);
}

#[test]
fn drag_moves_target_and_clamps_pitch() {
    let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
    orbit.begin_drag(DragSource::Pointer, 100.0, 100.0);
    assert!(!orbit.auto_rotate());
    assert!(orbit.is_dragging());

    orbit.update_drag(DragSource::Pointer, 140.0, 100.0);
    assert!((orbit.target_yaw - 40.0 * POINTER_YAW_SENSITIVITY).abs() < 1e-6);

    orbit.update_drag(DragSource::Pointer, 140.0, 10_000.0);
    assert_eq!(orbit.target_pitch, DRAG_PITCH_LIMIT);
    orbit.update_drag(DragSource::Pointer, 140.0, -50_000.0);
    assert_eq!(orbit.target_pitch, -DRAG_PITCH_LIMIT);
}

#[test]
fn touch_drags_turn_faster_than_pointer_drags() {
    let mut pointer = OrbitController::new(AUTO_ROTATE_SPEED);
    pointer.begin_drag(DragSource::Pointer, 0.0, 0.0);
    pointer.update_drag(DragSource::Pointer, 100.0, 20.0);

    let mut touch = OrbitController::new(AUTO_ROTATE_SPEED);
    touch.begin_drag(DragSource::Touch, 0.0, 0.0);
    touch.update_drag(DragSource::Touch, 100.0, 20.0);

    assert!(touch.target_yaw > pointer.target_yaw);
    assert!(touch.target_pitch > pointer.target_pitch);
}

#[test]
fn drag_ignores_events_from_other_source() {
    let mut orbit = idle_orbit();
    orbit.begin_drag(DragSource::Touch, 0.0, 0.0);
    orbit.update_drag(DragSource::Pointer, 500.0, 500.0);
    assert_eq!(orbit.target_yaw, 0.0);
    assert_eq!(orbit.target_pitch, 0.0);
}

#[test]
fn update_without_drag_is_noop() {
    let mut orbit = idle_orbit();
    orbit.update_drag(DragSource::Pointer, 500.0, 500.0);
    assert_eq!(orbit.target_yaw, 0.0);
    assert!(!orbit.end_drag(1.0));
    assert_eq!(orbit.resume_at(), None);
}

#[test]
fn auto_rotate_resumes_two_seconds_after_drag() {
    let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
    orbit.begin_drag(DragSource::Pointer, 0.0, 0.0);
    assert!(orbit.end_drag(10.0));
    assert_eq!(orbit.resume_at(), Some(10.0 + DRAG_RESUME_DELAY_SEC));

    orbit.tick(11.9);
    assert!(!orbit.auto_rotate());
    orbit.tick(12.0);
    assert!(orbit.auto_rotate());
    assert_eq!(orbit.resume_at(), None);
}

#[test]
fn new_drag_cancels_pending_resume() {
    let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
    orbit.begin_drag(DragSource::Pointer, 0.0, 0.0);
    orbit.end_drag(0.0);
    orbit.begin_drag(DragSource::Pointer, 0.0, 0.0);
    assert_eq!(orbit.resume_at(), None);
    orbit.tick(5.0);
    assert!(!orbit.auto_rotate());
}

#[test]
fn focus_clamps_pitch_and_holds_for_five_seconds() {
    let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
    orbit.focus(Vec3::new(0.0, 5.0, 0.1), 3.0);
    assert_eq!(orbit.target_pitch, FOCUS_PITCH_LIMIT);
    assert!(!orbit.auto_rotate());
    assert_eq!(orbit.resume_at(), Some(3.0 + FOCUS_RESUME_DELAY_SEC));

    orbit.tick(7.99);
    assert!(!orbit.auto_rotate());
    orbit.tick(8.0);
    assert!(orbit.auto_rotate());

    orbit.focus(Vec3::new(0.0, -5.0, 0.1), 0.0);
    assert_eq!(orbit.target_pitch, -FOCUS_PITCH_LIMIT);
}

#[test]
fn focused_marker_ends_up_facing_the_camera() {
    let markers = layout_markers(&portfolio_projects(), SPHERE_RADIUS + MARKER_LIFT);
    for marker in &markers {
        let mut orbit = OrbitController::new(AUTO_ROTATE_SPEED);
        // Spin a few turns first so the focus has to pick the nearest turn.
        orbit.target_yaw = 9.0;
        orbit.yaw = 9.0;
        orbit.focus(marker.local, 0.0);
        assert!((orbit.target_yaw - 9.0).abs() <= std::f32::consts::PI + 1e-4);
        for _ in 0..400 {
            orbit.tick(1.0);
        }
        let facing = orbit.rotation() * marker.local;
        assert!(
            facing.z > 0.999 * marker.radius,
            "marker {} ends at {}",
            marker.index,
            facing
        );
    }
}

#[test]
fn facing_angles_point_at_positive_z() {
    let (yaw, pitch) = facing_angles(Vec3::new(0.0, 0.0, 2.0));
    assert!(yaw.abs() < 1e-6);
    assert!(pitch.abs() < 1e-6);
    let (yaw, _) = facing_angles(Vec3::new(2.0, 0.0, 0.0));
    assert!((yaw + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn long_sessions_keep_yaw_bounded() {
    let tau = std::f32::consts::TAU;
    let mut orbit = OrbitController::new(0.05);
    for _ in 0..10_000 {
        orbit.tick(0.0);
        assert!(orbit.yaw.abs() <= tau + 0.1, "yaw {}", orbit.yaw);
        // Target leads yaw by the steady-state easing lag.
        assert!(orbit.target_yaw.abs() <= tau + 1.1, "target {}", orbit.target_yaw);
    }
}

#[test]
fn rotation_applies_yaw_before_pitch() {
    let mut orbit = idle_orbit();
    orbit.yaw = 0.7;
    orbit.pitch = 0.3;
    let v = Vec3::new(0.4, -1.1, 2.0);
    let expected = glam::Quat::from_rotation_x(0.3) * (glam::Quat::from_rotation_y(0.7) * v);
    assert!((orbit.rotation() * v - expected).length() < 1e-5);

    // The markers' order differs from pitch-first for a general point.
    let pitch_first = glam::Quat::from_rotation_y(0.7) * (glam::Quat::from_rotation_x(0.3) * v);
    assert!((orbit.rotation() * v - pitch_first).length() > 1e-3);
}
