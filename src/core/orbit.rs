//! Orbit controller: drag, focus, and idle auto-rotation of the sphere.
//!
//! Input handlers only move the *target* angles; `tick` eases the current
//! angles toward them once per frame. Auto-rotate suspension is a deadline
//! checked on tick, so a later drag or focus simply replaces it.

use super::constants::*;
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Touch,
}

impl DragSource {
    #[inline]
    fn sensitivity(self) -> (f32, f32) {
        match self {
            Self::Pointer => (POINTER_YAW_SENSITIVITY, POINTER_PITCH_SENSITIVITY),
            Self::Touch => (TOUCH_YAW_SENSITIVITY, TOUCH_PITCH_SENSITIVITY),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    source: DragSource,
    last: [f32; 2],
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    pub pitch: f32,
    pub yaw: f32,
    pub target_pitch: f32,
    pub target_yaw: f32,
    auto_rotate: bool,
    auto_rotate_speed: f32,
    resume_at: Option<f64>,
    drag: Option<Drag>,
}

impl OrbitController {
    pub fn new(auto_rotate_speed: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            target_pitch: 0.0,
            target_yaw: 0.0,
            auto_rotate: true,
            auto_rotate_speed,
            resume_at: None,
            drag: None,
        }
    }

    #[inline]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    #[inline]
    pub fn auto_rotate_speed(&self) -> f32 {
        self.auto_rotate_speed
    }

    /// When a suspended auto-rotation will resume, if one is pending.
    #[inline]
    pub fn resume_at(&self) -> Option<f64> {
        self.resume_at
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
        self.resume_at = None;
    }

    pub fn begin_drag(&mut self, source: DragSource, x: f32, y: f32) {
        self.auto_rotate = false;
        self.resume_at = None;
        self.drag = Some(Drag {
            source,
            last: [x, y],
        });
    }

    /// Apply movement since the previous drag update. No-op when not dragging
    /// or when the event comes from a different source than the drag.
    pub fn update_drag(&mut self, source: DragSource, x: f32, y: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if drag.source != source {
            return;
        }
        let (yaw_k, pitch_k) = source.sensitivity();
        let dx = x - drag.last[0];
        let dy = y - drag.last[1];
        drag.last = [x, y];
        self.target_yaw += dx * yaw_k;
        self.target_pitch =
            (self.target_pitch + dy * pitch_k).clamp(-DRAG_PITCH_LIMIT, DRAG_PITCH_LIMIT);
    }

    /// Ends a drag; auto-rotation resumes after the cooldown. Returns whether a drag was active.
    pub fn end_drag(&mut self, now: f64) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        self.resume_at = Some(now + DRAG_RESUME_DELAY_SEC);
        true
    }

    /// Aim the sphere so `local` faces the camera, then hold for the focus cooldown.
    pub fn focus(&mut self, local: Vec3, now: f64) {
        let (yaw, pitch) = facing_angles(local);
        self.target_yaw = self.nearest_turn(yaw);
        self.target_pitch = pitch;
        self.auto_rotate = false;
        self.resume_at = Some(now + FOCUS_RESUME_DELAY_SEC);
    }

    /// One frame of motion: resume check, auto-rotation drift, then easing.
    pub fn tick(&mut self, now: f64) {
        if let Some(at) = self.resume_at {
            if now >= at {
                self.auto_rotate = true;
                self.resume_at = None;
            }
        }
        if self.auto_rotate {
            self.target_yaw += self.auto_rotate_speed;
        }
        self.pitch += (self.target_pitch - self.pitch) * ORBIT_SMOOTHING;
        self.yaw += (self.target_yaw - self.yaw) * ORBIT_SMOOTHING;

        // Shift both angles by whole turns so long sessions keep f32 precision.
        if self.target_yaw > TAU && self.yaw > TAU {
            self.target_yaw -= TAU;
            self.yaw -= TAU;
        } else if self.target_yaw < -TAU && self.yaw < -TAU {
            self.target_yaw += TAU;
            self.yaw += TAU;
        }
    }

    /// Rigid rotation shared by the mesh and the marker positions, `Rx(pitch)·Ry(yaw)`.
    ///
    /// Yaw spins the sphere about its own axis and pitch tilts the result
    /// about the screen's horizontal axis, so vertical drags always tilt
    /// toward the viewer whatever the current yaw. Markers go through this
    /// same quaternion, so cards follow the mesh's Euler order exactly.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }

    /// The equivalent of `yaw` within half a turn of the current target, so
    /// focusing never spins the long way round.
    fn nearest_turn(&self, yaw: f32) -> f32 {
        let turns = ((self.target_yaw - yaw) / TAU).round();
        yaw + turns * TAU
    }
}

/// Yaw and pitch that bring a sphere-local point toward the camera on +Z.
///
/// Yaw comes from the point's horizontal direction, pitch from its height
/// over the horizontal distance, clamped to avoid extreme tilt.
pub fn facing_angles(local: Vec3) -> (f32, f32) {
    let yaw = -local.x.atan2(local.z);
    let horizontal = (local.x * local.x + local.z * local.z).sqrt();
    let pitch = local
        .y
        .atan2(horizontal)
        .clamp(-FOCUS_PITCH_LIMIT, FOCUS_PITCH_LIMIT);
    (yaw, pitch)
}
