//! Screen-space placement of the marker overlays.

use super::camera::{Camera, Viewport};
use super::constants::*;
use super::markers::Marker;
use glam::{Quat, Vec2, Vec3};

/// Everything an overlay surface needs to place one marker card and its indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTransform {
    /// Card top-left corner, container-local pixels.
    pub left: f32,
    pub top: f32,
    pub opacity: f32,
    pub scale: f32,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    pub z_index: i32,
    /// Card is shown and interactive.
    pub visible: bool,
    /// Indicator dot is highlighted.
    pub indicator_active: bool,
    /// Rotated z of the marker, toward the viewer is positive.
    pub depth: f32,
}

impl ScreenTransform {
    pub fn css_transform(&self) -> String {
        format!(
            "scale({:.4}) rotateY({:.3}deg) rotateX({:.3}deg)",
            self.scale, self.rotate_y_deg, self.rotate_x_deg
        )
    }
}

/// Receives per-frame marker placements. Implementations must be idempotent:
/// applying the same transform twice leaves the surface unchanged.
pub trait OverlaySink {
    /// Create one card and one indicator per marker, in index order.
    fn mount(&mut self, markers: &[Marker]);
    fn apply(&mut self, marker: usize, transform: &ScreenTransform);
}

/// Build one overlay entry per marker, all or nothing, so entry `i` always
/// belongs to marker `i`. On failure returns the index of the first marker
/// that could not be built.
pub fn build_aligned<T>(
    markers: &[Marker],
    mut build: impl FnMut(&Marker) -> Option<T>,
) -> Result<Vec<T>, usize> {
    let mut out = Vec::with_capacity(markers.len());
    for (i, marker) in markers.iter().enumerate() {
        out.push(build(marker).ok_or(i)?);
    }
    Ok(out)
}

/// Linear opacity ramp over rotated depth, 0 at or below the threshold.
#[inline]
pub fn depth_opacity(depth: f32) -> f32 {
    if depth <= MARKER_DEPTH_THRESHOLD {
        return 0.0;
    }
    if depth >= MARKER_OPAQUE_DEPTH {
        return 1.0;
    }
    (depth - MARKER_DEPTH_THRESHOLD) / (MARKER_OPAQUE_DEPTH - MARKER_DEPTH_THRESHOLD)
}

/// Stacking order; never decreases with depth, 1/20 unit resolution.
#[inline]
pub fn depth_z_index(depth: f32) -> i32 {
    ((depth + 5.0) * 20.0).floor() as i32
}

pub fn project_marker(
    marker: &Marker,
    rotation: Quat,
    camera: &Camera,
    viewport: &Viewport,
) -> ScreenTransform {
    let point: Vec3 = rotation * marker.local;
    let ndc = camera.project(point);
    let px = viewport.to_pixels(ndc.truncate());
    let offset: Vec2 = camera.class.card_offset();

    let opacity = depth_opacity(point.z);
    let depth_scale = 0.6 + (point.z / marker.radius) * 0.4;
    let scale = (depth_scale * camera.zoom_factor()).max(MARKER_MIN_SCALE);

    let horizontal = (point.x * point.x + point.z * point.z).sqrt();
    let rotate_y_deg = point.x.atan2(point.z).to_degrees() * CARD_TILT_Y;
    let rotate_x_deg = (-point.y).atan2(horizontal).to_degrees() * CARD_TILT_X;

    ScreenTransform {
        left: px.x - offset.x,
        top: px.y - offset.y,
        opacity,
        scale,
        rotate_x_deg,
        rotate_y_deg,
        z_index: depth_z_index(point.z),
        visible: opacity > MARKER_VISIBLE_OPACITY,
        indicator_active: opacity > INDICATOR_ACTIVE_OPACITY,
        depth: point.z,
    }
}
