//! Marker placement on the sphere surface.
//!
//! Markers use a golden-angle (Fibonacci) spiral so any number of projects
//! spreads evenly without relaxation. Positions are local to the sphere and
//! rotate rigidly with it.

use super::projects::Project;
use glam::Vec3;
use std::f32::consts::PI;

#[derive(Clone, Debug)]
pub struct Marker {
    pub index: usize,
    pub project: Project,
    /// Fixed sphere-local position.
    pub local: Vec3,
    /// Outward unit normal at `local`.
    pub normal: Vec3,
    pub radius: f32,
}

/// Position of marker `index` out of `count` on a sphere of `radius`.
#[inline]
pub fn fibonacci_point(index: usize, count: usize, radius: f32) -> Vec3 {
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let i = index as f32 + 0.5;
    let phi = (1.0 - 2.0 * i / count as f32).clamp(-1.0, 1.0).acos();
    let theta = 2.0 * PI * i / golden_ratio;
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| fibonacci_point(i, count, radius))
        .collect()
}

/// Place one marker per project, in list order.
pub fn layout_markers(projects: &[Project], radius: f32) -> Vec<Marker> {
    let count = projects.len();
    projects
        .iter()
        .enumerate()
        .map(|(index, project)| {
            let local = fibonacci_point(index, count, radius);
            Marker {
                index,
                project: project.clone(),
                local,
                normal: local.normalize_or_zero(),
                radius,
            }
        })
        .collect()
}

/// Smallest angle (radians) between any two points, as seen from the origin.
pub fn min_angular_separation(points: &[Vec3]) -> f32 {
    let mut best = PI;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let cos = a.normalize().dot(b.normalize()).clamp(-1.0, 1.0);
            best = best.min(cos.acos());
        }
    }
    best
}
