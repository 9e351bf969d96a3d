//! Pointer hover: ray picking against the displayed facets and the
//! distance-weighted lift field around the hit.

use super::animator::{FacetState, SceneVertex};
use super::camera::Ray;
use super::constants::*;
use super::mesh::GeodesicMesh;
use glam::{Quat, Vec3};
use smallvec::SmallVec;

/// Neighbors of one facet within the hover radius, with their linear influence.
pub type Neighborhood = SmallVec<[(u32, f32); 32]>;

pub struct HoverResponder {
    neighbors: Vec<Neighborhood>,
    bound_radius: f32,
    hit: Option<usize>,
}

impl HoverResponder {
    /// Precompute every facet's neighborhood; rest centroids never move, so
    /// the per-frame work is bounded by one neighborhood.
    pub fn new(mesh: &GeodesicMesh) -> Self {
        let facets = mesh.facets();
        let neighbors = facets
            .iter()
            .map(|center| {
                facets
                    .iter()
                    .filter_map(|other| {
                        let distance = center.centroid.distance(other.centroid);
                        (distance < HOVER_RADIUS)
                            .then(|| (other.index as u32, 1.0 - distance / HOVER_RADIUS))
                    })
                    .collect()
            })
            .collect();
        Self {
            neighbors,
            // Rest radius plus the largest lift a facet can reach.
            bound_radius: mesh.radius() + HOVER_LIFT + HOVER_WOBBLE_AMPLITUDE + WAVE_AMPLITUDE,
            hit: None,
        }
    }

    #[inline]
    pub fn hit(&self) -> Option<usize> {
        self.hit
    }

    #[inline]
    pub fn neighborhood(&self, facet: usize) -> &[(u32, f32)] {
        &self.neighbors[facet]
    }

    /// Nearest displayed facet under a world-space ray, given the sphere rotation.
    pub fn pick(&self, ray: Ray, rotation: Quat, fill: &[SceneVertex]) -> Option<usize> {
        let inverse = rotation.inverse();
        let origin = inverse * ray.origin;
        let dir = inverse * ray.dir;
        ray_sphere(origin, dir, Vec3::ZERO, self.bound_radius)?;

        let mut best = None::<(usize, f32)>;
        for (i, tri) in fill.chunks_exact(3).enumerate() {
            let a = Vec3::from(tri[0].position);
            let b = Vec3::from(tri[1].position);
            let c = Vec3::from(tri[2].position);
            if let Some(t) = ray_triangle(origin, dir, a, b, c) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Rewrite every facet's target lift for this frame's hit.
    pub fn apply(&mut self, hit: Option<usize>, elapsed: f32, states: &mut [FacetState]) {
        self.hit = hit;
        for s in states.iter_mut() {
            s.target_lift = 0.0;
        }
        let Some(h) = hit else {
            return;
        };
        for &(j, influence) in self.neighbors[h].iter() {
            let wobble = (elapsed * HOVER_WOBBLE_RATE + j as f32).sin() * HOVER_WOBBLE_AMPLITUDE;
            states[j as usize].target_lift = influence * HOVER_LIFT + wobble * influence;
        }
    }
}

/// Distance along the ray to the first sphere crossing, if the ray enters it.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Double-sided Möller–Trumbore intersection.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t > EPS).then_some(t)
}
