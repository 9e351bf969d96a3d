//! Per-frame facet displacement and the render buffers it writes.

use super::constants::*;
use super::mesh::GeodesicMesh;
use super::theme::Palette;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex layout shared by the facet, edge and particle draws.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub alpha: f32,
}

impl SceneVertex {
    #[inline]
    pub fn new(position: Vec3, alpha: f32) -> Self {
        Self {
            position: position.to_array(),
            alpha,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FacetState {
    pub lift: f32,
    pub target_lift: f32,
    pub opacity: f32,
    pub edge_opacity: f32,
}

/// Owns the displaced geometry: three fill vertices and three edge segments per facet.
pub struct FacetAnimator {
    states: Vec<FacetState>,
    fill: Vec<SceneVertex>,
    edges: Vec<SceneVertex>,
}

impl FacetAnimator {
    pub fn new(mesh: &GeodesicMesh, palette: &Palette) -> Self {
        let count = mesh.len();
        let mut animator = Self {
            states: vec![FacetState::default(); count],
            fill: vec![SceneVertex::default(); count * 3],
            edges: vec![SceneVertex::default(); count * 6],
        };
        for (i, facet) in mesh.facets().iter().enumerate() {
            animator.write_facet(i, facet.rest, palette.facet_opacity, palette.edge_opacity);
            animator.states[i].opacity = palette.facet_opacity;
            animator.states[i].edge_opacity = palette.edge_opacity;
        }
        animator
    }

    #[inline]
    pub fn states(&self) -> &[FacetState] {
        &self.states
    }

    #[inline]
    pub fn states_mut(&mut self) -> &mut [FacetState] {
        &mut self.states
    }

    #[inline]
    pub fn fill(&self) -> &[SceneVertex] {
        &self.fill
    }

    #[inline]
    pub fn edges(&self) -> &[SceneVertex] {
        &self.edges
    }

    /// Ambient wave offset of facet `index` at `elapsed` seconds.
    #[inline]
    pub fn wave(elapsed: f32, index: usize) -> f32 {
        (elapsed * WAVE_RATE + index as f32 * WAVE_PHASE_PER_FACET).sin() * WAVE_AMPLITUDE
    }

    /// Ease lifts toward their targets and rewrite both buffers in place.
    pub fn step(&mut self, mesh: &GeodesicMesh, elapsed: f32, palette: &Palette) {
        for (i, facet) in mesh.facets().iter().enumerate() {
            let (offset, opacity, edge_opacity) = {
                let s = &mut self.states[i];
                s.lift += (s.target_lift - s.lift) * LIFT_SMOOTHING;
                s.opacity = palette.facet_opacity + s.lift * FACET_OPACITY_PER_LIFT;
                s.edge_opacity =
                    (palette.edge_opacity + s.lift * EDGE_OPACITY_PER_LIFT).clamp(0.0, 1.0);
                (
                    facet.normal * (s.lift + Self::wave(elapsed, i)),
                    s.opacity,
                    s.edge_opacity,
                )
            };
            let displaced = [
                facet.rest[0] + offset,
                facet.rest[1] + offset,
                facet.rest[2] + offset,
            ];
            self.write_facet(i, displaced, opacity, edge_opacity);
        }
    }

    /// Re-alpha every facet for a new palette without moving anything.
    pub fn recolor(&mut self, palette: &Palette) {
        for i in 0..self.states.len() {
            let s = &mut self.states[i];
            s.opacity = palette.facet_opacity + s.lift * FACET_OPACITY_PER_LIFT;
            s.edge_opacity = (palette.edge_opacity + s.lift * EDGE_OPACITY_PER_LIFT).clamp(0.0, 1.0);
            let (opacity, edge_opacity) = (s.opacity, s.edge_opacity);
            for v in &mut self.fill[i * 3..i * 3 + 3] {
                v.alpha = opacity;
            }
            for v in &mut self.edges[i * 6..i * 6 + 6] {
                v.alpha = edge_opacity;
            }
        }
    }

    fn write_facet(&mut self, i: usize, v: [Vec3; 3], opacity: f32, edge_opacity: f32) {
        let fill = &mut self.fill[i * 3..i * 3 + 3];
        for (slot, p) in fill.iter_mut().zip(v) {
            *slot = SceneVertex::new(p, opacity);
        }
        // Outline segments: v0-v1, v1-v2, v2-v0.
        let edges = &mut self.edges[i * 6..i * 6 + 6];
        for (k, pair) in edges.chunks_exact_mut(2).enumerate() {
            pair[0] = SceneVertex::new(v[k], edge_opacity);
            pair[1] = SceneVertex::new(v[(k + 1) % 3], edge_opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;

    #[test]
    fn buffers_never_reallocate() {
        let mesh = GeodesicMesh::new(2.2, 2);
        let palette = Theme::Dark.palette();
        let mut anim = FacetAnimator::new(&mesh, &palette);
        let fill_ptr = anim.fill().as_ptr();
        let edge_ptr = anim.edges().as_ptr();
        for s in anim.states_mut() {
            s.target_lift = 0.1;
        }
        for frame in 0..10 {
            anim.step(&mesh, frame as f32 / 60.0, &palette);
        }
        assert_eq!(anim.fill().as_ptr(), fill_ptr);
        assert_eq!(anim.edges().as_ptr(), edge_ptr);
        assert_eq!(anim.fill().len(), mesh.len() * 3);
        assert_eq!(anim.edges().len(), mesh.len() * 6);
    }

    #[test]
    fn lift_eases_and_displaces_along_normal() {
        let mesh = GeodesicMesh::new(2.2, 1);
        let palette = Theme::Dark.palette();
        let mut anim = FacetAnimator::new(&mesh, &palette);
        anim.states_mut()[3].target_lift = 0.1;
        anim.step(&mesh, 0.0, &palette);

        let lift = anim.states()[3].lift;
        assert!((lift - 0.01).abs() < 1e-6);

        let facet = &mesh.facets()[3];
        let expected = lift + FacetAnimator::wave(0.0, 3);
        for k in 0..3 {
            let p = Vec3::from(anim.fill()[9 + k].position);
            let moved = (p - facet.rest[k]).dot(facet.normal);
            assert!((moved - expected).abs() < 1e-5);
        }
        assert!(anim.states()[3].opacity > palette.facet_opacity);
        assert!(anim.states()[3].edge_opacity > palette.edge_opacity);
    }

    #[test]
    fn edges_track_displaced_vertices() {
        let mesh = GeodesicMesh::new(2.2, 1);
        let palette = Theme::Light.palette();
        let mut anim = FacetAnimator::new(&mesh, &palette);
        anim.states_mut()[0].target_lift = 0.2;
        anim.step(&mesh, 1.3, &palette);
        let fill = anim.fill();
        let edges = anim.edges();
        assert_eq!(edges[0].position, fill[0].position);
        assert_eq!(edges[1].position, fill[1].position);
        assert_eq!(edges[2].position, fill[1].position);
        assert_eq!(edges[3].position, fill[2].position);
        assert_eq!(edges[4].position, fill[2].position);
        assert_eq!(edges[5].position, fill[0].position);
    }
}
