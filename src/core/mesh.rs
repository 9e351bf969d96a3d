//! Geodesic sphere construction.
//!
//! The sphere is an icosahedron whose faces are split into an `n × n`
//! triangular lattice (`n = detail + 1`) and pushed out onto the sphere.
//! Facet sizes stay close to uniform across the whole surface, which keeps
//! the hover falloff looking the same near the poles as at the equator.

use glam::Vec3;

/// One triangular patch of the sphere surface.
#[derive(Clone, Debug)]
pub struct Facet {
    pub index: usize,
    /// Rest positions; never modified after construction.
    pub rest: [Vec3; 3],
    pub centroid: Vec3,
    /// Outward unit normal (the normalized rest centroid).
    pub normal: Vec3,
}

impl Facet {
    fn new(index: usize, rest: [Vec3; 3]) -> Self {
        let centroid = (rest[0] + rest[1] + rest[2]) / 3.0;
        Self {
            index,
            rest,
            centroid,
            normal: centroid.normalize_or_zero(),
        }
    }

    pub fn area(&self) -> f32 {
        0.5 * (self.rest[1] - self.rest[0])
            .cross(self.rest[2] - self.rest[0])
            .length()
    }
}

#[derive(Clone, Debug)]
pub struct GeodesicMesh {
    radius: f32,
    detail: u32,
    facets: Vec<Facet>,
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

impl GeodesicMesh {
    /// Facets produced at `detail` without building the mesh. Saturates
    /// instead of overflowing for out-of-range detail.
    #[inline]
    pub fn facet_count(detail: u32) -> usize {
        let n = (detail as usize).saturating_add(1);
        n.saturating_mul(n).saturating_mul(20)
    }

    pub fn new(radius: f32, detail: u32) -> Self {
        let corners = icosahedron_vertices();
        let n = detail as usize + 1;
        let mut facets = Vec::with_capacity(Self::facet_count(detail));

        for face in ICOSAHEDRON_FACES.iter() {
            let a = corners[face[0]];
            let b = corners[face[1]];
            let c = corners[face[2]];
            // Lattice point (i, j) sits at a + i/n·(b-a) + j/n·(c-a), projected to the sphere.
            let lattice = |i: usize, j: usize| -> Vec3 {
                let p = a + (b - a) * (i as f32 / n as f32) + (c - a) * (j as f32 / n as f32);
                p.normalize() * radius
            };
            for i in 0..n {
                for j in 0..(n - i) {
                    let up = [lattice(i, j), lattice(i + 1, j), lattice(i, j + 1)];
                    facets.push(Facet::new(facets.len(), up));
                    if i + j + 1 < n {
                        let down = [lattice(i + 1, j), lattice(i + 1, j + 1), lattice(i, j + 1)];
                        facets.push(Facet::new(facets.len(), down));
                    }
                }
            }
        }

        Self {
            radius,
            detail,
            facets,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn detail(&self) -> u32 {
        self.detail
    }

    #[inline]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_count_follows_detail() {
        for detail in 0..5 {
            let mesh = GeodesicMesh::new(1.0, detail);
            let n = detail as usize + 1;
            assert_eq!(mesh.len(), 20 * n * n, "detail {}", detail);
        }
        assert_eq!(GeodesicMesh::new(2.2, 6).len(), 980);
        assert_eq!(GeodesicMesh::facet_count(6), 980);
    }

    #[test]
    fn facet_count_saturates_for_huge_detail() {
        assert_eq!(GeodesicMesh::facet_count(u32::MAX), usize::MAX);
    }

    #[test]
    fn rest_vertices_lie_on_sphere() {
        let mesh = GeodesicMesh::new(2.2, 3);
        for f in mesh.facets() {
            for v in f.rest {
                assert!((v.length() - 2.2).abs() < 1e-4, "vertex off sphere: {}", v);
            }
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let mesh = GeodesicMesh::new(2.2, 4);
        for (i, f) in mesh.facets().iter().enumerate() {
            assert_eq!(f.index, i);
            assert!((f.normal.length() - 1.0).abs() < 1e-5);
            assert!(f.normal.dot(f.centroid) > 0.0);
        }
    }

    #[test]
    fn facets_are_near_uniform_and_cover_sphere() {
        let radius = 2.2;
        let mesh = GeodesicMesh::new(radius, 6);
        let areas: Vec<f32> = mesh.facets().iter().map(Facet::area).collect();
        let min = areas.iter().cloned().fold(f32::MAX, f32::min);
        let max = areas.iter().cloned().fold(0.0, f32::max);
        assert!(min > 0.0);
        assert!(max / min < 2.5, "area ratio {}", max / min);

        let total: f32 = areas.iter().sum();
        let sphere_area = 4.0 * std::f32::consts::PI * radius * radius;
        assert!((total - sphere_area).abs() / sphere_area < 0.03);
    }
}
