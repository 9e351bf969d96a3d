use super::animator::SceneVertex;
use super::constants::{PARTICLE_MIN_RADIUS, PARTICLE_RADIUS_SPAN};
use glam::Vec3;
use rand::prelude::*;

/// Background starfield: uniform directions, radius in [4, 16). Deterministic per seed.
pub fn scatter_particles(count: usize, seed: u64) -> Vec<SceneVertex> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let radius = PARTICLE_MIN_RADIUS + rng.gen::<f32>() * PARTICLE_RADIUS_SPAN;
            let theta = rng.gen_range(0.0..std::f32::consts::TAU);
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            let p = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            );
            SceneVertex::new(p, 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_fill_the_shell() {
        let pts = scatter_particles(500, 7);
        assert_eq!(pts.len(), 500);
        for p in &pts {
            let r = Vec3::from(p.position).length();
            assert!((3.999..16.001).contains(&r), "radius {}", r);
        }
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(scatter_particles(64, 42), scatter_particles(64, 42));
        assert_ne!(scatter_particles(64, 42), scatter_particles(64, 43));
    }
}
