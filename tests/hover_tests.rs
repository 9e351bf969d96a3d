// Host-side tests for hover picking, the lift field and facet animation.

use glam::{Quat, Vec2, Vec3};
use portfolio_sphere::core::constants::*;
use portfolio_sphere::core::{
    Camera, FacetAnimator, FacetState, GeodesicMesh, HoverResponder, Ray, Theme, Viewport,
};

fn scene() -> (GeodesicMesh, HoverResponder, FacetAnimator) {
    let mesh = GeodesicMesh::new(SPHERE_RADIUS, SPHERE_DETAIL);
    let hover = HoverResponder::new(&mesh);
    let animator = FacetAnimator::new(&mesh, &Theme::Dark.palette());
    (mesh, hover, animator)
}

fn desktop_camera() -> Camera {
    Camera::for_viewport(&Viewport::new(1280.0, 800.0, 800.0, 600.0))
}

#[test]
fn ray_through_sphere_hits_front_facet() {
    let (mesh, hover, animator) = scene();
    let ray = desktop_camera().ray_through(Vec2::new(0.07, 0.05));
    let hit = hover
        .pick(ray, Quat::IDENTITY, animator.fill())
        .expect("ray through the sphere should hit a facet");
    assert!(mesh.facets()[hit].centroid.z > 0.0, "picked a back facet");
}

#[test]
fn pick_accounts_for_sphere_rotation() {
    let (mesh, hover, animator) = scene();
    let ray = desktop_camera().ray_through(Vec2::new(0.07, 0.05));
    let rotation = Quat::from_rotation_y(std::f32::consts::PI);
    let hit = hover.pick(ray, rotation, animator.fill()).unwrap();
    // Half a turn brings the local back hemisphere to the front.
    assert!(mesh.facets()[hit].centroid.z < 0.0);
}

#[test]
fn ray_missing_the_sphere_picks_nothing() {
    let (_, hover, animator) = scene();
    let ray = Ray {
        origin: Vec3::new(10.0, 0.0, 6.0),
        dir: Vec3::NEG_Z,
    };
    assert_eq!(hover.pick(ray, Quat::IDENTITY, animator.fill()), None);
}

#[test]
fn lift_field_is_local_to_the_hit() {
    let (mesh, mut hover, _) = scene();
    let mut states = vec![FacetState::default(); mesh.len()];
    let hit = 123;
    let elapsed = 2.5f32;
    hover.apply(Some(hit), elapsed, &mut states);
    assert_eq!(hover.hit(), Some(hit));

    let center = mesh.facets()[hit].centroid;
    for (i, facet) in mesh.facets().iter().enumerate() {
        if facet.centroid.distance(center) >= HOVER_RADIUS {
            assert_eq!(states[i].target_lift, 0.0, "facet {} outside the radius moved", i);
        }
    }
    let wobble = (elapsed * HOVER_WOBBLE_RATE + hit as f32).sin() * HOVER_WOBBLE_AMPLITUDE;
    assert!((states[hit].target_lift - (HOVER_LIFT + wobble)).abs() < 1e-6);
}

#[test]
fn no_hit_settles_every_target_to_zero() {
    let (mesh, mut hover, _) = scene();
    let mut states = vec![FacetState::default(); mesh.len()];
    hover.apply(Some(10), 0.0, &mut states);
    assert!(states.iter().any(|s| s.target_lift != 0.0));
    hover.apply(None, 0.1, &mut states);
    assert_eq!(hover.hit(), None);
    assert!(states.iter().all(|s| s.target_lift == 0.0));
}

#[test]
fn lifted_facets_move_outward_and_brighten() {
    let (mesh, mut hover, mut animator) = scene();
    let palette = Theme::Dark.palette();
    let hit = 42;
    for frame in 0..120 {
        let elapsed = frame as f32 / 60.0;
        hover.apply(Some(hit), elapsed, animator.states_mut());
        animator.step(&mesh, elapsed, &palette);
    }
    let state = animator.states()[hit];
    assert!(state.lift > 0.05, "lift {}", state.lift);
    assert!(state.opacity > palette.facet_opacity);
    assert!(state.edge_opacity > palette.edge_opacity);

    let rest = mesh.facets()[hit].centroid.length();
    let fill = animator.fill();
    let shown = (Vec3::from(fill[hit * 3].position)
        + Vec3::from(fill[hit * 3 + 1].position)
        + Vec3::from(fill[hit * 3 + 2].position))
        / 3.0;
    assert!(shown.length() > rest + 0.04);
}

#[test]
fn animation_keeps_buffer_sizes() {
    let (mesh, mut hover, mut animator) = scene();
    let palette = Theme::Light.palette();
    let fill_ptr = animator.fill().as_ptr();
    let edge_ptr = animator.edges().as_ptr();
    for frame in 0..30 {
        hover.apply(Some(frame * 7), frame as f32 * 0.016, animator.states_mut());
        animator.step(&mesh, frame as f32 * 0.016, &palette);
    }
    assert_eq!(animator.fill().len(), mesh.len() * 3);
    assert_eq!(animator.edges().len(), mesh.len() * 6);
    assert_eq!(animator.fill().as_ptr(), fill_ptr);
    assert_eq!(animator.edges().as_ptr(), edge_ptr);
}
