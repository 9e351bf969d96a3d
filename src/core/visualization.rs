//! The sphere aggregate: owns every component and runs the frame pipeline.

use super::animator::{FacetAnimator, SceneVertex};
use super::camera::{Camera, Viewport};
use super::config::SphereConfig;
use super::error::SphereError;
use super::hover::HoverResponder;
use super::markers::{layout_markers, Marker};
use super::mesh::GeodesicMesh;
use super::orbit::{DragSource, OrbitController};
use super::particles::scatter_particles;
use super::projector::{project_marker, OverlaySink, ScreenTransform};
use super::projects::Project;
use super::scheduler::{FrameGate, FrameState};
use super::theme::{Palette, Theme};
use glam::{Mat4, Vec2};

/// One frame's worth of draw data, borrowed from the visualization.
pub struct SceneFrame<'a> {
    pub view_proj: Mat4,
    /// Sphere rotation; particles are drawn untransformed.
    pub model: Mat4,
    pub palette: &'a Palette,
    pub fill: &'a [SceneVertex],
    pub edges: &'a [SceneVertex],
    pub particles: &'a [SceneVertex],
}

pub trait SceneRenderer {
    /// Backing-store size in device pixels.
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, frame: &SceneFrame<'_>);
}

pub struct SphereVisualization<R: SceneRenderer, O: OverlaySink> {
    config: SphereConfig,
    mesh: GeodesicMesh,
    markers: Vec<Marker>,
    orbit: OrbitController,
    hover: HoverResponder,
    animator: FacetAnimator,
    particles: Vec<SceneVertex>,
    camera: Camera,
    viewport: Viewport,
    theme: Theme,
    palette: Palette,
    gate: FrameGate,
    pointer_ndc: Option<Vec2>,
    started_at: f64,
    transforms: Vec<ScreenTransform>,
    frames: u64,
    renderer: R,
    overlay: O,
}

impl<R: SceneRenderer, O: OverlaySink> SphereVisualization<R, O> {
    pub fn new(
        config: SphereConfig,
        projects: &[Project],
        viewport: Viewport,
        theme: Theme,
        now: f64,
        mut renderer: R,
        mut overlay: O,
    ) -> Result<Self, SphereError> {
        config.validate()?;
        let palette = theme.palette();
        let mesh = GeodesicMesh::new(config.radius, config.detail);
        let hover = HoverResponder::new(&mesh);
        let animator = FacetAnimator::new(&mesh, &palette);
        let markers = layout_markers(projects, config.marker_radius());
        let particles = scatter_particles(config.particle_count, config.particle_seed);
        let camera = Camera::for_viewport(&viewport);

        overlay.mount(&markers);
        let (w, h) = viewport.backing_size();
        renderer.resize(w, h);

        log::info!(
            "[sphere] facets={} markers={} particles={} view={:?}",
            mesh.len(),
            markers.len(),
            particles.len(),
            camera.class
        );

        Ok(Self {
            orbit: OrbitController::new(config.auto_rotate_speed),
            transforms: Vec::with_capacity(markers.len()),
            config,
            mesh,
            markers,
            hover,
            animator,
            particles,
            camera,
            viewport,
            theme,
            palette,
            gate: FrameGate::default(),
            pointer_ndc: None,
            started_at: now,
            frames: 0,
            renderer,
            overlay,
        })
    }

    // ---------------- Accessors ----------------

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    pub fn mesh(&self) -> &GeodesicMesh {
        &self.mesh
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitController {
        &mut self.orbit
    }

    pub fn hover(&self) -> &HoverResponder {
        &self.hover
    }

    pub fn animator(&self) -> &FacetAnimator {
        &self.animator
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn frame_state(&self) -> FrameState {
        self.gate.state()
    }

    /// Transforms computed by the most recent active frame.
    pub fn transforms(&self) -> &[ScreenTransform] {
        &self.transforms
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    // ---------------- External signals ----------------

    pub fn resize(&mut self, viewport: Viewport) {
        let previous = self.camera.class;
        self.viewport = viewport;
        self.camera = Camera::for_viewport(&viewport);
        let (w, h) = viewport.backing_size();
        self.renderer.resize(w, h);
        if previous != self.camera.class {
            log::debug!("[sphere] view {:?} -> {:?}", previous, self.camera.class);
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.palette = theme.palette();
        self.animator.recolor(&self.palette);
        log::debug!("[sphere] theme {:?}", theme);
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.gate.set_visible(visible) {
            log::debug!("[sphere] frame state {:?}", self.gate.state());
        }
    }

    // ---------------- Input ----------------

    /// Pointer moved to a container-local pixel position.
    pub fn pointer_move(&mut self, local: Vec2) {
        self.pointer_ndc = Some(self.viewport.to_ndc(local));
        self.orbit.update_drag(DragSource::Pointer, local.x, local.y);
    }

    pub fn pointer_down(&mut self, local: Vec2) {
        self.pointer_ndc = Some(self.viewport.to_ndc(local));
        self.orbit.begin_drag(DragSource::Pointer, local.x, local.y);
    }

    pub fn pointer_up(&mut self, now: f64) {
        self.orbit.end_drag(now);
    }

    pub fn pointer_leave(&mut self, now: f64) {
        self.orbit.end_drag(now);
        self.pointer_ndc = None;
    }

    /// Only single-finger gestures rotate the sphere.
    pub fn touch_start(&mut self, local: Vec2, touches: u32) {
        if touches != 1 {
            return;
        }
        self.orbit.begin_drag(DragSource::Touch, local.x, local.y);
    }

    pub fn touch_move(&mut self, local: Vec2, touches: u32) {
        if touches != 1 {
            return;
        }
        self.orbit.update_drag(DragSource::Touch, local.x, local.y);
    }

    pub fn touch_end(&mut self, now: f64) {
        self.orbit.end_drag(now);
    }

    /// Turn the sphere so marker `id` faces the viewer. Unknown ids are ignored.
    pub fn focus_marker(&mut self, id: usize, now: f64) -> bool {
        let Some(marker) = self.markers.get(id) else {
            log::warn!("[sphere] focus on unknown marker {}", id);
            return false;
        };
        self.orbit.focus(marker.local, now);
        log::debug!(
            "[sphere] focus {} yaw={:.3} pitch={:.3}",
            id,
            self.orbit.target_yaw,
            self.orbit.target_pitch
        );
        true
    }

    // ---------------- Frame driver ----------------

    /// One tick: orbit, hover, facets, overlays, render. No-op while idle.
    pub fn frame(&mut self, now: f64) {
        if !self.gate.is_active() {
            return;
        }
        let elapsed = (now - self.started_at).max(0.0) as f32;

        self.orbit.tick(now);
        let rotation = self.orbit.rotation();

        let hit = self.pointer_ndc.and_then(|ndc| {
            let ray = self.camera.ray_through(ndc);
            self.hover.pick(ray, rotation, self.animator.fill())
        });
        self.hover.apply(hit, elapsed, self.animator.states_mut());
        self.animator.step(&self.mesh, elapsed, &self.palette);

        self.transforms.clear();
        for marker in &self.markers {
            let t = project_marker(marker, rotation, &self.camera, &self.viewport);
            self.overlay.apply(marker.index, &t);
            self.transforms.push(t);
        }

        let frame = SceneFrame {
            view_proj: self.camera.view_projection(),
            model: Mat4::from_quat(rotation),
            palette: &self.palette,
            fill: self.animator.fill(),
            edges: self.animator.edges(),
            particles: &self.particles,
        };
        self.renderer.render(&frame);
        self.frames += 1;
    }
}
