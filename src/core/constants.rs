use std::f32::consts::PI;

// Sphere tuning constants: smoothing rates, falloff radii and breakpoints
// that set the feel of the visualization.

// Geometry
pub const SPHERE_RADIUS: f32 = 2.2;
pub const SPHERE_DETAIL: u32 = 6;
pub const MAX_SPHERE_DETAIL: u32 = 12; // bounds the per-frame facet scans
pub const MARKER_LIFT: f32 = 0.3; // markers float this far above the surface

// Orbit
pub const AUTO_ROTATE_SPEED: f32 = 0.0008; // radians per frame
pub const ORBIT_SMOOTHING: f32 = 0.05; // fraction of remaining distance per frame
pub const DRAG_PITCH_LIMIT: f32 = PI / 3.0;
pub const FOCUS_PITCH_LIMIT: f32 = PI / 2.5;
pub const POINTER_YAW_SENSITIVITY: f32 = 0.005; // radians per pixel
pub const POINTER_PITCH_SENSITIVITY: f32 = 0.003;
pub const TOUCH_YAW_SENSITIVITY: f32 = 0.008;
pub const TOUCH_PITCH_SENSITIVITY: f32 = 0.005;
pub const DRAG_RESUME_DELAY_SEC: f64 = 2.0;
pub const FOCUS_RESUME_DELAY_SEC: f64 = 5.0;

// Hover influence field
pub const HOVER_RADIUS: f32 = 0.6; // centroid distance where influence reaches zero
pub const HOVER_LIFT: f32 = 0.1; // lift of the hit facet before wobble
pub const HOVER_WOBBLE_AMPLITUDE: f32 = 0.02;
pub const HOVER_WOBBLE_RATE: f32 = 10.0;

// Facet animation
pub const LIFT_SMOOTHING: f32 = 0.1;
pub const WAVE_AMPLITUDE: f32 = 0.003;
pub const WAVE_RATE: f32 = 1.5;
pub const WAVE_PHASE_PER_FACET: f32 = 0.05;
pub const FACET_OPACITY_PER_LIFT: f32 = 0.3;
pub const EDGE_OPACITY_PER_LIFT: f32 = 1.5;

// Overlay projection
pub const MARKER_DEPTH_THRESHOLD: f32 = 0.3; // rotated z at which a marker starts to show
pub const MARKER_OPAQUE_DEPTH: f32 = 1.8; // rotated z at which a marker is fully opaque
pub const MARKER_MIN_SCALE: f32 = 0.4;
pub const MARKER_VISIBLE_OPACITY: f32 = 0.05;
pub const INDICATOR_ACTIVE_OPACITY: f32 = 0.5;
pub const CARD_TILT_Y: f32 = 0.2;
pub const CARD_TILT_X: f32 = 0.15;
pub const REFERENCE_CAMERA_DISTANCE: f32 = 6.0; // zoom factor 1.0 at this distance

// Viewport breakpoints (CSS pixels of the window)
pub const SMALL_MOBILE_MAX_WIDTH: f32 = 480.0;
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
pub const LANDSCAPE_MAX_HEIGHT: f32 = 500.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Camera
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Particle field
pub const PARTICLE_COUNT: usize = 800;
pub const MAX_PARTICLE_COUNT: usize = 10_000;
pub const PARTICLE_MIN_RADIUS: f32 = 4.0;
pub const PARTICLE_RADIUS_SPAN: f32 = 12.0;
pub const PARTICLE_OPACITY: f32 = 0.4;
pub const PARTICLE_SEED: u64 = 0x5eed_0f_57a2;

// Theme palette
pub const DARK_BACKGROUND: [f32; 3] = [0.039, 0.039, 0.039]; // #0a0a0a
pub const LIGHT_BACKGROUND: [f32; 3] = [0.98, 0.98, 0.98]; // #fafafa
pub const DARK_FACET_OPACITY: f32 = 0.015;
pub const LIGHT_FACET_OPACITY: f32 = 0.02;
pub const DARK_EDGE_OPACITY: f32 = 0.08;
pub const LIGHT_EDGE_OPACITY: f32 = 0.12;
