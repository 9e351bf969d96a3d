pub mod animator;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod hover;
pub mod markers;
pub mod mesh;
pub mod orbit;
pub mod particles;
pub mod projector;
pub mod projects;
pub mod scheduler;
pub mod theme;
pub mod visualization;

pub use animator::{FacetAnimator, FacetState, SceneVertex};
pub use camera::{Camera, Ray, Viewport, ViewportClass};
pub use config::SphereConfig;
pub use error::SphereError;
pub use hover::HoverResponder;
pub use markers::Marker;
pub use mesh::{Facet, GeodesicMesh};
pub use orbit::{DragSource, OrbitController};
pub use projector::{OverlaySink, ScreenTransform};
pub use projects::{portfolio_projects, Project};
pub use scheduler::{FrameCallback, FrameGate, FrameHandle, FrameState, ManualScheduler, Scheduler};
pub use theme::{Palette, Theme, ThemeSignal};
pub use visualization::{SceneFrame, SceneRenderer, SphereVisualization};

// Shader bundled as a string constant
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
