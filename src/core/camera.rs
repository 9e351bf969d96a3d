//! Perspective camera and the viewport breakpoints that configure it.

use super::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Window size class, picked from the window (not container) dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    SmallMobile,
    Mobile,
    Landscape,
    Desktop,
}

impl ViewportClass {
    pub fn classify(window_width: f32, window_height: f32) -> Self {
        if window_width <= SMALL_MOBILE_MAX_WIDTH {
            Self::SmallMobile
        } else if window_width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if window_height < LANDSCAPE_MAX_HEIGHT && window_width > window_height {
            Self::Landscape
        } else {
            Self::Desktop
        }
    }

    pub fn camera_distance(self) -> f32 {
        match self {
            Self::SmallMobile => 8.0,
            Self::Mobile => 7.5,
            Self::Landscape => 7.0,
            Self::Desktop => 6.0,
        }
    }

    pub fn fov_degrees(self) -> f32 {
        match self {
            Self::SmallMobile => 65.0,
            Self::Mobile => 62.0,
            Self::Landscape => 55.0,
            Self::Desktop => 60.0,
        }
    }

    /// Pixel offset from a marker's projected point to its card's top-left corner.
    pub fn card_offset(self) -> Vec2 {
        match self {
            Self::SmallMobile => Vec2::new(60.0, 50.0),
            Self::Mobile => Vec2::new(70.0, 55.0),
            Self::Landscape | Self::Desktop => Vec2::new(90.0, 70.0),
        }
    }
}

/// Window and container dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub window_width: f32,
    pub window_height: f32,
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(window_width: f32, window_height: f32, width: f32, height: f32) -> Self {
        Self {
            window_width,
            window_height,
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn class(&self) -> ViewportClass {
        ViewportClass::classify(self.window_width, self.window_height)
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }

    /// Backing-store size in device pixels, with the pixel ratio capped.
    pub fn backing_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO);
        (
            ((self.width * ratio) as u32).max(1),
            ((self.height * ratio) as u32).max(1),
        )
    }

    /// Normalized device coordinates of a container-local pixel position.
    pub fn to_ndc(&self, local: Vec2) -> Vec2 {
        Vec2::new(
            local.x / self.width.max(1.0) * 2.0 - 1.0,
            1.0 - local.y / self.height.max(1.0) * 2.0,
        )
    }

    /// Container-local pixel position of a point in normalized device coordinates.
    pub fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.width,
            (-ndc.y * 0.5 + 0.5) * self.height,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Right-handed camera on the +Z axis looking at the origin.
#[derive(Clone, Debug)]
pub struct Camera {
    pub class: ViewportClass,
    pub distance: f32,
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let class = viewport.class();
        Self {
            class,
            distance: class.camera_distance(),
            fovy_radians: class.fov_degrees().to_radians(),
            aspect: viewport.aspect(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Card scale multiplier; 1.0 at the desktop distance.
    #[inline]
    pub fn zoom_factor(&self) -> f32 {
        REFERENCE_CAMERA_DISTANCE / self.distance
    }

    /// World point to normalized device coordinates (z in 0..1 for visible depth).
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// World-space ray from the eye through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let origin = self.eye();
        Ray {
            origin,
            dir: (far - origin).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_pick_presets() {
        assert_eq!(ViewportClass::classify(1280.0, 800.0), ViewportClass::Desktop);
        assert_eq!(ViewportClass::classify(700.0, 900.0), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(400.0, 800.0), ViewportClass::SmallMobile);
        assert_eq!(ViewportClass::classify(900.0, 420.0), ViewportClass::Landscape);
        // Narrow windows stay mobile even when short.
        assert_eq!(ViewportClass::classify(740.0, 360.0), ViewportClass::Mobile);
    }

    #[test]
    fn center_ray_points_at_origin() {
        let cam = Camera::for_viewport(&Viewport::new(1024.0, 768.0, 800.0, 600.0));
        let ray = cam.ray_through(Vec2::ZERO);
        assert!((ray.origin - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-6);
        assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn projection_and_ray_agree() {
        let cam = Camera::for_viewport(&Viewport::new(1024.0, 768.0, 800.0, 600.0));
        let world = Vec3::new(0.7, -0.4, 1.2);
        let ndc = cam.project(world);
        let ray = cam.ray_through(ndc.truncate());
        let to_point = (world - ray.origin).normalize();
        assert!(ray.dir.dot(to_point) > 0.9999);
    }

    #[test]
    fn pixels_round_trip_through_ndc() {
        let vp = Viewport::new(1024.0, 768.0, 800.0, 600.0);
        let px = Vec2::new(200.0, 450.0);
        let back = vp.to_pixels(vp.to_ndc(px));
        assert!((back - px).length() < 1e-3);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn backing_size_caps_pixel_ratio() {
        let vp = Viewport::new(1024.0, 768.0, 800.0, 600.0).with_pixel_ratio(3.0);
        assert_eq!(vp.backing_size(), (1600, 1200));
    }
}
