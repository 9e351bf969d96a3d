//! Sphere configuration with `data-*` attribute overrides.

use super::constants::*;
use super::error::SphereError;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct SphereConfig {
    pub radius: f32,
    pub detail: u32,
    /// Markers sit at `radius + marker_lift`.
    pub marker_lift: f32,
    pub auto_rotate_speed: f32,
    pub particle_count: usize,
    pub particle_seed: u64,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            detail: SPHERE_DETAIL,
            marker_lift: MARKER_LIFT,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            particle_count: PARTICLE_COUNT,
            particle_seed: PARTICLE_SEED,
        }
    }
}

impl SphereConfig {
    /// Defaults overridden by `data-detail`, `data-auto-rotate-speed` and
    /// `data-particles`. `lookup` receives the attribute name.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_from(&lookup, "data-detail", &mut config.detail);
        override_from(&lookup, "data-auto-rotate-speed", &mut config.auto_rotate_speed);
        override_from(&lookup, "data-particles", &mut config.particle_count);
        config
    }

    #[inline]
    pub fn marker_radius(&self) -> f32 {
        self.radius + self.marker_lift
    }

    pub fn validate(&self) -> Result<(), SphereError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SphereError::InvalidConfig(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if self.detail > MAX_SPHERE_DETAIL {
            return Err(SphereError::InvalidConfig(format!(
                "detail {} exceeds {}",
                self.detail, MAX_SPHERE_DETAIL
            )));
        }
        if !(self.marker_lift.is_finite() && self.marker_lift >= 0.0) {
            return Err(SphereError::InvalidConfig(format!(
                "marker lift must be non-negative, got {}",
                self.marker_lift
            )));
        }
        if !(self.auto_rotate_speed.is_finite() && self.auto_rotate_speed >= 0.0) {
            return Err(SphereError::InvalidConfig(format!(
                "auto-rotate speed must be non-negative, got {}",
                self.auto_rotate_speed
            )));
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(SphereError::InvalidConfig(format!(
                "particle count {} exceeds {}",
                self.particle_count, MAX_PARTICLE_COUNT
            )));
        }
        Ok(())
    }
}

fn override_from<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(name) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(v) => *slot = v,
        Err(_) => log::warn!("[config] ignoring {}={:?}", name, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = SphereConfig::default();
        assert!(c.validate().is_ok());
        assert!((c.marker_radius() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn attributes_override_and_bad_values_fall_back() {
        let c = SphereConfig::from_attributes(|name| match name {
            "data-detail" => Some("3".to_string()),
            "data-auto-rotate-speed" => Some("fast".to_string()),
            "data-particles" => Some(" 120 ".to_string()),
            _ => None,
        });
        assert_eq!(c.detail, 3);
        assert_eq!(c.auto_rotate_speed, AUTO_ROTATE_SPEED);
        assert_eq!(c.particle_count, 120);
    }

    #[test]
    fn unbounded_detail_is_rejected() {
        let c = SphereConfig {
            detail: MAX_SPHERE_DETAIL + 1,
            ..SphereConfig::default()
        };
        assert!(matches!(c.validate(), Err(SphereError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_attributes_parse_but_fail_validation() {
        let c = SphereConfig::from_attributes(|name| match name {
            "data-detail" => Some("4294967295".to_string()),
            _ => None,
        });
        assert_eq!(c.detail, u32::MAX);
        assert!(matches!(c.validate(), Err(SphereError::InvalidConfig(_))));

        let c = SphereConfig::from_attributes(|name| match name {
            "data-particles" => Some((MAX_PARTICLE_COUNT + 1).to_string()),
            _ => None,
        });
        assert!(matches!(c.validate(), Err(SphereError::InvalidConfig(_))));
    }
}
