//! Light/dark theme palette and the change signal the sphere listens to.

use super::constants::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Anything but an explicit `light` attribute value is dark.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: DARK_BACKGROUND,
                ink: [1.0, 1.0, 1.0],
                facet_opacity: DARK_FACET_OPACITY,
                edge_opacity: DARK_EDGE_OPACITY,
                particle_opacity: PARTICLE_OPACITY,
            },
            Self::Light => Palette {
                background: LIGHT_BACKGROUND,
                ink: [0.0, 0.0, 0.0],
                facet_opacity: LIGHT_FACET_OPACITY,
                edge_opacity: LIGHT_EDGE_OPACITY,
                particle_opacity: PARTICLE_OPACITY,
            },
        }
    }
}

/// Theme-dependent colors; `ink` is used for facets, edges and particles alike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: [f32; 3],
    pub ink: [f32; 3],
    pub facet_opacity: f32,
    pub edge_opacity: f32,
    pub particle_opacity: f32,
}

/// Holds the current theme and notifies subscribers when it changes.
#[derive(Default)]
pub struct ThemeSignal {
    current: Theme,
    subscribers: SmallVec<[Box<dyn FnMut(Theme)>; 2]>,
}

impl ThemeSignal {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            subscribers: SmallVec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn subscribe(&mut self, callback: impl FnMut(Theme) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Returns true when the value changed and subscribers were notified.
    pub fn set(&mut self, theme: Theme) -> bool {
        if theme == self.current {
            return false;
        }
        self.current = theme;
        for cb in self.subscribers.iter_mut() {
            cb(theme);
        }
        true
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
