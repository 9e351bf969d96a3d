// Host-side tests for theme parsing, palettes and the visibility gate.

use portfolio_sphere::core::constants::*;
use portfolio_sphere::core::{FrameGate, FrameState, Theme};

#[test]
fn only_light_attribute_selects_light_theme() {
    assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some(" Light ")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
    assert_eq!(Theme::from_attribute(Some("solarized")), Theme::Dark);
    assert_eq!(Theme::from_attribute(Some("")), Theme::Dark);
    assert_eq!(Theme::from_attribute(None), Theme::Dark);
    assert_eq!(Theme::default(), Theme::Dark);
}

#[test]
fn palettes_match_page_colors() {
    let dark = Theme::Dark.palette();
    assert_eq!(dark.background, DARK_BACKGROUND);
    assert_eq!(dark.ink, [1.0, 1.0, 1.0]);
    assert_eq!(dark.facet_opacity, 0.015);
    assert_eq!(dark.edge_opacity, 0.08);

    let light = Theme::Light.palette();
    assert_eq!(light.background, LIGHT_BACKGROUND);
    assert_eq!(light.ink, [0.0, 0.0, 0.0]);
    assert_eq!(light.facet_opacity, 0.02);
    assert_eq!(light.edge_opacity, 0.12);
    assert_eq!(dark.particle_opacity, light.particle_opacity);
}

#[test]
fn gate_starts_idle_and_reports_transitions() {
    let mut gate = FrameGate::default();
    assert_eq!(gate.state(), FrameState::Idle);
    assert!(!gate.is_active());
    assert!(gate.set_visible(true));
    assert!(gate.is_active());
    assert!(!gate.set_visible(true));
    assert!(gate.set_visible(false));
    assert_eq!(gate.state(), FrameState::Idle);
}
