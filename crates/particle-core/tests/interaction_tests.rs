// Host-side tests for pointer normalization and the press/release state.

mod common;

use common::*;
use glam::Vec2;
use particle_core::{normalize, Interaction, ParticleConfig, ParticleField, PointerState};

fn field() -> ParticleField {
    let config = ParticleConfig {
        text: "AB".into(),
        amount: 10,
        ..ParticleConfig::default()
    };
    ParticleField::from_font(&test_font(), config).unwrap()
}

#[test]
fn normalize_maps_corners_and_center() {
    assert_eq!(normalize(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalize(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn normalize_is_pure() {
    let a = normalize(123.0, 456.0, 1024.0, 768.0);
    let b = normalize(123.0, 456.0, 1024.0, 768.0);
    assert_eq!(a, b);
}

#[test]
fn normalize_tolerates_empty_viewport() {
    let p = normalize(0.0, 0.0, 0.0, 0.0);
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn pointer_starts_released_and_off_screen() {
    let p = PointerState::default();
    assert_eq!(p.interaction, Interaction::Released);
    assert_eq!(p.ease(), 0.05);
    assert_eq!(p.ndc, Vec2::new(-200.0, 200.0));
}

#[test]
fn pointer_down_in_center_presses_with_slow_ease() {
    let mut f = field();
    f.on_pointer_down(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
    assert_eq!(f.pointer().ndc, Vec2::ZERO);
    assert_eq!(f.interaction(), Interaction::Pressed);
    assert_eq!(f.ease(), 0.01);
}

#[test]
fn pointer_up_releases() {
    let mut f = field();
    f.on_pointer_down(Vec2::new(10.0, 10.0), Vec2::new(800.0, 600.0));
    f.on_pointer_up();
    assert_eq!(f.interaction(), Interaction::Released);
    assert_eq!(f.ease(), 0.05);
}

#[test]
fn pointer_move_never_changes_state() {
    let mut f = field();
    f.on_pointer_move(Vec2::new(200.0, 150.0), Vec2::new(800.0, 600.0));
    assert_eq!(f.interaction(), Interaction::Released);
    assert_eq!(f.pointer().ndc, Vec2::new(-0.5, 0.5));

    f.on_pointer_down(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
    f.on_pointer_move(Vec2::new(800.0, 0.0), Vec2::new(800.0, 600.0));
    assert_eq!(f.interaction(), Interaction::Pressed);
    assert_eq!(f.ease(), 0.01);
    assert_eq!(f.pointer().ndc, Vec2::new(1.0, 1.0));
}

#[test]
fn pointer_up_while_released_stays_released() {
    let mut f = field();
    f.on_pointer_up();
    assert_eq!(f.interaction(), Interaction::Released);
}

#[test]
fn coordinates_follow_the_current_viewport() {
    let mut f = field();
    f.on_pointer_move(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
    assert_eq!(f.pointer().ndc, Vec2::ZERO);
    f.on_pointer_move(Vec2::new(400.0, 300.0), Vec2::new(400.0, 300.0));
    assert_eq!(f.pointer().ndc, Vec2::new(1.0, -1.0));
}
