// Host-side tests for the scene host: resize, frame step, displacement hook.

mod common;

use common::*;
use glam::{Vec2, Vec3};
use particle_core::{
    Displacement, FrameInput, ParticleBuffer, ParticleConfig, ParticleField, SceneHost, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

fn field() -> ParticleField {
    let config = ParticleConfig {
        text: "AB".into(),
        amount: 10,
        ..ParticleConfig::default()
    };
    ParticleField::from_font(&test_font(), config).unwrap()
}

fn host(w: f64, h: f64) -> SceneHost<MockRenderer> {
    SceneHost::initialize(Viewport::new(w, h, 1.0), field(), MockRenderer::default())
}

#[test]
fn initialize_sets_up_camera_and_surface() {
    let host = host(800.0, 600.0);
    let cam = host.camera();
    assert_eq!(cam.fov_deg, 65.0);
    assert_eq!(cam.near, 1.0);
    assert_eq!(cam.far, 10_000.0);
    assert_eq!(cam.position, Vec3::new(0.0, 0.0, 100.0));
    assert_eq!(cam.aspect, (800.0f64 / 600.0) as f32);
    assert_eq!(host.renderer().surface, Some((800.0, 600.0)));
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    let vp = Viewport::new(800.0, 600.0, 3.0);
    assert_eq!(vp.pixel_ratio, 2.0);
    assert_eq!(vp.physical_size(), (1600, 1200));
    assert_eq!(Viewport::new(10.0, 10.0, 1.5).pixel_ratio, 1.5);

    let host = SceneHost::initialize(vp, field(), MockRenderer::default());
    assert_eq!(host.renderer().pixel_ratio, 2.0);
}

#[test]
fn resize_recomputes_aspect_and_surface() {
    let mut host = host(800.0, 600.0);
    let before = host.camera().projection_matrix();

    host.on_resize(Viewport::new(400.0, 300.0, 1.0));
    assert_eq!(host.camera().aspect, (400.0f64 / 300.0) as f32);
    assert_eq!(host.renderer().surface, Some((400.0, 300.0)));
    assert_eq!(host.viewport().width, 400.0);

    host.on_resize(Viewport::new(1000.0, 250.0, 1.0));
    assert_eq!(host.camera().aspect, 4.0);
    assert_eq!(host.renderer().surface, Some((1000.0, 250.0)));
    assert_ne!(host.camera().projection_matrix(), before);
}

#[test]
fn resize_sweep_keeps_aspect_exact() {
    let mut host = host(800.0, 600.0);
    for (w, h) in [(1.0, 1.0), (1920.0, 1080.0), (375.0, 812.0), (3.0, 7.0)] {
        host.on_resize(Viewport::new(w, h, 1.0));
        assert_eq!(host.camera().aspect, (w / h) as f32);
        assert_eq!(host.renderer().surface, Some((w, h)));
    }
}

#[test]
fn each_frame_updates_then_draws_once() {
    let mut host = host(800.0, 600.0);
    host.render_frame(0.016).unwrap();
    host.render_frame(0.016).unwrap();
    let r = host.renderer();
    assert_eq!(r.draws, 2);
    assert_eq!(r.last_particle_count, 10);
    // rest positions never change without a displacement, so one upload
    assert_eq!(r.uploads, 1);
}

#[test]
fn frame_ray_follows_pointer() {
    let mut host = host(800.0, 600.0);
    host.field_mut()
        .on_pointer_move(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
    host.render_frame(0.016).unwrap();
    let ray = host.field().ray();
    assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 100.0));
    assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-5);
}

struct Recorder(Rc<RefCell<Vec<FrameInput>>>);

impl Displacement for Recorder {
    fn apply(&mut self, input: &FrameInput, _buffer: &mut ParticleBuffer) {
        self.0.borrow_mut().push(*input);
    }
}

#[test]
fn displacement_receives_frame_input() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let field = field().with_displacement(Box::new(Recorder(seen.clone())));
    let mut host = SceneHost::initialize(
        Viewport::new(800.0, 600.0, 1.0),
        field,
        MockRenderer::default(),
    );
    host.field_mut()
        .on_pointer_down(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
    host.render_frame(0.02).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let input = seen[0];
    assert!(input.pressed);
    assert_eq!(input.ease, 0.01);
    assert_eq!(input.area, 250.0);
    assert_eq!(input.dt, 0.02);
    let hit = input.pointer_on_plane.unwrap();
    assert!(hit.distance(Vec3::ZERO) < 1e-3);
}

/// Pushes every particle a fixed distance along +z.
struct Lift;

impl Displacement for Lift {
    fn apply(&mut self, _input: &FrameInput, buffer: &mut ParticleBuffer) {
        for i in 0..buffer.len() {
            let p = buffer.rest_position(i) + Vec3::Z;
            buffer.set_position(i, p);
        }
    }
}

#[test]
fn displaced_particles_are_reuploaded() {
    let field = field().with_displacement(Box::new(Lift));
    let mut host = SceneHost::initialize(
        Viewport::new(800.0, 600.0, 1.0),
        field,
        MockRenderer::default(),
    );
    host.render_frame(0.016).unwrap();
    host.render_frame(0.016).unwrap();
    assert_eq!(host.renderer().uploads, 2);
    let buf = host.field().buffer();
    assert_eq!(buf.position(0).z, 1.0);
    assert_eq!(buf.rest_position(0).z, 0.0);
}

#[test]
fn loop_control_is_shared() {
    let host = host(800.0, 600.0);
    let a = host.loop_control();
    let b = host.loop_control();
    assert!(a.is_running());
    b.stop();
    assert!(!a.is_running());
}
