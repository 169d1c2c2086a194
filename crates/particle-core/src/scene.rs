//! Top-level scene context: camera, renderer and particle field.

use crate::camera::PerspectiveCamera;
use crate::error::ParticleError;
use crate::frame::LoopControl;
use crate::particles::ParticleField;
use crate::viewport::Viewport;

/// Drawing backend for the particle point cloud.
pub trait Renderer {
    /// Resize the drawing surface to `viewport` (logical size and pixel ratio).
    fn resize(&mut self, viewport: &Viewport);

    /// Draw one frame of `field` as seen by `camera`.
    fn draw(
        &mut self,
        camera: &PerspectiveCamera,
        field: &mut ParticleField,
    ) -> Result<(), ParticleError>;
}

pub struct SceneHost<R: Renderer> {
    camera: PerspectiveCamera,
    viewport: Viewport,
    renderer: R,
    field: ParticleField,
    control: LoopControl,
}

impl<R: Renderer> SceneHost<R> {
    pub fn initialize(viewport: Viewport, field: ParticleField, mut renderer: R) -> Self {
        let camera = PerspectiveCamera::for_scene(viewport.aspect());
        renderer.resize(&viewport);
        log::info!(
            "[scene] ready {}x{} @{} particles={}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            field.buffer().len()
        );
        Self {
            camera,
            viewport,
            renderer,
            field,
            control: LoopControl::new(),
        }
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();
        self.renderer.resize(&viewport);
    }

    /// One update + draw step.
    pub fn render_frame(&mut self, dt: f32) -> Result<(), ParticleError> {
        self.field.update_frame(&self.camera, dt);
        self.renderer.draw(&self.camera, &mut self.field)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn loop_control(&self) -> LoopControl {
        self.control.clone()
    }
}
