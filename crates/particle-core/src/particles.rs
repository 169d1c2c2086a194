//! Particle buffer built from text and the per-frame field update.

use crate::camera::{PerspectiveCamera, Ray};
use crate::constants::*;
use crate::error::ParticleError;
use crate::font::Font;
use crate::pointer::{Interaction, PointerState};
use glam::{Vec2, Vec3};

/// Particle text settings; `Default` uses the values in `constants.rs`.
#[derive(Clone, Debug)]
pub struct ParticleConfig {
    pub text: String,
    pub amount: usize,
    pub particle_size: f32,
    pub particle_color: u32,
    pub text_size: f32,
    pub area: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            text: TEXT.to_string(),
            amount: SAMPLE_AMOUNT,
            particle_size: PARTICLE_SIZE,
            particle_color: PARTICLE_COLOR,
            text_size: TEXT_SIZE,
            area: INTERACTION_AREA,
        }
    }
}

/// Convert an sRGB 0xRRGGBB color to a linear RGB triple in [0, 1].
#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        srgb_to_linear((hex >> 16) & 0xff),
        srgb_to_linear((hex >> 8) & 0xff),
        srgb_to_linear(hex & 0xff),
    ]
}

fn srgb_to_linear(channel: u32) -> f32 {
    let c = f64::from(channel) / 255.0;
    let linear = if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    };
    linear as f32
}

/// Parallel position/color/size arrays backing the point cloud.
///
/// `rest` keeps the sampled positions so displacement can always ease back.
#[derive(Clone, Debug, Default)]
pub struct ParticleBuffer {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
    rest: Vec<f32>,
    dirty: bool,
}

impl ParticleBuffer {
    pub fn from_points(points: &[Vec2], size: f32) -> Self {
        let mut positions = Vec::with_capacity(points.len() * 3);
        for p in points {
            positions.extend_from_slice(&[p.x, p.y, 0.0]);
        }
        Self {
            rest: positions.clone(),
            positions,
            colors: vec![1.0; points.len() * 3],
            sizes: vec![size; points.len()],
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    pub fn rest_position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.rest[i * 3..i * 3 + 3])
    }

    pub fn set_position(&mut self, i: usize, p: Vec3) {
        p.write_to_slice(&mut self.positions[i * 3..i * 3 + 3]);
        self.dirty = true;
    }

    pub fn set_color(&mut self, i: usize, rgb: [f32; 3]) {
        self.colors[i * 3..i * 3 + 3].copy_from_slice(&rgb);
        self.dirty = true;
    }

    pub fn set_size(&mut self, i: usize, size: f32) {
        self.sizes[i] = size;
        self.dirty = true;
    }

    /// True when the arrays changed since the renderer last uploaded them.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    /// Min/max of the rest positions in the text plane.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        if self.is_empty() {
            return None;
        }
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in self.rest.chunks_exact(3) {
            let v = Vec2::new(p[0], p[1]);
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

/// Sample `sample_count / 2` evenly spaced points around every shape of `text`.
pub fn build_from_text(
    font: &Font,
    text: &str,
    text_size: f32,
    sample_count: usize,
    particle_size: f32,
) -> Result<ParticleBuffer, ParticleError> {
    let shapes = font.generate_shapes(text, text_size)?;
    let per_shape = sample_count / 2;
    let mut points = Vec::with_capacity(shapes.len() * per_shape);
    for shape in &shapes {
        points.extend(shape.spaced_points(per_shape));
    }
    if points.is_empty() {
        log::warn!("[particles] text {:?} produced no particles", text);
    }
    log::info!(
        "[particles] shapes={} per_shape={} particles={}",
        shapes.len(),
        per_shape,
        points.len()
    );
    Ok(ParticleBuffer::from_points(&points, particle_size))
}

/// Everything a displacement function may use for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub ray: Ray,
    /// Where the pointer ray crosses the text plane (z = 0).
    pub pointer_on_plane: Option<Vec3>,
    pub ease: f32,
    pub area: f32,
    pub pressed: bool,
    pub dt: f32,
}

/// Per-frame particle perturbation hook.
pub trait Displacement {
    fn apply(&mut self, input: &FrameInput, buffer: &mut ParticleBuffer);
}

/// Leaves every particle at rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDisplacement;

impl Displacement for NoDisplacement {
    fn apply(&mut self, _input: &FrameInput, _buffer: &mut ParticleBuffer) {}
}

pub struct ParticleField {
    config: ParticleConfig,
    buffer: ParticleBuffer,
    pointer: PointerState,
    ray: Ray,
    displacement: Box<dyn Displacement>,
}

impl ParticleField {
    pub fn new(buffer: ParticleBuffer, config: ParticleConfig) -> Self {
        Self {
            config,
            buffer,
            pointer: PointerState::default(),
            ray: Ray::default(),
            displacement: Box::new(NoDisplacement),
        }
    }

    /// Build the point cloud for `config.text` from `font`.
    pub fn from_font(font: &Font, config: ParticleConfig) -> Result<Self, ParticleError> {
        let buffer = build_from_text(
            font,
            &config.text,
            config.text_size,
            config.amount,
            config.particle_size,
        )?;
        Ok(Self::new(buffer, config))
    }

    pub fn with_displacement(mut self, displacement: Box<dyn Displacement>) -> Self {
        self.displacement = displacement;
        self
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ParticleBuffer {
        &mut self.buffer
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn interaction(&self) -> Interaction {
        self.pointer.interaction
    }

    pub fn ease(&self) -> f32 {
        self.pointer.interaction.ease()
    }

    pub fn ray(&self) -> Ray {
        self.ray
    }

    pub fn base_color(&self) -> [f32; 3] {
        hex_to_rgb(self.config.particle_color)
    }

    /// `viewport` is the window size the client coordinates are relative to.
    pub fn on_pointer_down(&mut self, client: Vec2, viewport: Vec2) {
        self.pointer.press(client, viewport);
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer.release();
    }

    pub fn on_pointer_move(&mut self, client: Vec2, viewport: Vec2) {
        self.pointer.move_to(client, viewport);
    }

    pub fn update_frame(&mut self, camera: &PerspectiveCamera, dt: f32) {
        self.ray = camera.ray_through(self.pointer.ndc);
        let input = FrameInput {
            ray: self.ray,
            pointer_on_plane: self.ray.intersect_plane_z(0.0),
            ease: self.ease(),
            area: self.config.area,
            pressed: self.pointer.is_pressed(),
            dt,
        };
        self.displacement.apply(&input, &mut self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_white_and_mixed() {
        assert_eq!(hex_to_rgb(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn hex_channels_are_linearized() {
        for c in hex_to_rgb(0x808080) {
            assert!((c - 0.2159).abs() < 1e-3, "got {}", c);
        }
        // dark channels use the linear toe of the sRGB curve
        let [r, _, _] = hex_to_rgb(0x0a0000);
        assert!((r - (10.0 / 255.0) / 12.92).abs() < 1e-6);
    }

    #[test]
    fn buffer_arrays_stay_parallel() {
        let pts = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        let buf = ParticleBuffer::from_points(&pts, 1.0);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.positions.len(), 6);
        assert_eq!(buf.colors.len(), 6);
        assert_eq!(buf.sizes.len(), 2);
        assert_eq!(buf.position(1), Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(buf.bounds(), Some((Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))));
    }

    #[test]
    fn edits_mark_buffer_dirty_and_keep_rest() {
        let mut buf = ParticleBuffer::from_points(&[Vec2::ZERO], 1.0);
        buf.mark_uploaded();
        assert!(!buf.is_dirty());
        buf.set_position(0, Vec3::new(5.0, 0.0, 0.0));
        assert!(buf.is_dirty());
        assert_eq!(buf.rest_position(0), Vec3::ZERO);
    }
}
