//! Pointer tracking and the press/release interaction state.

use crate::constants::{EASE_PRESSED, EASE_RELEASED, INITIAL_POINTER};
use glam::Vec2;

/// Map client pixel coordinates to [-1, 1] with +y up.
///
/// Zero or negative viewport dimensions are treated as one pixel.
#[inline]
pub fn normalize(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((client_x / w) * 2.0 - 1.0, -(client_y / h) * 2.0 + 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Released,
    Pressed,
}

impl Interaction {
    pub fn ease(self) -> f32 {
        match self {
            Interaction::Released => EASE_RELEASED,
            Interaction::Pressed => EASE_PRESSED,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Vec2,
    pub interaction: Interaction,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            ndc: Vec2::from(INITIAL_POINTER),
            interaction: Interaction::Released,
        }
    }
}

impl PointerState {
    pub fn press(&mut self, client: Vec2, viewport: Vec2) {
        self.ndc = normalize(client.x, client.y, viewport.x, viewport.y);
        self.interaction = Interaction::Pressed;
    }

    pub fn release(&mut self) {
        self.interaction = Interaction::Released;
    }

    pub fn move_to(&mut self, client: Vec2, viewport: Vec2) {
        self.ndc = normalize(client.x, client.y, viewport.x, viewport.y);
    }

    pub fn is_pressed(&self) -> bool {
        self.interaction == Interaction::Pressed
    }

    pub fn ease(&self) -> f32 {
        self.interaction.ease()
    }
}
