use crate::constants::MAX_PIXEL_RATIO;

/// Size of the mount container in CSS pixels plus the capped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: device_pixel_ratio.min(MAX_PIXEL_RATIO),
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Backing-store size of the drawing surface in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).floor() as u32;
        let h = (self.height * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }
}
