// Shared fixtures for host-side tests.
#![allow(dead_code)]

use particle_core::{Font, ParticleError, PerspectiveCamera, ParticleField, Renderer, Viewport};

// Square-ish letterforms in a 1000-unit em. Outer contours run clockwise,
// holes counter-clockwise, like a real typeface JSON export.
pub const TEST_FONT_JSON: &str = r#"{
  "familyName": "Test Sans",
  "resolution": 1000,
  "underlineThickness": 50,
  "boundingBox": { "xMin": 0, "xMax": 700, "yMin": -200, "yMax": 800 },
  "glyphs": {
    "A": { "ha": 700, "x_min": 0, "x_max": 600,
           "o": "m 0 0 l 0 700 l 600 700 l 600 0 l 0 0 m 100 100 l 500 100 l 500 600 l 100 600 l 100 100" },
    "B": { "ha": 600, "x_min": 0, "x_max": 500,
           "o": "m 0 0 l 0 700 l 500 700 l 500 0 l 0 0 m 100 100 l 400 100 l 400 300 l 100 300 l 100 100 m 100 400 l 400 400 l 400 600 l 100 600 l 100 400" },
    "i": { "ha": 200,
           "o": "m 0 0 l 0 500 l 100 500 l 100 0 l 0 0 m 0 600 l 0 700 l 100 700 l 100 600 l 0 600" },
    "O": { "ha": 700,
           "o": "m 300 0 q 0 350 0 0 q 300 700 0 700 q 600 350 600 700 q 300 0 600 0" },
    "?": { "ha": 300, "o": "m 0 0 l 0 100 l 100 100 l 100 0" },
    " ": { "ha": 250 }
  }
}"#;

pub const NO_FALLBACK_FONT_JSON: &str = r#"{
  "resolution": 1000,
  "boundingBox": { "xMin": 0, "xMax": 100, "yMin": 0, "yMax": 100 },
  "glyphs": {
    "A": { "ha": 100, "o": "m 0 0 l 0 100 l 100 100 l 100 0 l 0 0" }
  }
}"#;

pub fn test_font() -> Font {
    Font::from_json(TEST_FONT_JSON).expect("test font parses")
}

/// Renderer stand-in that records what the scene asked of it.
#[derive(Default)]
pub struct MockRenderer {
    pub surface: Option<(f64, f64)>,
    pub pixel_ratio: f64,
    pub draws: usize,
    pub last_particle_count: usize,
    pub uploads: usize,
}

impl Renderer for MockRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        self.surface = Some((viewport.width, viewport.height));
        self.pixel_ratio = viewport.pixel_ratio;
    }

    fn draw(
        &mut self,
        _camera: &PerspectiveCamera,
        field: &mut ParticleField,
    ) -> Result<(), ParticleError> {
        self.draws += 1;
        self.last_particle_count = field.buffer().len();
        if field.buffer().is_dirty() {
            self.uploads += 1;
            field.buffer_mut().mark_uploaded();
        }
        Ok(())
    }
}
