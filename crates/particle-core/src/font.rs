//! Typeface JSON fonts and text-to-shape layout.
//!
//! The font format is the one produced by facetype.js: a glyph table keyed by
//! character, each glyph holding an advance (`ha`) and a space-separated
//! outline command string (`o`). Curve commands list the end point before
//! the control points.

use crate::error::ParticleError;
use crate::shape::{assemble_shapes, Contour, Shape};
use fnv::FnvHashMap;
use glam::Vec2;
use serde::Deserialize;

const FALLBACK_GLYPH: char = '?';

#[derive(Clone, Debug, Deserialize)]
pub struct Glyph {
    pub ha: f32,
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFont {
    glyphs: FnvHashMap<String, Glyph>,
    #[serde(default)]
    family_name: String,
    resolution: f32,
    bounding_box: BoundingBox,
    #[serde(default)]
    underline_thickness: f32,
}

#[derive(Clone, Debug)]
pub struct Font {
    pub family_name: String,
    pub resolution: f32,
    pub bounding_box: BoundingBox,
    pub underline_thickness: f32,
    glyphs: FnvHashMap<char, Glyph>,
}

impl Font {
    pub fn from_json(json: &str) -> Result<Self, ParticleError> {
        let raw: RawFont = serde_json::from_str(json)?;
        if !(raw.resolution > 0.0) {
            return Err(ParticleError::FontFormat(format!(
                "resolution must be positive, got {}",
                raw.resolution
            )));
        }
        let mut glyphs = FnvHashMap::default();
        for (key, glyph) in raw.glyphs {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    glyphs.insert(c, glyph);
                }
                _ => log::warn!("[font] skipping glyph key {:?}", key),
            }
        }
        log::info!(
            "[font] loaded '{}' glyphs={} resolution={}",
            raw.family_name,
            glyphs.len(),
            raw.resolution
        );
        Ok(Self {
            family_name: raw.family_name,
            resolution: raw.resolution,
            bounding_box: raw.bounding_box,
            underline_thickness: raw.underline_thickness,
            glyphs,
        })
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    pub fn line_height(&self, size: f32) -> f32 {
        let bb = self.bounding_box;
        (bb.y_max - bb.y_min + self.underline_thickness) * self.scale(size)
    }

    fn scale(&self, size: f32) -> f32 {
        size / self.resolution
    }

    /// Lay out `text` at `size` and return the filled shapes of every glyph.
    ///
    /// Glyphs advance left to right from the origin; `\n` returns to x = 0 and
    /// drops one line height.
    pub fn generate_shapes(&self, text: &str, size: f32) -> Result<Vec<Shape>, ParticleError> {
        let scale = self.scale(size);
        let line_height = self.line_height(size);
        let mut offset = Vec2::ZERO;
        let mut shapes = Vec::new();

        for c in text.chars() {
            if c == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }
            let glyph = match self.glyph(c).or_else(|| self.glyph(FALLBACK_GLYPH)) {
                Some(g) => g,
                None => {
                    log::error!(
                        "[font] character {:?} missing from '{}' and no fallback glyph",
                        c,
                        self.family_name
                    );
                    continue;
                }
            };
            if let Some(outline) = &glyph.o {
                let contours = parse_outline(outline, scale, offset)?;
                shapes.extend(assemble_shapes(contours));
            }
            offset.x += glyph.ha * scale;
        }
        Ok(shapes)
    }
}

/// Parse one glyph's outline commands into closed contours, scaled and offset
/// into layout space.
pub fn parse_outline(outline: &str, scale: f32, offset: Vec2) -> Result<Vec<Contour>, ParticleError> {
    let mut tokens = outline.split_whitespace();
    let mut contours: Vec<Contour> = Vec::new();
    let mut current: Option<Contour> = None;

    let point = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<Vec2, ParticleError> {
        let x = next_number(tokens)?;
        let y = next_number(tokens)?;
        Ok(Vec2::new(x, y) * scale + offset)
    };

    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" => {
                let p = point(&mut tokens)?;
                if let Some(mut done) = current.take() {
                    done.close();
                    contours.push(done);
                }
                current = Some(Contour::new(p));
            }
            "l" => {
                let p = point(&mut tokens)?;
                current.get_or_insert_with(|| Contour::new(p)).line_to(p);
            }
            "q" => {
                let end = point(&mut tokens)?;
                let control = point(&mut tokens)?;
                current
                    .get_or_insert_with(|| Contour::new(end))
                    .quadratic_to(control, end);
            }
            "b" => {
                let end = point(&mut tokens)?;
                let c0 = point(&mut tokens)?;
                let c1 = point(&mut tokens)?;
                current
                    .get_or_insert_with(|| Contour::new(end))
                    .cubic_to(c0, c1, end);
            }
            "z" => {
                if let Some(c) = current.as_mut() {
                    c.close();
                }
            }
            other => {
                return Err(ParticleError::FontFormat(format!(
                    "unknown outline command {:?}",
                    other
                )))
            }
        }
    }
    if let Some(mut done) = current.take() {
        done.close();
        contours.push(done);
    }
    Ok(contours)
}

fn next_number(tokens: &mut std::str::SplitWhitespace<'_>) -> Result<f32, ParticleError> {
    let tok = tokens
        .next()
        .ok_or_else(|| ParticleError::FontFormat("outline ends mid-command".into()))?;
    tok.parse::<f32>()
        .map_err(|_| ParticleError::FontFormat(format!("bad outline number {:?}", tok)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_commands_put_end_point_first() {
        let contours = parse_outline("m 0 0 q 10 0 5 5", 1.0, Vec2::ZERO).unwrap();
        assert_eq!(contours.len(), 1);
        match contours[0].segments()[0] {
            crate::shape::Segment::Quadratic(a, c, b) => {
                assert_eq!(a, Vec2::ZERO);
                assert_eq!(c, Vec2::new(5.0, 5.0));
                assert_eq!(b, Vec2::new(10.0, 0.0));
            }
            other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn cubic_command_lists_end_point_before_controls() {
        let contours = parse_outline("m 0 0 b 10 0 0 5 10 5", 1.0, Vec2::ZERO).unwrap();
        let seg = contours[0].segments()[0];
        assert_eq!(
            seg,
            crate::shape::Segment::Cubic(
                Vec2::ZERO,
                Vec2::new(0.0, 5.0),
                Vec2::new(10.0, 5.0),
                Vec2::new(10.0, 0.0),
            )
        );
        assert!(seg.point(0.5).distance(Vec2::new(5.0, 3.75)) < 1e-5);
    }

    #[test]
    fn close_command_ends_contour_and_next_move_starts_another() {
        let contours =
            parse_outline("m 0 0 l 10 0 l 10 10 z m 20 0 l 30 0 l 30 10", 1.0, Vec2::ZERO).unwrap();
        assert_eq!(contours.len(), 2);
        let first = contours[0].segments();
        assert_eq!(first.len(), 3);
        assert_eq!(
            first[2],
            crate::shape::Segment::Line(Vec2::new(10.0, 10.0), Vec2::ZERO)
        );
        assert_eq!(contours[1].start(), Vec2::new(20.0, 0.0));
        assert_eq!(contours[1].segments().len(), 3);
    }

    #[test]
    fn outline_is_scaled_and_offset() {
        let contours = parse_outline("m 100 0 l 100 100", 0.5, Vec2::new(1.0, 2.0)).unwrap();
        assert_eq!(contours[0].start(), Vec2::new(51.0, 2.0));
    }

    #[test]
    fn truncated_outline_is_rejected() {
        assert!(parse_outline("m 0 0 l 10", 1.0, Vec2::ZERO).is_err());
        assert!(parse_outline("m 0 0 x 1 1", 1.0, Vec2::ZERO).is_err());
    }
}
