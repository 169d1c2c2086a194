//! 2D outline geometry: curve segments, contours and filled shapes.
//!
//! Outlines come from font glyphs in y-up font space. A [`Contour`] is a
//! connected run of segments starting at a move-to; a [`Shape`] is one solid
//! contour plus the holes cut out of it.

use crate::constants::{ARC_LENGTH_DIVISIONS, WINDING_DIVISIONS};
use glam::Vec2;
use smallvec::SmallVec;

const CLOSE_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(Vec2, Vec2),
    Quadratic(Vec2, Vec2, Vec2),
    Cubic(Vec2, Vec2, Vec2, Vec2),
}

impl Segment {
    pub fn start(&self) -> Vec2 {
        match *self {
            Segment::Line(a, _) | Segment::Quadratic(a, _, _) | Segment::Cubic(a, _, _, _) => a,
        }
    }

    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line(_, b) | Segment::Quadratic(_, _, b) | Segment::Cubic(_, _, _, b) => b,
        }
    }

    /// Point at curve parameter `t` in [0, 1].
    pub fn point(&self, t: f32) -> Vec2 {
        match *self {
            Segment::Line(a, b) => a.lerp(b, t),
            Segment::Quadratic(p0, c, p1) => {
                let k = 1.0 - t;
                p0 * (k * k) + c * (2.0 * k * t) + p1 * (t * t)
            }
            Segment::Cubic(p0, c0, c1, p1) => {
                let k = 1.0 - t;
                p0 * (k * k * k) + c0 * (3.0 * k * k * t) + c1 * (3.0 * k * t * t) + p1 * (t * t * t)
            }
        }
    }

    fn divisions(&self, curved: usize) -> usize {
        match self {
            Segment::Line(..) => 1,
            _ => curved,
        }
    }
}

/// Cumulative arc lengths of one segment sampled at even parameter steps.
#[derive(Clone, Debug)]
struct ArcTable {
    lengths: Vec<f32>,
}

impl ArcTable {
    fn new(seg: &Segment) -> Self {
        let n = seg.divisions(ARC_LENGTH_DIVISIONS);
        let mut lengths = Vec::with_capacity(n + 1);
        lengths.push(0.0);
        let mut prev = seg.point(0.0);
        let mut sum = 0.0;
        for i in 1..=n {
            let p = seg.point(i as f32 / n as f32);
            sum += p.distance(prev);
            lengths.push(sum);
            prev = p;
        }
        Self { lengths }
    }

    fn total(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Map a distance along the segment to its curve parameter.
    fn parameter_at(&self, distance: f32) -> f32 {
        let n = self.lengths.len() - 1;
        if n == 0 || self.total() <= 0.0 {
            return 0.0;
        }
        let i = match self
            .lengths
            .binary_search_by(|l| l.partial_cmp(&distance).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => return i as f32 / n as f32,
            Err(i) => i.clamp(1, n),
        };
        let before = self.lengths[i - 1];
        let span = self.lengths[i] - before;
        let frac = if span > 0.0 { (distance - before) / span } else { 0.0 };
        ((i - 1) as f32 + frac) / n as f32
    }
}

/// A connected outline starting at a move-to point.
#[derive(Clone, Debug, Default)]
pub struct Contour {
    start: Vec2,
    current: Vec2,
    segments: Vec<Segment>,
}

impl Contour {
    pub fn new(start: Vec2) -> Self {
        Self {
            start,
            current: start,
            segments: Vec::new(),
        }
    }

    pub fn line_to(&mut self, p: Vec2) {
        self.segments.push(Segment::Line(self.current, p));
        self.current = p;
    }

    pub fn quadratic_to(&mut self, control: Vec2, p: Vec2) {
        self.segments
            .push(Segment::Quadratic(self.current, control, p));
        self.current = p;
    }

    pub fn cubic_to(&mut self, c0: Vec2, c1: Vec2, p: Vec2) {
        self.segments
            .push(Segment::Cubic(self.current, c0, c1, p));
        self.current = p;
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Add a straight segment back to the start if the outline stops short.
    ///
    /// Glyphs that never return to their start therefore gain a sampled
    /// closing edge, so their points differ from an open-path sampler.
    pub fn close(&mut self) {
        if !self.segments.is_empty() && self.current.distance(self.start) > CLOSE_EPSILON {
            self.line_to(self.start);
        }
    }

    /// Coarse polyline used for winding and containment tests.
    pub fn polyline(&self) -> Vec<Vec2> {
        let mut pts = vec![self.start];
        for seg in &self.segments {
            let n = seg.divisions(WINDING_DIVISIONS);
            for i in 1..=n {
                pts.push(seg.point(i as f32 / n as f32));
            }
        }
        pts
    }

    /// Shoelace area; negative means clockwise in y-up space.
    pub fn signed_area(&self) -> f32 {
        polygon_area(&self.polyline())
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        point_in_polygon(p, &self.polyline())
    }

    pub fn length(&self) -> f32 {
        self.segments.iter().map(|s| ArcTable::new(s).total()).sum()
    }

    /// `count` points spread evenly by arc length around the closed outline.
    ///
    /// The first point sits on the start; the start is not repeated at the end.
    pub fn spaced_points(&self, count: usize) -> Vec<Vec2> {
        if count == 0 {
            return Vec::new();
        }
        if self.segments.is_empty() {
            return vec![self.start; count];
        }
        let tables: Vec<ArcTable> = self.segments.iter().map(ArcTable::new).collect();
        let total: f32 = tables.iter().map(ArcTable::total).sum();
        if total <= 0.0 {
            return vec![self.start; count];
        }

        let mut out = Vec::with_capacity(count);
        let mut seg_i = 0usize;
        let mut seg_offset = 0.0f32;
        for k in 0..count {
            let target = total * k as f32 / count as f32;
            while seg_i + 1 < tables.len() && seg_offset + tables[seg_i].total() < target {
                seg_offset += tables[seg_i].total();
                seg_i += 1;
            }
            let local = (target - seg_offset).clamp(0.0, tables[seg_i].total());
            let t = tables[seg_i].parameter_at(local);
            out.push(self.segments[seg_i].point(t));
        }
        out
    }
}

/// One solid outline with the holes cut out of it.
#[derive(Clone, Debug)]
pub struct Shape {
    pub outline: Contour,
    pub holes: SmallVec<[Contour; 2]>,
}

impl Shape {
    pub fn new(outline: Contour) -> Self {
        Self {
            outline,
            holes: SmallVec::new(),
        }
    }

    /// Evenly spaced points along the outer boundary; holes are not sampled.
    pub fn spaced_points(&self, count: usize) -> Vec<Vec2> {
        self.outline.spaced_points(count)
    }
}

/// Group the contours of one glyph into shapes.
///
/// Clockwise contours are solids, the rest are holes attached to the solid
/// that contains their first point (falling back to the closest preceding
/// solid). Without any clockwise contour every contour becomes its own shape.
pub fn assemble_shapes(contours: Vec<Contour>) -> Vec<Shape> {
    let contours: Vec<Contour> = contours.into_iter().filter(|c| !c.is_empty()).collect();
    if contours.len() <= 1 {
        return contours.into_iter().map(Shape::new).collect();
    }
    if !contours.iter().any(Contour::is_clockwise) {
        return contours.into_iter().map(Shape::new).collect();
    }

    let mut shapes: Vec<Shape> = Vec::new();
    let mut holes: Vec<(usize, Contour)> = Vec::new();
    for c in contours {
        if c.is_clockwise() {
            shapes.push(Shape::new(c));
        } else {
            holes.push((shapes.len().saturating_sub(1), c));
        }
    }
    for (fallback, hole) in holes {
        let probe = hole.start();
        let owner = shapes
            .iter()
            .position(|s| s.outline.contains(probe))
            .unwrap_or(fallback);
        shapes[owner].holes.push(hole);
    }
    shapes
}

pub(crate) fn polygon_area(pts: &[Vec2]) -> f32 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..n {
        let p = pts[i];
        let q = pts[(i + 1) % n];
        a += p.x * q.y - q.x * p.y;
    }
    a * 0.5
}

pub(crate) fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = poly[i];
        let b = poly[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
