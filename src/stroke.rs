use egui::{Pos2, Rect, pos2};

use crate::buffer::PixelBuffer;
use crate::color::{Pixel, Rgb};
use crate::error::CanvasError;

/// Smallest radius that still covers at least one pixel center.
const MIN_RADIUS: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// How a stroke composites onto the paint layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    /// Opaque paint over whatever is already there.
    Paint(Rgb),
    /// Cuts covered paint back to transparent.
    Erase,
}

impl StrokeMode {
    fn pixel(self) -> Pixel {
        match self {
            Self::Paint(color) => color.opaque(),
            Self::Erase => Pixel::TRANSPARENT,
        }
    }
}

/// A finished stroke, kept for logging and inspection after commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    mode: StrokeMode,
    diameter: f32,
}

impl Stroke {
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    pub fn bounding_rect(&self) -> Rect {
        let mut rect = Rect::NOTHING;
        for point in &self.points {
            rect.extend_with(*point);
        }
        rect.expand(self.diameter / 2.0)
    }
}

/// Rasterizes an in-progress brush or eraser stroke straight into the paint
/// layer.
///
/// Every segment is drawn as a capsule of the stroke's diameter, which gives
/// round caps and round joins. Painting happens as points arrive; the caller
/// snapshots history once, after [`StrokeRenderer::finish`].
#[derive(Debug, Clone)]
pub struct StrokeRenderer {
    points: Vec<Pos2>,
    mode: StrokeMode,
    diameter: f32,
}

impl StrokeRenderer {
    /// Starts a stroke and stamps its round cap at `start`.
    pub fn begin(
        paint: &mut PixelBuffer,
        start: Pos2,
        mode: StrokeMode,
        diameter: f32,
    ) -> Result<Self, CanvasError> {
        let renderer = Self {
            points: vec![start],
            mode,
            diameter,
        };
        renderer.draw_segment(paint, start, start)?;
        Ok(renderer)
    }

    /// Extends the stroke to `point`, drawing the connecting segment.
    pub fn extend(&mut self, paint: &mut PixelBuffer, point: Pos2) -> Result<(), CanvasError> {
        let last = self.points.last().copied().unwrap_or(point);
        if last == point {
            return Ok(());
        }
        self.draw_segment(paint, last, point)?;
        self.points.push(point);
        Ok(())
    }

    pub fn finish(self) -> Stroke {
        Stroke {
            points: self.points,
            mode: self.mode,
            diameter: self.diameter,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    fn radius(&self) -> f32 {
        (self.diameter / 2.0).max(MIN_RADIUS)
    }

    fn draw_segment(&self, paint: &mut PixelBuffer, a: Pos2, b: Pos2) -> Result<(), CanvasError> {
        let radius = self.radius();
        let pixel = self.mode.pixel();

        let bounds = Rect::from_two_pos(a, b).expand(radius);
        let canvas = Rect::from_min_size(Pos2::ZERO, egui::vec2(paint.width() as f32, paint.height() as f32));
        if paint.pixel_count() == 0 || !bounds.intersects(canvas) {
            return Ok(());
        }
        let max_x = paint.width() as f32 - 1.0;
        let max_y = paint.height() as f32 - 1.0;
        let x0 = bounds.min.x.floor().clamp(0.0, max_x) as u32;
        let x1 = bounds.max.x.ceil().clamp(0.0, max_x) as u32;
        let y0 = bounds.min.y.floor().clamp(0.0, max_y) as u32;
        let y1 = bounds.max.y.ceil().clamp(0.0, max_y) as u32;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, a, b) <= radius {
                    paint.set(x, y, pixel)?;
                }
            }
        }
        Ok(())
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
