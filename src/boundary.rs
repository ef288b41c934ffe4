use std::fmt;

use crate::buffer::PixelBuffer;
use crate::color::Pixel;

/// Luminance below which a line-art pixel counts as ink.
///
/// Near-white anti-aliased edges stay fillable, any visible ink blocks the fill.
pub const DEFAULT_BOUNDARY_THRESHOLD: f32 = 240.0;

/// Read-only ink mask over the line-art layer.
///
/// The classification is computed once when the line art is loaded and never
/// changes for the rest of the session.
#[derive(Clone)]
pub struct BoundaryMap {
    layer: PixelBuffer,
    threshold: f32,
    ink: Vec<bool>,
}

impl BoundaryMap {
    pub fn new(layer: PixelBuffer, threshold: f32) -> Self {
        let ink = layer.pixels().map(|p| is_ink(p, threshold)).collect();
        Self {
            layer,
            threshold,
            ink,
        }
    }

    pub fn with_default_threshold(layer: PixelBuffer) -> Self {
        Self::new(layer, DEFAULT_BOUNDARY_THRESHOLD)
    }

    /// The line art this map was built from.
    pub fn layer(&self) -> &PixelBuffer {
        &self.layer
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Coordinates outside the canvas are an implicit wall.
    pub fn is_boundary(&self, x: i64, y: i64) -> bool {
        if !self.layer.contains(x, y) {
            return true;
        }
        self.ink[y as usize * self.layer.width() as usize + x as usize]
    }

    pub fn ink_pixel_count(&self) -> usize {
        self.ink.iter().filter(|&&ink| ink).count()
    }
}

impl fmt::Debug for BoundaryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryMap")
            .field("layer", &self.layer)
            .field("threshold", &self.threshold)
            .field("ink_pixels", &self.ink_pixel_count())
            .finish()
    }
}

fn is_ink(pixel: Pixel, threshold: f32) -> bool {
    pixel.luminance() < threshold
}
