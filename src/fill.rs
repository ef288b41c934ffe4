use std::collections::VecDeque;

use crate::boundary::BoundaryMap;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::error::CanvasError;
use crate::util::Stopwatch;

/// Per-channel slack when deciding that the seed is already painted.
pub const DEFAULT_FILL_TOLERANCE: u8 = 10;

/// What a fill request did.
///
/// Everything except [`FillOutcome::Filled`] is a silent no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Filled { pixels: usize },
    NoColor,
    AlreadyFilled,
    OnBoundary,
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

/// Boundary-aware bucket fill.
///
/// Reads walls from the immutable line-art [`BoundaryMap`] and writes color
/// into the paint layer, so refills and erased areas never damage the ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodFill {
    tolerance: u8,
}

impl Default for FloodFill {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_TOLERANCE)
    }
}

impl FloodFill {
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }

    /// Fills the 4-connected open region around `(x, y)` with `color` at full
    /// opacity.
    ///
    /// The seed must lie inside the canvas; callers clamp pointer positions
    /// first. The caller takes the history snapshot afterwards.
    pub fn fill(
        &self,
        paint: &mut PixelBuffer,
        boundary: &BoundaryMap,
        x: u32,
        y: u32,
        color: Option<Rgb>,
    ) -> Result<FillOutcome, CanvasError> {
        paint.ensure_same_size(boundary.layer())?;

        let Some(color) = color else {
            return Ok(FillOutcome::NoColor);
        };
        let fill_pixel = color.opaque();

        if paint.get(x, y)?.matches(fill_pixel, self.tolerance) {
            return Ok(FillOutcome::AlreadyFilled);
        }
        if boundary.is_boundary(i64::from(x), i64::from(y)) {
            return Ok(FillOutcome::OnBoundary);
        }

        let stopwatch = Stopwatch::start();
        let (width, height) = (paint.width(), paint.height());
        let mut visited = vec![false; paint.pixel_count()];
        let mut queue = VecDeque::new();
        let mut filled = 0;

        visited[y as usize * width as usize + x as usize] = true;
        queue.push_back((x, y));

        while let Some((x, y)) = queue.pop_front() {
            if boundary.is_boundary(i64::from(x), i64::from(y)) {
                continue;
            }

            paint.set(x, y, fill_pixel)?;
            filled += 1;

            let neighbors = [
                (x.checked_add(1), Some(y)),
                (x.checked_sub(1), Some(y)),
                (Some(x), y.checked_add(1)),
                (Some(x), y.checked_sub(1)),
            ];
            for (nx, ny) in neighbors {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                if nx >= width || ny >= height {
                    continue;
                }
                let vi = ny as usize * width as usize + nx as usize;
                if !visited[vi] {
                    visited[vi] = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        log::debug!(
            "Flood fill at ({}, {}) with {} painted {} pixels in {:.2} ms",
            x,
            y,
            color.to_hex(),
            filled,
            stopwatch.elapsed_ms()
        );

        Ok(FillOutcome::Filled { pixels: filled })
    }
}
