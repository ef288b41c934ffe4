use std::fmt;
use std::sync::Arc;

use crate::color::Pixel;
use crate::error::CanvasError;

const BYTES_PER_PIXEL: usize = 4;

/// A rectangular RGBA raster stored as one flat row-major byte array.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Immutable deep copy of a [`PixelBuffer`]'s pixel data.
///
/// Cloning a snapshot shares its storage with the other snapshot, never with
/// the live buffer it was taken from.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let len = width as usize * height as usize;
        let data = pixel.to_bytes().repeat(len);
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps raw row-major RGBA bytes, as produced by an image decoder.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CanvasError> {
        if data.len() != width as usize * height as usize * BYTES_PER_PIXEL {
            return Err(CanvasError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Pixel, CanvasError> {
        let i = self.index(x, y)?;
        let mut bytes = [0; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.data[i..i + BYTES_PER_PIXEL]);
        Ok(Pixel::from_bytes(bytes))
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), CanvasError> {
        let i = self.index(x, y)?;
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&pixel.to_bytes());
        Ok(())
    }

    /// Overwrites every pixel.
    pub fn fill(&mut self, pixel: Pixel) {
        let bytes = pixel.to_bytes();
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&bytes);
        }
    }

    pub fn clear(&mut self) {
        self.fill(Pixel::TRANSPARENT);
    }

    pub fn is_transparent(&self) -> bool {
        self.pixels().all(|p| p.a == 0)
    }

    /// Bulk read of the whole raster.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data.chunks_exact(BYTES_PER_PIXEL).map(|chunk| {
            let mut bytes = [0; BYTES_PER_PIXEL];
            bytes.copy_from_slice(chunk);
            Pixel::from_bytes(bytes)
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            data: Arc::from(self.data.as_slice()),
        }
    }

    /// Replaces all pixel data with the snapshot's.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        if snapshot.size() != self.size() {
            return Err(CanvasError::DimensionMismatch {
                expected: self.size(),
                found: snapshot.size(),
            });
        }
        self.data.copy_from_slice(&snapshot.data);
        Ok(())
    }

    pub(crate) fn ensure_same_size(&self, other: &Self) -> Result<(), CanvasError> {
        if self.size() == other.size() {
            Ok(())
        } else {
            Err(CanvasError::DimensionMismatch {
                expected: self.size(),
                found: other.size(),
            })
        }
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data", &"<pixels>")
            .finish()
    }
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let mut buffer = PixelBuffer::new(4, 3);
        let red = Pixel::rgba(255, 0, 0, 255);
        buffer.set(3, 2, red).unwrap();
        assert_eq!(buffer.get(3, 2).unwrap(), red);
        assert_eq!(buffer.get(0, 0).unwrap(), Pixel::TRANSPARENT);
        // Row-major layout: (3, 2) is the last pixel.
        assert_eq!(&buffer.as_raw()[44..48], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buffer = PixelBuffer::new(4, 3);
        assert!(matches!(
            buffer.get(4, 0),
            Err(CanvasError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(buffer.set(0, 3, Pixel::WHITE).is_err());
        assert!(!buffer.contains(-1, 0));
        assert!(buffer.contains(3, 2));
    }

    #[test]
    fn test_from_raw_validates_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, vec![0; 15]),
            Err(CanvasError::InvalidDimensions { len: 15, .. })
        ));
    }

    #[test]
    fn test_snapshot_is_independent_of_live_buffer() {
        let mut buffer = PixelBuffer::new(2, 2);
        let snapshot = buffer.snapshot();
        buffer.set(1, 1, Pixel::BLACK).unwrap();
        assert!(snapshot.as_raw().iter().all(|&b| b == 0));

        buffer.restore(&snapshot).unwrap();
        assert!(buffer.is_transparent());
    }

    #[test]
    fn test_restore_rejects_other_sizes() {
        let snapshot = PixelBuffer::new(3, 2).snapshot();
        let mut buffer = PixelBuffer::new(2, 3);
        assert_eq!(
            buffer.restore(&snapshot),
            Err(CanvasError::DimensionMismatch {
                expected: [2, 3],
                found: [3, 2],
            })
        );
    }
}
