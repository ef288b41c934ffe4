use thiserror::Error;

/// Errors raised by the raster core.
///
/// Flood fill no-ops (missing color, same-color click, click on ink) are not
/// errors; see [`crate::fill::FillOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("expected a {}x{} buffer, found {}x{}", expected[0], expected[1], found[0], found[1])]
    DimensionMismatch { expected: [u32; 2], found: [u32; 2] },
    #[error("invalid canvas dimensions {width}x{height} for {len} bytes of pixel data")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

/// Errors from loading line art, reading config, and writing the export.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to decode or encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("line art has no pixels")]
    EmptyImage,
    #[error("browser download failed: {0}")]
    Download(String),
}
