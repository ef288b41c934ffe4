#![warn(clippy::all, rust_2018_idioms)]

//! Coloring-book editor: paint flat colors onto line art without crossing
//! its ink, with undo/redo and a flattened PNG export.
//!
//! The raster core ([`PixelBuffer`], [`BoundaryMap`], [`FloodFill`],
//! [`StrokeRenderer`], [`HistoryStack`], [`compositor`]) has no UI
//! dependencies beyond egui's geometry types and is driven through
//! [`Document`]. The eframe shell lives in [`app`], [`panels`] and
//! [`renderer`].

pub mod app;
pub mod boundary;
pub mod buffer;
pub mod color;
pub mod compositor;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod fill;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod stroke;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use boundary::BoundaryMap;
pub use buffer::{PixelBuffer, Snapshot};
pub use color::{Pixel, Rgb};
pub use config::EditorConfig;
pub use document::Document;
pub use error::{CanvasError, FileError};
pub use fill::{FillOutcome, FloodFill};
pub use history::HistoryStack;
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use stroke::{Stroke, StrokeMode, StrokeRenderer};
pub use tools::{Tool, ToolSettings};
