use egui::Pos2;

use crate::boundary::BoundaryMap;
use crate::buffer::PixelBuffer;
use crate::color::Pixel;
use crate::compositor;
use crate::config::EditorConfig;
use crate::error::CanvasError;
use crate::fill::{FillOutcome, FloodFill};
use crate::history::HistoryStack;
use crate::input::{InputEvent, pixel_at};
use crate::stroke::{Stroke, StrokeRenderer};
use crate::tools::{Tool, ToolSettings};

/// One coloring session: the line art, the paint on top of it, and the undo
/// history of that paint.
///
/// All editing goes through here so the paint layer is only ever changed by a
/// complete stroke or fill, each followed by exactly one history snapshot.
#[derive(Debug)]
pub struct Document {
    boundary: BoundaryMap,
    paint: PixelBuffer,
    history: HistoryStack,
    settings: ToolSettings,
    flood_fill: FloodFill,
    active_stroke: Option<StrokeRenderer>,
}

impl Document {
    /// Starts a session over `line_art` with a cleared paint layer.
    pub fn new(line_art: PixelBuffer, config: &EditorConfig) -> Self {
        let paint = PixelBuffer::new(line_art.width(), line_art.height());
        let history = HistoryStack::new(paint.snapshot(), config.history_limit);
        log::info!(
            "New document {}x{}, history limit {}",
            line_art.width(),
            line_art.height(),
            history.limit()
        );
        Self {
            boundary: BoundaryMap::new(line_art, config.boundary_threshold),
            paint,
            history,
            settings: ToolSettings::from_config(config),
            flood_fill: FloodFill::new(config.fill_tolerance),
            active_stroke: None,
        }
    }

    /// A session over an empty white page.
    pub fn blank(width: u32, height: u32, config: &EditorConfig) -> Self {
        Self::new(PixelBuffer::filled(width, height, Pixel::WHITE), config)
    }

    /// Swaps in new line art, clearing the paint and the history.
    ///
    /// Tool settings carry over.
    pub fn replace_line_art(&mut self, line_art: PixelBuffer) {
        self.active_stroke = None;
        self.paint = PixelBuffer::new(line_art.width(), line_art.height());
        self.history.reset(self.paint.snapshot());
        self.boundary = BoundaryMap::new(line_art, self.boundary.threshold());
        log::info!("Replaced line art, canvas is now {}x{}", self.width(), self.height());
    }

    pub fn width(&self) -> u32 {
        self.paint.width()
    }

    pub fn height(&self) -> u32 {
        self.paint.height()
    }

    pub fn size(&self) -> [u32; 2] {
        self.paint.size()
    }

    pub fn boundary_layer(&self) -> &PixelBuffer {
        self.boundary.layer()
    }

    pub fn paint_layer(&self) -> &PixelBuffer {
        &self.paint
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ToolSettings) {
        self.commit_stroke();
        self.settings = settings;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.commit_stroke();
        log::info!("Tool selected: {}", tool.name());
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, hex: &str) {
        self.settings.color = hex.to_owned();
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.settings.brush_size = size.max(1);
    }

    pub fn is_stroking(&self) -> bool {
        self.active_stroke.is_some()
    }

    /// Applies one pointer event. Returns whether the paint layer changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<bool, CanvasError> {
        match event {
            InputEvent::PointerDown { location } => {
                if location.is_in_canvas && self.settings.tool.draws_strokes() {
                    self.begin_stroke(location.position)
                } else {
                    Ok(false)
                }
            }
            InputEvent::PointerMove { location } => self.continue_stroke(location.position),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => Ok(self.commit_stroke().is_some()),
            InputEvent::Click { location } => {
                if self.settings.tool != Tool::Fill {
                    return Ok(false);
                }
                match pixel_at(location.position, self.size()) {
                    Some((x, y)) => Ok(self.fill_at(x, y)?.changed()),
                    None => Ok(false),
                }
            }
        }
    }

    /// Starts a brush or eraser stroke at `position` (canvas pixels).
    pub fn begin_stroke(&mut self, position: Pos2) -> Result<bool, CanvasError> {
        self.commit_stroke();
        let Some(mode) = self.settings.stroke_mode() else {
            log::warn!(
                "Cannot start a stroke with tool {} and color {:?}",
                self.settings.tool.name(),
                self.settings.color
            );
            return Ok(false);
        };
        let diameter = self.settings.brush_size as f32;
        self.active_stroke = Some(StrokeRenderer::begin(&mut self.paint, position, mode, diameter)?);
        Ok(true)
    }

    pub fn continue_stroke(&mut self, position: Pos2) -> Result<bool, CanvasError> {
        match &mut self.active_stroke {
            Some(stroke) => {
                stroke.extend(&mut self.paint, position)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ends the active stroke and records it as one history entry.
    pub fn commit_stroke(&mut self) -> Option<Stroke> {
        let stroke = self.active_stroke.take()?.finish();
        self.history.push(self.paint.snapshot());
        log::debug!(
            "Committed {:?} stroke with {} points, history {}/{}",
            stroke.mode(),
            stroke.points().len(),
            self.history.cursor() + 1,
            self.history.len()
        );
        Some(stroke)
    }

    /// Bucket-fills the open region at `(x, y)` with the active color.
    ///
    /// Only a fill that changed something is recorded in the history.
    pub fn fill_at(&mut self, x: u32, y: u32) -> Result<FillOutcome, CanvasError> {
        self.commit_stroke();
        let outcome = self
            .flood_fill
            .fill(&mut self.paint, &self.boundary, x, y, self.settings.rgb())?;
        if outcome.changed() {
            self.history.push(self.paint.snapshot());
        } else {
            log::debug!("Fill at ({x}, {y}) skipped: {outcome:?}");
        }
        Ok(outcome)
    }

    /// Wipes all paint as one undoable step.
    pub fn clear(&mut self) -> bool {
        self.commit_stroke();
        if self.paint.is_transparent() {
            return false;
        }
        self.paint.clear();
        self.history.push(self.paint.snapshot());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns whether anything was undone.
    pub fn undo(&mut self) -> Result<bool, CanvasError> {
        self.commit_stroke();
        let Some(snapshot) = self.history.undo() else {
            return Ok(false);
        };
        let result = self.paint.restore(snapshot);
        self.recover_from(result)
    }

    /// Returns whether anything was redone.
    pub fn redo(&mut self) -> Result<bool, CanvasError> {
        self.commit_stroke();
        let Some(snapshot) = self.history.redo() else {
            return Ok(false);
        };
        let result = self.paint.restore(snapshot);
        self.recover_from(result)
    }

    /// A snapshot that no longer fits the canvas makes the whole history
    /// useless, so it restarts from the current paint.
    fn recover_from(&mut self, result: Result<(), CanvasError>) -> Result<bool, CanvasError> {
        if let Err(err) = result {
            log::error!("History no longer matches the canvas, resetting it: {err}");
            self.history.reset(self.paint.snapshot());
            return Err(err);
        }
        Ok(true)
    }

    /// The line art with the paint composited on top, ready for export.
    pub fn flatten(&self) -> Result<PixelBuffer, CanvasError> {
        compositor::flatten(self.boundary.layer(), &self.paint)
    }
}
