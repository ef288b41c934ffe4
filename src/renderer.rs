use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions};

use crate::buffer::PixelBuffer;
use crate::document::Document;
use crate::error::CanvasError;

pub fn to_color_image(buffer: &PixelBuffer) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [buffer.width() as usize, buffer.height() as usize],
        buffer.as_raw(),
    )
}

/// Keeps the composited canvas uploaded as an egui texture.
pub struct Renderer {
    ctx: egui::Context,
    texture: Option<TextureHandle>,
    dirty: bool,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_context(cc.egui_ctx.clone())
    }

    pub fn with_context(ctx: egui::Context) -> Self {
        Self {
            ctx,
            texture: None,
            dirty: true,
        }
    }

    /// Marks the canvas for re-upload on the next [`Renderer::update`].
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Re-composites and uploads the document if it changed since the last
    /// upload.
    pub fn update(&mut self, document: &Document) -> Result<(), CanvasError> {
        if !self.dirty && self.texture.is_some() {
            return Ok(());
        }
        let image = to_color_image(&document.flatten()?);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(self.ctx.load_texture("canvas", image, TextureOptions::NEAREST));
            }
        }
        self.dirty = false;
        Ok(())
    }

    /// Draws the canvas texture into `rect`.
    pub fn render(&self, painter: &egui::Painter, rect: egui::Rect) {
        match &self.texture {
            Some(texture) => {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), rect, uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 0.0, Color32::from_gray(32));
            }
        }
    }
}
