use crate::config::EditorConfig;
use crate::document::Document;
use crate::file_handler::{self, FileHandler};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tools::{Tool, ToolSettings};

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    config: EditorConfig,
    settings: ToolSettings,
    #[serde(skip)]
    document: Option<Document>,
    // Skip serializing the renderer since it contains GPU resources
    #[serde(skip)]
    renderer: Option<Renderer>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    file_handler: FileHandler,
    /// Encoded line art waiting for the canvas size to be known
    #[serde(skip)]
    pending_line_art: Option<Vec<u8>>,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            settings: ToolSettings::from_config(&config),
            config,
            document: None,
            renderer: None,
            input: InputHandler::new(),
            file_handler: FileHandler::new(),
            pending_line_art: None,
            status: None,
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// `config` replaces the stored config; tool settings restored from
    /// storage are kept and only a fresh app takes the config's defaults.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        line_art: Option<Vec<u8>>,
        config: Option<EditorConfig>,
    ) -> Self {
        let stored = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));
        let mut app = Self::restore(stored, config);
        app.renderer = Some(Renderer::new(cc));
        app.pending_line_art = line_art;
        app
    }

    fn restore(stored: Option<Self>, config: Option<EditorConfig>) -> Self {
        let config = config.map(EditorConfig::validated);
        let mut app = match stored {
            Some(app) => app,
            None => {
                let mut app = Self::default();
                if let Some(config) = &config {
                    app.settings = ToolSettings::from_config(config);
                }
                app
            }
        };
        if let Some(config) = config {
            app.config = config;
        }
        app.config = app.config.validated();
        app
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn settings(&self) -> &ToolSettings {
        self.document.as_ref().map_or(&self.settings, Document::settings)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    fn invalidate(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            renderer.invalidate();
        }
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
        if let Some(document) = &mut self.document {
            document.set_tool(tool);
        }
        self.invalidate();
    }

    pub fn set_color(&mut self, hex: &str) {
        self.settings.color = hex.to_owned();
        if let Some(document) = &mut self.document {
            document.set_color(hex);
        }
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.settings.brush_size = size;
        if let Some(document) = &mut self.document {
            document.set_brush_size(size);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.document.as_ref().is_some_and(Document::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.document.as_ref().is_some_and(Document::can_redo)
    }

    pub fn undo(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        match document.undo() {
            Ok(true) => self.invalidate(),
            Ok(false) => {}
            Err(err) => self.set_status(format!("Undo failed: {err}")),
        }
    }

    pub fn redo(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        match document.redo() {
            Ok(true) => self.invalidate(),
            Ok(false) => {}
            Err(err) => self.set_status(format!("Redo failed: {err}")),
        }
    }

    pub fn clear(&mut self) {
        if self.document.as_mut().is_some_and(Document::clear) {
            self.invalidate();
        }
    }

    /// Queues encoded line art; it is decoded once the canvas area is known.
    pub fn open_line_art(&mut self, bytes: Vec<u8>) {
        self.pending_line_art = Some(bytes);
    }

    pub(crate) fn take_pending_line_art(&mut self) -> Option<Vec<u8>> {
        self.pending_line_art.take()
    }

    /// Decodes line art sized for `area` and starts a fresh session over it.
    pub(crate) fn load_line_art(&mut self, bytes: &[u8], area: egui::Vec2) {
        match file_handler::decode_line_art(bytes, [area.x, area.y]) {
            Ok(line_art) => {
                match &mut self.document {
                    Some(document) => document.replace_line_art(line_art),
                    None => {
                        let mut document = Document::new(line_art, &self.config);
                        document.set_settings(self.settings.clone());
                        self.document = Some(document);
                    }
                }
                self.status = None;
                self.invalidate();
            }
            Err(err) => {
                log::error!("Failed to load line art: {err}");
                self.set_status(format!("Could not load line art: {err}"));
            }
        }
    }

    /// Flattens the artwork and writes it as a PNG.
    pub fn export(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        let flattened = match document.flatten() {
            Ok(flattened) => flattened,
            Err(err) => {
                self.set_status(format!("Export failed: {err}"));
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = std::path::PathBuf::from(&self.config.export_file_name);
            match file_handler::save_png(&flattened, &path) {
                Ok(()) => self.set_status(format!("Saved {}", path.display())),
                Err(err) => {
                    log::error!("Export failed: {err}");
                    self.set_status(format!("Export failed: {err}"));
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let file_name = self.config.export_file_name.clone();
            match file_handler::download_png(&flattened, &file_name) {
                Ok(()) => self.set_status(format!("Downloaded {file_name}")),
                Err(err) => {
                    log::error!("Export failed: {err}");
                    self.set_status(format!("Export failed: {err}"));
                }
            }
        }
    }

    pub(crate) fn parts_mut(&mut self) -> (Option<&mut Document>, Option<&mut Renderer>, &mut InputHandler) {
        (self.document.as_mut(), self.renderer.as_mut(), &mut self.input)
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, Modifiers};

        let (redo, undo) = ctx.input_mut(|i| {
            let redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            (redo, undo)
        });
        if redo {
            self.redo();
        }
        if undo {
            self.undo();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(document) = &self.document {
            self.settings = document.settings().clone();
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some(bytes) = self.file_handler.take_dropped_image() {
                self.open_line_art(bytes);
            }
        }
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_config() -> EditorConfig {
        EditorConfig {
            default_color: "#0000FF".to_owned(),
            default_brush_size: 20,
            fill_tolerance: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_config_keeps_persisted_settings() {
        let mut stored = PaintApp::default();
        stored.settings = ToolSettings {
            tool: Tool::Eraser,
            color: "#00FF00".to_owned(),
            brush_size: 5,
        };

        let app = PaintApp::restore(Some(stored), Some(custom_config()));
        assert_eq!(app.settings().tool, Tool::Eraser);
        assert_eq!(app.settings().color, "#00FF00");
        assert_eq!(app.settings().brush_size, 5);
        assert_eq!(app.config().fill_tolerance, 4);
    }

    #[test]
    fn test_fresh_app_takes_config_defaults() {
        let app = PaintApp::restore(None, Some(custom_config()));
        assert_eq!(app.settings().tool, Tool::Brush);
        assert_eq!(app.settings().color, "#0000FF");
        assert_eq!(app.settings().brush_size, 20);
    }

    #[test]
    fn test_stored_config_survives_without_override() {
        let mut stored = PaintApp::default();
        stored.config.history_limit = 12;
        let app = PaintApp::restore(Some(stored), None);
        assert_eq!(app.config().history_limit, 12);
    }
}
