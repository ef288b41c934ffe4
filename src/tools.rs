use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::config::EditorConfig;
use crate::stroke::StrokeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Brush,
    Fill,
    Eraser,
}

impl Tool {
    pub const ALL: [Self; 3] = [Self::Brush, Self::Fill, Self::Eraser];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Fill => "Fill Bucket",
            Self::Eraser => "Eraser",
        }
    }

    /// Brush and eraser draw strokes; fill acts on a single click.
    pub fn draws_strokes(&self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }
}

/// The user's current tool, color and brush size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub tool: Tool,
    /// `#RRGGBB`, as picked from the palette
    pub color: String,
    /// Brush and eraser diameter in pixels
    pub brush_size: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ToolSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            tool: Tool::default(),
            color: config.default_color.clone(),
            brush_size: config.default_brush_size.max(1),
        }
    }

    /// The active color, or `None` if it cannot be parsed.
    pub fn rgb(&self) -> Option<Rgb> {
        Rgb::from_hex(&self.color)
    }

    /// How a stroke started with the current settings composites, if the
    /// current tool draws strokes at all.
    pub fn stroke_mode(&self) -> Option<StrokeMode> {
        match self.tool {
            Tool::Brush => self.rgb().map(StrokeMode::Paint),
            Tool::Eraser => Some(StrokeMode::Erase),
            Tool::Fill => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_config() {
        let settings = ToolSettings::default();
        assert_eq!(settings.tool, Tool::Brush);
        assert_eq!(settings.rgb(), Some(Rgb::new(255, 0, 0)));
        assert_eq!(settings.brush_size, 10);
    }

    #[test]
    fn test_stroke_mode_per_tool() {
        let mut settings = ToolSettings::default();
        assert_eq!(settings.stroke_mode(), Some(StrokeMode::Paint(Rgb::new(255, 0, 0))));

        settings.tool = Tool::Eraser;
        assert_eq!(settings.stroke_mode(), Some(StrokeMode::Erase));

        settings.tool = Tool::Fill;
        assert_eq!(settings.stroke_mode(), None);
        assert!(!settings.tool.draws_strokes());

        settings.tool = Tool::Brush;
        settings.color = "not a color".to_owned();
        assert_eq!(settings.stroke_mode(), None);
    }
}
