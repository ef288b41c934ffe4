use serde::{Deserialize, Serialize};

use crate::boundary::DEFAULT_BOUNDARY_THRESHOLD;
use crate::color::Rgb;
use crate::error::FileError;
use crate::fill::DEFAULT_FILL_TOLERANCE;
use crate::history::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_PALETTE: [&str; 35] = [
    "#FF0000", "#FF7F00", "#FFFF00", "#00FF00", "#0000FF", "#4B0082", "#9400D3",
    "#FFFFFF", "#C0C0C0", "#808080", "#000000", "#8B4513", "#A0522D", "#D2691E",
    "#FFC0CB", "#FF69B4", "#DB7093", "#FFA07A", "#FA8072", "#E9967A", "#F08080",
    "#CD5C5C", "#DC143C", "#B22222", "#8B0000", "#00FFFF", "#00CED1", "#48D1CC",
    "#40E0D0", "#20B2AA", "#5F9EA0", "#008B8B", "#008080", "#90EE90", "#3CB371",
];

pub const DEFAULT_BRUSH_SIZES: [u32; 5] = [2, 5, 10, 20, 30];

/// Tunables for the editor. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Per-channel slack for the "already filled" check
    pub fill_tolerance: u8,
    /// Line-art luminance below which a pixel is ink
    pub boundary_threshold: f32,
    pub history_limit: usize,
    /// `#RRGGBB` swatches offered in the palette
    pub palette: Vec<String>,
    /// Brush diameters in pixels
    pub brush_sizes: Vec<u32>,
    pub default_color: String,
    pub default_brush_size: u32,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fill_tolerance: DEFAULT_FILL_TOLERANCE,
            boundary_threshold: DEFAULT_BOUNDARY_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
            palette: DEFAULT_PALETTE.iter().map(|hex| (*hex).to_owned()).collect(),
            brush_sizes: DEFAULT_BRUSH_SIZES.to_vec(),
            default_color: "#FF0000".to_owned(),
            default_brush_size: 10,
            export_file_name: "snapdoodle-artwork.png".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, FileError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, FileError> {
        let json = std::fs::read_to_string(path)?;
        log::info!("Loaded editor config from {}", path.display());
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, FileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces values the editor cannot work with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.history_limit == 0 {
            log::warn!("history_limit must be at least 1, using {}", defaults.history_limit);
            self.history_limit = defaults.history_limit;
        }
        if !self.boundary_threshold.is_finite() || self.boundary_threshold < 0.0 {
            log::warn!(
                "Invalid boundary_threshold {}, using {}",
                self.boundary_threshold,
                defaults.boundary_threshold
            );
            self.boundary_threshold = defaults.boundary_threshold;
        }

        let swatch_count = self.palette.len();
        self.palette.retain(|hex| Rgb::from_hex(hex).is_some());
        if self.palette.len() != swatch_count {
            log::warn!("Dropped {} unparseable palette colors", swatch_count - self.palette.len());
        }
        if self.palette.is_empty() {
            self.palette = defaults.palette.clone();
        }
        if Rgb::from_hex(&self.default_color).is_none() {
            log::warn!("Invalid default_color {:?}, using {}", self.default_color, defaults.default_color);
            self.default_color = defaults.default_color.clone();
        }

        self.brush_sizes.retain(|&size| size > 0);
        if self.brush_sizes.is_empty() {
            self.brush_sizes = defaults.brush_sizes.clone();
        }
        if self.default_brush_size == 0 {
            self.default_brush_size = defaults.default_brush_size;
        }
        if self.export_file_name.trim().is_empty() {
            self.export_file_name = defaults.export_file_name;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.fill_tolerance, 10);
        assert!((config.boundary_threshold - 240.0).abs() < f32::EPSILON);
        assert_eq!(config.history_limit, 30);
        assert_eq!(config.palette.len(), 35);
        assert_eq!(config.brush_sizes, vec![2, 5, 10, 20, 30]);
        assert_eq!(config.default_brush_size, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "fill_tolerance": 4, "history_limit": 5 }"#).unwrap();
        assert_eq!(config.fill_tolerance, 4);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.default_color, "#FF0000");
    }

    #[test]
    fn test_validation_repairs_bad_values() {
        let config = EditorConfig::from_json(
            r##"{ "history_limit": 0, "palette": ["#12345", "#00FF00"], "brush_sizes": [0], "default_color": "red" }"##,
        )
        .unwrap();
        assert_eq!(config.history_limit, 30);
        assert_eq!(config.palette, vec!["#00FF00".to_owned()]);
        assert_eq!(config.brush_sizes, vec![2, 5, 10, 20, 30]);
        assert_eq!(config.default_color, "#FF0000");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(EditorConfig::from_json("{"), Err(FileError::Config(_))));
    }
}
