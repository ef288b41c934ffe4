use serde::{Deserialize, Serialize};

/// A single straight (non-premultiplied) 8-bit RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True if every channel, alpha included, differs by at most `tolerance`.
    pub fn matches(self, other: Self, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
            && self.a.abs_diff(other.a) <= tolerance
    }

    /// Rec. 601 luma of the color channels; alpha is ignored.
    pub fn luminance(self) -> f32 {
        0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b)
    }
}

/// An opaque color picked from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the `#` is optional, hex digits are case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub const fn opaque(self) -> Pixel {
        Pixel::rgba(self.r, self.g, self.b, 255)
    }
}

impl From<Rgb> for egui::Color32 {
    fn from(color: Rgb) -> Self {
        Self::from_rgb(color.r, color.g, color.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#FF7F00"), Some(Rgb::new(255, 127, 0)));
        assert_eq!(Rgb::from_hex("00ced1"), Some(Rgb::new(0, 206, 209)));
        assert_eq!(Rgb::from_hex("#FFF"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::new(139, 69, 19).to_hex(), "#8B4513");
    }

    #[test]
    fn test_tolerance_match() {
        let red = Pixel::rgba(255, 0, 0, 255);
        assert!(red.matches(Pixel::rgba(245, 10, 0, 250), 10));
        assert!(!red.matches(Pixel::rgba(244, 0, 0, 255), 10));
        // Transparent paint never matches an opaque fill color.
        assert!(!Pixel::TRANSPARENT.matches(Rgb::new(0, 0, 0).opaque(), 10));
    }

    #[test]
    fn test_luminance() {
        assert!((Pixel::WHITE.luminance() - 255.0).abs() < 0.01);
        assert!(Pixel::BLACK.luminance().abs() < f32::EPSILON);
        assert!(Pixel::rgba(240, 240, 240, 255).luminance() >= 239.9);
    }
}
