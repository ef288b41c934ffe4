use std::io::Cursor;

use eframe::egui;
use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};

use crate::buffer::PixelBuffer;
use crate::color::Pixel;
use crate::compositor;
use crate::error::FileError;

/// Largest size with the image's aspect ratio that fits inside `area`.
///
/// Fractional results are truncated to whole pixels, never below one.
pub fn fit_to_area(image_size: [u32; 2], area: [f32; 2]) -> [u32; 2] {
    let [image_w, image_h] = image_size;
    if image_w == 0 || image_h == 0 || area[0] <= 0.0 || area[1] <= 0.0 {
        return [image_w.max(1), image_h.max(1)];
    }

    let aspect = image_w as f32 / image_h as f32;
    let mut width = area[0];
    let mut height = width / aspect;
    if height > area[1] {
        height = area[1];
        width = height * aspect;
    }
    [(width as u32).max(1), (height as u32).max(1)]
}

/// Decodes line art, scales it to fit `area` and flattens it over white so
/// the result is fully opaque.
pub fn decode_line_art(bytes: &[u8], area: [f32; 2]) -> Result<PixelBuffer, FileError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    log::debug!("Decoded line art: {}x{}", decoded.width(), decoded.height());
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(FileError::EmptyImage);
    }

    let [width, height] = fit_to_area([decoded.width(), decoded.height()], area);
    let scaled = if [width, height] == [decoded.width(), decoded.height()] {
        decoded
    } else {
        image::imageops::resize(&decoded, width, height, FilterType::Triangle)
    };

    let art = PixelBuffer::from_raw(width, height, scaled.into_raw())?;
    let page = PixelBuffer::filled(width, height, Pixel::WHITE);
    let line_art = compositor::flatten(&page, &art)?;
    log::info!("Line art ready at {}x{}", width, height);
    Ok(line_art)
}

pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, FileError> {
    let image = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_raw().to_vec())
        .ok_or(FileError::EmptyImage)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(buffer: &PixelBuffer, path: &std::path::Path) -> Result<(), FileError> {
    let bytes = encode_png(buffer)?;
    std::fs::write(path, &bytes)?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Hands the PNG to the browser as a download named `file_name`.
#[cfg(target_arch = "wasm32")]
pub fn download_png(buffer: &PixelBuffer, file_name: &str) -> Result<(), FileError> {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    let js_error = |err: JsValue| FileError::Download(format!("{err:?}"));
    let bytes = encode_png(buffer)?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| FileError::Download("no DOM document".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| FileError::Download("<a> is not an anchor element".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;

    log::info!("Downloaded {} bytes as {}", bytes.len(), file_name);
    Ok(())
}

/// Collects line-art files dropped onto the window.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process any newly dropped files from the UI context
    /// Returns true if any new files were dropped
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Returns the bytes of the first dropped image, consuming the drop.
    pub fn take_dropped_image(&mut self) -> Option<Vec<u8>> {
        let files = std::mem::take(&mut self.dropped_files);
        for file in &files {
            let file_name = display_name(file);
            if !is_image_file(file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }
            match read_dropped_file(file) {
                Ok(bytes) => {
                    log::info!("Loading line art {} ({} bytes)", file_name, bytes.len());
                    return Some(bytes);
                }
                Err(err) => log::error!("Failed to read {}: {}", file_name, err),
            }
        }
        None
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| file.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()));
    matches!(
        name.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

fn read_dropped_file(file: &egui::DroppedFile) -> Result<Vec<u8>, FileError> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return Ok(std::fs::read(path)?);
        }
    }
    Err(FileError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "dropped file has no accessible data",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_wide_area() {
        // 2:1 image into a 400x400 area is limited by width.
        assert_eq!(fit_to_area([200, 100], [400.0, 400.0]), [400, 200]);
    }

    #[test]
    fn test_fit_to_tall_image() {
        // 1:2 image into a 400x300 area is limited by height.
        assert_eq!(fit_to_area([100, 200], [400.0, 300.0]), [150, 300]);
    }

    #[test]
    fn test_fit_truncates_fractions() {
        assert_eq!(fit_to_area([3, 2], [100.0, 100.0]), [100, 66]);
    }

    #[test]
    fn test_decoded_line_art_is_opaque_over_white() {
        // A 2x1 PNG: one black pixel, one fully transparent pixel.
        let source = RgbaImage::from_raw(2, 1, vec![0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
        let mut png = Vec::new();
        source.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();

        let line_art = decode_line_art(&png, [2.0, 1.0]).unwrap();
        assert_eq!(line_art.size(), [2, 1]);
        assert_eq!(line_art.get(0, 0).unwrap(), Pixel::BLACK);
        assert_eq!(line_art.get(1, 0).unwrap(), Pixel::WHITE);
    }

    #[test]
    fn test_png_round_trip_keeps_pixels() {
        let mut buffer = PixelBuffer::filled(3, 2, Pixel::WHITE);
        buffer.set(1, 1, Pixel::rgba(10, 20, 30, 255)).unwrap();
        let png = encode_png(&buffer).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.into_raw(), buffer.into_raw());
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_line_art(b"not an image", [10.0, 10.0]),
            Err(FileError::Image(_))
        ));
    }
}
