use crate::buffer::PixelBuffer;
use crate::color::Pixel;
use crate::error::CanvasError;

/// Flattens the paint layer over the line art into a new buffer.
///
/// Uses straight-alpha source-over: opaque paint replaces the line art,
/// transparent paint lets it show through.
pub fn flatten(boundary: &PixelBuffer, paint: &PixelBuffer) -> Result<PixelBuffer, CanvasError> {
    boundary.ensure_same_size(paint)?;

    let data = boundary
        .pixels()
        .zip(paint.pixels())
        .flat_map(|(below, above)| over(above, below).to_bytes())
        .collect();
    PixelBuffer::from_raw(boundary.width(), boundary.height(), data)
}

/// Composites `src` over `dst`.
pub fn over(src: Pixel, dst: Pixel) -> Pixel {
    match src.a {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let src_a = f32::from(src.a) / 255.0;
    let dst_a = f32::from(dst.a) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let channel = |s: u8, d: u8| {
        let c = (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Pixel::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}
