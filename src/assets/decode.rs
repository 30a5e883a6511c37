use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{SharecardError, SharecardResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raster image in row-major premultiplied RGBA8.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes.
    pub rgba8_premul: Vec<u8>,
}

impl PreparedImage {
    /// Premultiply a straight-alpha RGBA image.
    pub fn from_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul,
        }
    }

    /// Convert back to a straight-alpha RGBA image.
    ///
    /// Fails when the pixel buffer does not hold exactly `width * height` pixels.
    pub fn to_rgba(&self) -> SharecardResult<image::RgbaImage> {
        let mut raw = self.rgba8_premul.clone();
        unpremultiply_rgba8_in_place(&mut raw);
        let len = raw.len();
        image::RgbaImage::from_raw(self.width, self.height, raw).ok_or_else(|| {
            SharecardError::validation(format!(
                "{}x{} image cannot hold {len} rgba8 bytes",
                self.width, self.height
            ))
        })
    }
}

/// Decode an encoded image into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SharecardResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PreparedImage::from_rgba(dyn_img.to_rgba8()))
}

/// Read and decode an image file into straight-alpha RGBA8.
pub fn load_rgba_image(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Convert straight-alpha RGBA8 to premultiplied, rounding to nearest.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Inverse of [`premultiply_rgba8_in_place`]; fully transparent pixels stay zero.
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
