use std::io::Cursor;

use image::ImageEncoder;

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::backend::FrameRGBA;

pub const DEFAULT_JPEG_QUALITY: u8 = 94;

/// Turns a rendered frame into compressed image bytes.
pub trait RasterEncoder {
    fn encode(&self, frame: &FrameRGBA) -> PosterResult<Vec<u8>>;
}

/// Lossless RGBA PNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngRasterEncoder;

/// Lossy baseline JPEG; alpha is dropped.
#[derive(Clone, Copy, Debug)]
pub struct JpegRasterEncoder {
    /// 1..=100.
    pub quality: u8,
}

impl Default for JpegRasterEncoder {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RasterEncoder for PngRasterEncoder {
    fn encode(&self, frame: &FrameRGBA) -> PosterResult<Vec<u8>> {
        let rgba = frame.to_straight_rgba8()?;
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(Cursor::new(&mut out))
            .write_image(
                &rgba,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| PosterError::encoding(format!("png: {e}")))?;
        Ok(out)
    }
}

impl RasterEncoder for JpegRasterEncoder {
    fn encode(&self, frame: &FrameRGBA) -> PosterResult<Vec<u8>> {
        let rgba = frame.to_straight_rgba8()?;
        let rgb: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let mut out = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(
            Cursor::new(&mut out),
            self.quality.clamp(1, 100),
        )
        .write_image(
            &rgb,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PosterError::encoding(format!("jpeg: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
