//! Document imaging — turns an uploaded PDF into a first-page preview raster
//! plus a transport-safe base64 copy of the identical JPEG bytes.
//!
//! The rasterizer sits behind a trait so the pipeline can be exercised without
//! a native pdfium library, and because pdfium is not async-safe: callers run
//! the production implementation inside `spawn_blocking`.

pub mod pdfium;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use thiserror::Error;

pub use pdfium::PdfiumRasterizer;

/// JPEG quality for the rasterized preview. Lossy on purpose: the image is
/// re-read by a vision model, not printed.
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document could not be decoded as a PDF: {0}")]
    Corrupt(String),

    #[error("document contains no pages")]
    EmptyDocument,

    #[error("failed to rasterize page: {0}")]
    Rasterize(String),

    #[error("failed to encode preview image: {0}")]
    Encode(String),
}

/// First page of an uploaded document, rasterized for preview and transport.
/// Owned by the request that created it; never persisted.
#[derive(Debug, Clone)]
pub struct RenderedPreview {
    /// JPEG-compressed raster of page 1.
    pub jpeg: Vec<u8>,
    /// Base64 copy of exactly the bytes in `jpeg`.
    pub base64: String,
    pub width: u32,
    pub height: u32,
}

/// The rasterizer seam. Production uses `PdfiumRasterizer`; tests substitute
/// fakes that return a fixed preview or count invocations.
pub trait PageRasterizer: Send + Sync {
    fn render_first_page(&self, bytes: &[u8]) -> Result<RenderedPreview, RenderError>;
}

/// JPEG-encodes an RGB raster and base64-wraps the identical bytes.
/// Deterministic for a fixed input image.
pub fn encode_preview(image: &RgbImage) -> Result<RenderedPreview, RenderError> {
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    let base64 = STANDARD.encode(&jpeg);

    Ok(RenderedPreview {
        base64,
        width: image.width(),
        height: image.height(),
        jpeg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([40, 40, 40])
            }
        })
    }

    #[test]
    fn test_encode_preview_is_deterministic() {
        let image = checkerboard(64, 96);
        let first = encode_preview(&image).unwrap();
        let second = encode_preview(&image).unwrap();
        assert_eq!(first.jpeg.len(), second.jpeg.len());
        assert_eq!(first.jpeg, second.jpeg);
        assert_eq!(first.base64.len(), second.base64.len());
        assert_eq!(first.base64, second.base64);
    }

    #[test]
    fn test_encode_preview_base64_wraps_identical_bytes() {
        let image = checkerboard(32, 32);
        let preview = encode_preview(&image).unwrap();
        let decoded = STANDARD.decode(&preview.base64).unwrap();
        assert_eq!(decoded, preview.jpeg);
    }

    #[test]
    fn test_encode_preview_keeps_dimensions() {
        let image = checkerboard(120, 80);
        let preview = encode_preview(&image).unwrap();
        assert_eq!(preview.width, 120);
        assert_eq!(preview.height, 80);
    }

    #[test]
    fn test_encoded_output_is_jpeg() {
        let image = checkerboard(16, 16);
        let preview = encode_preview(&image).unwrap();
        // JPEG SOI marker
        assert_eq!(&preview.jpeg[..3], &[0xFF, 0xD8, 0xFF]);
    }
}
