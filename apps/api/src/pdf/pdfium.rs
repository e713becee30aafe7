//! Production rasterizer backed by pdfium.
//!
//! pdfium keeps global C++ state and is not thread-safe, so the binding is
//! created per call and the whole render runs on one blocking thread
//! (`spawn_blocking` at the call site).

use image::RgbaImage;
use pdfium_render::prelude::*;
use tracing::info;

use super::{encode_preview, RenderError, RenderedPreview};

/// Fixed upscale factor for page 1: trades payload size for enough fidelity
/// that the vision model can read body text.
const PAGE_SCALE: f32 = 2.0;

pub struct PdfiumRasterizer;

impl super::PageRasterizer for PdfiumRasterizer {
    fn render_first_page(&self, bytes: &[u8]) -> Result<RenderedPreview, RenderError> {
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| RenderError::Rasterize(format!("pdfium unavailable: {e}")))?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| RenderError::Corrupt(e.to_string()))?;

        let pages = document.pages();
        if pages.len() == 0 {
            return Err(RenderError::EmptyDocument);
        }

        let page = pages
            .first()
            .map_err(|e| RenderError::Corrupt(e.to_string()))?;

        let bitmap = page
            .render_with_config(&PdfRenderConfig::new().scale_page_by_factor(PAGE_SCALE))
            .map_err(|e| RenderError::Rasterize(e.to_string()))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;

        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
            .ok_or_else(|| RenderError::Rasterize("bitmap buffer size mismatch".to_string()))?;
        let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

        let preview = encode_preview(&rgb)?;

        info!(
            width = preview.width,
            height = preview.height,
            jpeg_bytes = preview.jpeg.len(),
            "rendered first page of uploaded document"
        );

        Ok(preview)
    }
}
