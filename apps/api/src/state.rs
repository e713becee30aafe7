use std::sync::Arc;

use crate::llm_client::GenerativeModel;
use crate::pdf::PageRasterizer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is immutable after startup; requests never share mutable
/// state with each other. Configuration is consumed at construction time
/// (the Gemini client takes its key and model in `new`), not read ambiently.
#[derive(Clone)]
pub struct AppState {
    /// The generative model seam. Production: `GeminiClient`.
    pub model: Arc<dyn GenerativeModel>,
    /// The PDF rasterizer seam. Production: `PdfiumRasterizer`.
    pub rasterizer: Arc<dyn PageRasterizer>,
}
