mod analysis;
mod config;
mod errors;
mod llm_client;
mod pdf;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, GenerativeModel};
use crate::pdf::{PageRasterizer, PdfiumRasterizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Expert API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Gemini client
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    info!("Gemini client initialized (model: {})", gemini.model());
    let model: Arc<dyn GenerativeModel> = Arc::new(gemini);

    // Initialize the PDF rasterizer
    let rasterizer: Arc<dyn PageRasterizer> = Arc::new(PdfiumRasterizer);
    info!("PDF rasterizer initialized");

    // Build app state
    let state = AppState { model, rasterizer };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
