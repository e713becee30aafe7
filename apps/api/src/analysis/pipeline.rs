//! Analysis pipeline — one linear, per-action flow:
//! validate → rasterize first page → call the model → interpret.
//!
//! No shared mutable state across actions, no retries, no background work.
//! The rasterizer runs in `spawn_blocking` because pdfium is not async-safe;
//! the model call is the only other operation that blocks for an
//! externally-determined duration.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::prompts::prompt_for;
use crate::analysis::score::extract_match_score;
use crate::analysis::validation::{validate_document, validate_job_description};
use crate::analysis::{AnalysisMode, UploadedDocument};
use crate::errors::AppError;
use crate::llm_client::{EncodedPayload, GenerationRequest, GenerativeModel};
use crate::pdf::{PageRasterizer, RenderedPreview};

/// One user action as decoded from the form.
#[derive(Debug)]
pub struct Submission {
    pub job_description: String,
    pub mode: AnalysisMode,
    pub document: UploadedDocument,
}

/// Result of the matching-mode score extraction.
///
/// `Unrecognized` is deliberately distinct from `Recognized(0)`: a response
/// the cascade cannot read is not a 0% match, and the two render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "outcome", content = "score")]
pub enum MatchOutcome {
    Recognized(u8),
    Unrecognized,
}

/// Everything a completed action hands to the presentation layer.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub mode: AnalysisMode,
    pub response_text: String,
    pub preview: RenderedPreview,
    /// Populated only for `AnalysisMode::Matching`; the extractor itself is
    /// mode-agnostic, so the pairing is enforced here and nowhere else.
    pub match_outcome: Option<MatchOutcome>,
}

pub async fn run_analysis(
    model: &Arc<dyn GenerativeModel>,
    rasterizer: &Arc<dyn PageRasterizer>,
    submission: Submission,
) -> Result<AnalysisOutcome, AppError> {
    validate_job_description(&submission.job_description)?;
    validate_document(&submission.document)?;

    info!(
        mode = submission.mode.as_str(),
        file_size = submission.document.size(),
        "starting analysis action"
    );

    let preview = {
        let rasterizer = Arc::clone(rasterizer);
        let data = submission.document.data.clone();
        tokio::task::spawn_blocking(move || rasterizer.render_first_page(&data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("render task panicked: {e}")))??
    };

    let request = GenerationRequest {
        job_description: &submission.job_description,
        payload: EncodedPayload {
            mime_type: "image/jpeg",
            data: &preview.base64,
        },
        prompt: prompt_for(submission.mode),
    };

    let response_text = model.generate(&request).await?;

    let match_outcome = match submission.mode {
        AnalysisMode::Matching => Some(match extract_match_score(&response_text) {
            Some(score) => MatchOutcome::Recognized(score),
            None => {
                warn!("could not extract match percentage from response");
                MatchOutcome::Unrecognized
            }
        }),
        AnalysisMode::Analysis | AnalysisMode::Improvement => None,
    };

    info!(mode = submission.mode.as_str(), "analysis action completed");

    Ok(AnalysisOutcome {
        mode: submission.mode,
        response_text,
        preview,
        match_outcome,
    })
}
