//! Axum route handlers for the Analysis API.
//!
//! The handler is a thin edge: decode the multipart form, hand the submission
//! to the pipeline, shape the outcome into the response JSON. Everything the
//! front end renders (result text, preview image, metrics, chart slices,
//! download name) arrives already validated.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::analysis::pipeline::{run_analysis, AnalysisOutcome, MatchOutcome, Submission};
use crate::analysis::{AnalysisMode, UploadedDocument};
use crate::errors::AppError;
use crate::state::AppState;

/// Pie-chart styling carried over to the front end: match slice green,
/// gap slice red, match slice pulled out slightly.
const CHART_COLORS: [&str; 2] = ["#4CAF50", "#FF5733"];
const CHART_EXPLODE: [f32; 2] = [0.1, 0.0];
const CHART_LABELS: [&str; 2] = ["Match", "Gap"];

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub mode: AnalysisMode,
    /// The model's free-text evaluation, rendered as markdown by the client.
    pub result: String,
    pub document: DocumentInfo,
    pub preview: PreviewPayload,
    pub download: DownloadInfo,
    /// Present only for matching mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_report: Option<MatchReport>,
}

#[derive(Debug, Serialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub size_bytes: usize,
}

/// First-page raster for on-screen preview, base64-encoded JPEG.
#[derive(Debug, Serialize)]
pub struct PreviewPayload {
    pub mime_type: &'static str,
    pub data: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct DownloadInfo {
    pub filename: &'static str,
    pub media_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub extraction: MatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MatchMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<PieChart>,
}

/// The three headline numbers shown above the chart.
#[derive(Debug, Serialize)]
pub struct MatchMetrics {
    pub match_percentage: u8,
    pub out_of: u8,
    pub gap: u8,
}

#[derive(Debug, Serialize)]
pub struct PieChart {
    pub labels: [&'static str; 2],
    pub slices: [u8; 2],
    pub colors: [&'static str; 2],
    pub explode: [f32; 2],
}

impl MatchReport {
    /// An unrecognized score produces no metrics and no chart: rendering a
    /// pie from a guessed 0 would misreport the candidate.
    pub fn from_outcome(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Recognized(score) => MatchReport {
                extraction: outcome,
                metrics: Some(MatchMetrics {
                    match_percentage: score,
                    out_of: 100,
                    gap: 100 - score,
                }),
                chart: Some(PieChart {
                    labels: CHART_LABELS,
                    slices: [score, 100 - score],
                    colors: CHART_COLORS,
                    explode: CHART_EXPLODE,
                }),
            },
            MatchOutcome::Unrecognized => MatchReport {
                extraction: outcome,
                metrics: None,
                chart: None,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart fields: `job_description` (text), `mode` (analysis | improvement
/// | matching), `resume` (PDF file, ≤ 10 MiB).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let submission = decode_submission(multipart).await?;

    let document_info = DocumentInfo {
        filename: submission.document.filename.clone(),
        size_bytes: submission.document.size(),
    };

    let outcome = run_analysis(&state.model, &state.rasterizer, submission).await?;

    Ok(Json(build_response(outcome, document_info)))
}

async fn decode_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut job_description: Option<String> = None;
    let mut mode: Option<AnalysisMode> = None;
    let mut document: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed form data: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Malformed form data: {e}")))?;
                job_description = Some(text);
            }
            Some("mode") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Malformed form data: {e}")))?;
                mode = Some(AnalysisMode::parse(&text).ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "Unknown analysis mode '{}'. Expected analysis, improvement, or matching.",
                        text.trim()
                    ))
                })?);
            }
            Some("resume") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Malformed form data: {e}")))?;
                document = Some(UploadedDocument { filename, data });
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(Submission {
        job_description: job_description.ok_or_else(|| {
            AppError::InvalidInput("Please enter a job description.".to_string())
        })?,
        mode: mode.ok_or_else(|| {
            AppError::InvalidInput("Missing 'mode' field.".to_string())
        })?,
        document: document.ok_or_else(|| {
            AppError::InvalidInput("Please upload your resume (PDF format).".to_string())
        })?,
    })
}

fn build_response(outcome: AnalysisOutcome, document: DocumentInfo) -> AnalyzeResponse {
    AnalyzeResponse {
        mode: outcome.mode,
        result: outcome.response_text,
        document,
        preview: PreviewPayload {
            mime_type: "image/jpeg",
            data: outcome.preview.base64,
            width: outcome.preview.width,
            height: outcome.preview.height,
        },
        download: DownloadInfo {
            filename: outcome.mode.download_filename(),
            media_type: "text/plain",
        },
        match_report: outcome.match_outcome.map(MatchReport::from_outcome),
    }
}
