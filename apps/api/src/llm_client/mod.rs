//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All LLM interactions MUST go through this module.
//!
//! One action maps to exactly one `generateContent` call. There is no retry
//! logic: every provider failure is terminal for the current user action and
//! is surfaced to the caller as a classified `LlmError`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Finish reasons the provider reports when it halts a candidate for safety.
const SAFETY_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("prompt blocked by provider safety filters")]
    ContentBlocked,

    #[error("generation stopped by provider safety filters")]
    GenerationStopped,

    #[error("provider returned no usable text")]
    EmptyResponse,
}

/// A transport-encoded image attachment: base64 data plus its mime type.
#[derive(Debug, Clone)]
pub struct EncodedPayload<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

/// One unit of work sent to the generative model. Constructed fresh per action.
///
/// Part order on the wire is fixed: job description, image attachment, prompt.
#[derive(Debug)]
pub struct GenerationRequest<'a> {
    pub job_description: &'a str,
    pub payload: EncodedPayload<'a>,
    pub prompt: &'a str,
}

/// The generative model seam. Production uses `GeminiClient`; tests substitute
/// counting fakes so the pipeline can assert that no call is made on invalid input.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent REST API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client used by the analysis pipeline.
/// Wraps the `generateContent` endpoint with outcome classification.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text {
                        text: request.job_description,
                    },
                    RequestPart::Inline {
                        inline_data: InlineData {
                            mime_type: request.payload.mime_type,
                            data: request.payload.data,
                        },
                    },
                    RequestPart::Text {
                        text: request.prompt,
                    },
                ],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let text = classify_response(gemini_response)?;

        debug!("LLM call succeeded: {} chars of text", text.len());

        Ok(text)
    }
}

/// Classifies a successful HTTP response into text or a typed failure.
///
/// Order matters: a prompt-level block outranks everything, then a candidate
/// halted for safety, then the empty-text case.
fn classify_response(response: GeminiResponse) -> Result<String, LlmError> {
    if let Some(feedback) = &response.prompt_feedback {
        if feedback.block_reason.is_some() {
            return Err(LlmError::ContentBlocked);
        }
    }

    let Some(candidate) = response.candidates.first() else {
        return Err(LlmError::EmptyResponse);
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if SAFETY_FINISH_REASONS.contains(&reason) {
            return Err(LlmError::GenerationStopped);
        }
    }

    let text: String = candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeminiResponse {
        serde_json::from_str(json).expect("fixture must parse")
    }

    #[test]
    fn test_classify_success_returns_text() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"parts": [{"text": "**Match Percentage**: 72%"}]},
                    "finishReason": "STOP"
                }]
            }"#,
        );
        assert_eq!(
            classify_response(response).unwrap(),
            "**Match Percentage**: 72%"
        );
    }

    #[test]
    fn test_classify_concatenates_multiple_text_parts() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"parts": [{"text": "part one "}, {"text": "part two"}]},
                    "finishReason": "STOP"
                }]
            }"#,
        );
        assert_eq!(classify_response(response).unwrap(), "part one part two");
    }

    #[test]
    fn test_classify_blocked_prompt() {
        let response = parse(
            r#"{
                "candidates": [],
                "promptFeedback": {"blockReason": "SAFETY"}
            }"#,
        );
        assert!(matches!(
            classify_response(response),
            Err(LlmError::ContentBlocked)
        ));
    }

    #[test]
    fn test_classify_safety_stop() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"parts": [{"text": "partial"}]},
                    "finishReason": "SAFETY"
                }]
            }"#,
        );
        assert!(matches!(
            classify_response(response),
            Err(LlmError::GenerationStopped)
        ));
    }

    #[test]
    fn test_classify_no_candidates_is_empty_response() {
        let response = parse(r#"{"candidates": []}"#);
        assert!(matches!(
            classify_response(response),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_classify_whitespace_only_text_is_empty_response() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"parts": [{"text": "   \n"}]},
                    "finishReason": "STOP"
                }]
            }"#,
        );
        assert!(matches!(
            classify_response(response),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_request_parts_serialize_in_order() {
        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text { text: "a job" },
                    RequestPart::Inline {
                        inline_data: InlineData {
                            mime_type: "image/jpeg",
                            data: "QUJD",
                        },
                    },
                    RequestPart::Text { text: "a prompt" },
                ],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "a job");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "QUJD");
        assert_eq!(parts[2]["text"], "a prompt");
    }
}
