//! The résumé-analysis core: input validation, prompt catalog, pipeline
//! orchestration, match-score extraction, and the HTTP handlers.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod score;
pub mod validation;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The three fixed evaluation styles, selected per user action.
///
/// This is a closed enum on purpose: an unknown mode is unrepresentable, so
/// the prompt catalog needs no defensive fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Analysis,
    Improvement,
    Matching,
}

impl AnalysisMode {
    /// Parses the `mode` form field. Unknown strings are a validation error
    /// at the edge, never a silent default.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "analysis" => Some(AnalysisMode::Analysis),
            "improvement" => Some(AnalysisMode::Improvement),
            "matching" => Some(AnalysisMode::Matching),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Analysis => "analysis",
            AnalysisMode::Improvement => "improvement",
            AnalysisMode::Matching => "matching",
        }
    }

    /// Conventional filename for the downloadable report of this action.
    pub fn download_filename(self) -> &'static str {
        match self {
            AnalysisMode::Analysis => "resume_analysis.txt",
            AnalysisMode::Improvement => "skill_improvement_plan.txt",
            AnalysisMode::Matching => "matching_analysis.txt",
        }
    }
}

/// A résumé file as received from the form. Read exactly once per action,
/// dropped when the request completes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedDocument {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_three_modes() {
        assert_eq!(AnalysisMode::parse("analysis"), Some(AnalysisMode::Analysis));
        assert_eq!(
            AnalysisMode::parse("improvement"),
            Some(AnalysisMode::Improvement)
        );
        assert_eq!(AnalysisMode::parse("matching"), Some(AnalysisMode::Matching));
    }

    #[test]
    fn test_parse_is_case_and_whitespace_tolerant() {
        assert_eq!(
            AnalysisMode::parse(" Matching "),
            Some(AnalysisMode::Matching)
        );
        assert_eq!(AnalysisMode::parse("ANALYSIS"), Some(AnalysisMode::Analysis));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert_eq!(AnalysisMode::parse("summary"), None);
        assert_eq!(AnalysisMode::parse(""), None);
    }

    #[test]
    fn test_download_filenames_follow_convention() {
        assert_eq!(
            AnalysisMode::Analysis.download_filename(),
            "resume_analysis.txt"
        );
        assert_eq!(
            AnalysisMode::Improvement.download_filename(),
            "skill_improvement_plan.txt"
        );
        assert_eq!(
            AnalysisMode::Matching.download_filename(),
            "matching_analysis.txt"
        );
    }
}
