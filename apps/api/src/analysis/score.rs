//! Match-score extraction from free-form model output.
//!
//! An ordered, case-insensitive cascade of patterns is applied to the text;
//! the first pattern whose captured integer lies in [0, 100] wins. An
//! out-of-range capture falls through to the next pattern instead of failing
//! the whole scan. Pattern order is observable behavior on ambiguous inputs
//! and must not be reordered or "improved" to a best-of-all-patterns search.
//!
//! No pattern in range returns `None`, the explicit "unrecognized" outcome.
//! Callers must not collapse `None` into 0: a genuine 0% match and a response
//! the cascade cannot read are different things.

use once_cell::sync::Lazy;
use regex::Regex;

/// The separator between a label and its number: markdown emphasis, an
/// optional colon, and whitespace. The matching prompt asks for
/// `**Match Percentage**: XX%`, so bare `[:\s]` would miss the model's own
/// well-formed output.
const SEP: &str = r"[*:\s]*";

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?i)Match Percentage{SEP}(\d+)%"),
        format!(r"(?i)Match{SEP}(\d+)%"),
        format!(r"(?i)Percentage{SEP}(\d+)%"),
        r"(?i)(\d+)%\s*match".to_string(),
        format!(r"(?i)Score{SEP}(\d+)%"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("score pattern must compile"))
    .collect()
});

/// Scans model output for a match percentage. First in-range match wins.
pub fn extract_match_score(text: &str) -> Option<u8> {
    for pattern in PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Ok(value) = captures[1].parse::<u32>() {
                if value <= 100 {
                    return Some(value as u8);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_match_percentage_extracts_exactly() {
        for p in 0..=100u8 {
            let text = format!("Match Percentage: {p}%");
            assert_eq!(extract_match_score(&text), Some(p), "failed for {p}");
        }
    }

    #[test]
    fn test_markdown_emphasis_is_tolerated() {
        let text = "**Match Percentage**: 72%\n**Missing Keywords**:\n- Kubernetes";
        assert_eq!(extract_match_score(text), Some(72));
    }

    #[test]
    fn test_bare_match_label() {
        assert_eq!(extract_match_score("Match: 55%"), Some(55));
    }

    #[test]
    fn test_percentage_label() {
        assert_eq!(extract_match_score("Overall Percentage 83%"), Some(83));
    }

    #[test]
    fn test_trailing_match_phrasing() {
        assert_eq!(
            extract_match_score("The resume is a 67% match with this role."),
            Some(67)
        );
    }

    #[test]
    fn test_score_label() {
        assert_eq!(extract_match_score("Final Score: 91%"), Some(91));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_match_score("MATCH PERCENTAGE: 40%"), Some(40));
        assert_eq!(extract_match_score("match percentage: 40%"), Some(40));
    }

    #[test]
    fn test_first_pattern_in_cascade_wins() {
        // "Match: 55%" satisfies pattern 2, "Score: 88%" pattern 5.
        let text = "Match: 55%. Score: 88%.";
        assert_eq!(extract_match_score(text), Some(55));
    }

    #[test]
    fn test_out_of_range_capture_falls_through() {
        // 150 matches the first pattern but fails the bounds check; the scan
        // continues and the Score pattern recovers a legal value.
        let text = "Match Percentage: 150%. Score: 80%.";
        assert_eq!(extract_match_score(text), Some(80));
    }

    #[test]
    fn test_boundary_values() {
        assert_eq!(extract_match_score("Match Percentage: 0%"), Some(0));
        assert_eq!(extract_match_score("Match Percentage: 100%"), Some(100));
        assert_eq!(extract_match_score("Match Percentage: 101%"), None);
    }

    #[test]
    fn test_unrecognizable_text_is_none_not_zero() {
        assert_eq!(extract_match_score("A strong candidate overall."), None);
        assert_eq!(extract_match_score(""), None);
    }

    #[test]
    fn test_genuine_zero_is_distinguishable_from_unrecognized() {
        assert_eq!(extract_match_score("Match Percentage: 0%"), Some(0));
        assert_eq!(extract_match_score("no percentage here"), None);
    }
}
