//! Prompt analysis.
//!
//! Scores a prompt on four dimensions, detects anti-patterns and composes
//! suggestions, orchestrated by [`analyze`].
//!
//! Each stage is a pure function in its own module. Callers can also invoke
//! stages individually.

pub mod anti_patterns;
pub mod clarity;
pub mod length;
pub mod reports;
pub mod specificity;
pub mod structure;
pub mod suggestions;

pub use reports::{AnalysisResult, DetectedAntiPattern, Dimension, DimensionScore, Rating};

use crate::catalog::Catalog;
use crate::text;

/// Suggestion returned for blank input.
pub const EMPTY_PROMPT_SUGGESTION: &str = "Provide a non-empty prompt to analyze.";

/// Analyze a prompt with the built-in catalog.
///
/// Never fails. Blank input yields minimum scores and a single directive
/// suggestion.
pub fn analyze(prompt: &str) -> AnalysisResult {
    analyze_with(prompt, Catalog::builtin())
}

/// Analyze a prompt against a specific catalog.
#[tracing::instrument(skip_all, fields(prompt_len = prompt.len()))]
pub fn analyze_with(prompt: &str, catalog: &'static Catalog) -> AnalysisResult {
    let text = prompt.trim();
    if text.is_empty() {
        tracing::debug!("blank prompt");
        return empty_result(prompt);
    }

    let text_lower = text.to_lowercase();
    let word_count = text::count_words(text);

    let dimensions = vec![
        clarity::score_clarity(text, &text_lower, catalog),
        structure::score_structure(&text_lower, catalog),
        specificity::score_specificity(text, &text_lower, catalog),
        length::score_length(word_count),
    ];
    let anti_patterns = anti_patterns::detect_anti_patterns(text, &text_lower, catalog);
    let suggestions = suggestions::compose_suggestions(&anti_patterns);

    let result = AnalysisResult {
        prompt: text.to_string(),
        dimensions,
        anti_patterns,
        suggestions,
        word_count,
        sentence_count: text::count_sentences(text),
    };
    tracing::debug!(
        overall = result.overall_score(),
        anti_patterns = result.anti_patterns.len(),
        "analysis complete"
    );
    result
}

fn empty_result(prompt: &str) -> AnalysisResult {
    AnalysisResult {
        prompt: prompt.to_string(),
        dimensions: vec![
            DimensionScore::new(Dimension::Clarity, 1.0, "Empty prompt"),
            DimensionScore::new(Dimension::Structure, 1.0, "Empty prompt"),
            DimensionScore::new(Dimension::Specificity, 1.0, "Empty prompt"),
            DimensionScore::new(Dimension::Length, 1.0, "0 words"),
        ],
        anti_patterns: Vec::new(),
        suggestions: vec![EMPTY_PROMPT_SUGGESTION.to_string()],
        word_count: 0,
        sentence_count: 0,
    }
}

/// Round to one decimal place, ties to even.
///
/// Float formatting rounds the exact binary value, so `5.25` becomes `5.2`
/// while `8.15` (stored slightly above the tie) becomes `8.2`.
pub(crate) fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Clamp to `[1.0, 10.0]` and round to one decimal place.
pub(crate) fn clamp_score(value: f64) -> f64 {
    round1(value.clamp(1.0, reports::MAX_SCORE))
}
