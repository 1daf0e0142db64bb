//! JSON and Markdown reports.
//!
//! Both renderers consume an [`AnalysisResult`] read-only, plus an optional
//! [`EnhancementResult`]. The terminal renderer lives in the CLI crate.

use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::Serialize;

use crate::analysis::{AnalysisResult, DetectedAntiPattern, DimensionScore};
use crate::catalog::{Category, Severity};
use crate::enhance::EnhancementResult;

/// Serializable view of an analysis, as emitted by `--json` and the MCP server.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct JsonReport {
    /// Analyzed prompt text.
    pub prompt: String,
    /// Weighted overall score.
    pub overall_score: f64,
    /// Band for the overall score.
    pub overall_label: String,
    /// Words in the prompt.
    pub word_count: usize,
    /// Sentences in the prompt.
    pub sentence_count: usize,
    /// Per-dimension scores.
    pub dimensions: Vec<JsonDimension>,
    /// Detected anti-patterns.
    pub anti_patterns: Vec<JsonAntiPattern>,
    /// Prioritized suggestions.
    pub suggestions: Vec<String>,
    /// Remote rewrite, when requested and successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<JsonEnhancement>,
}

/// One dimension in a [`JsonReport`].
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct JsonDimension {
    /// Dimension name.
    pub name: String,
    /// Score out of `max_score`.
    pub score: f64,
    /// Always 10.
    pub max_score: f64,
    /// Qualitative band.
    pub label: String,
    /// Explanation.
    pub details: String,
}

/// One anti-pattern in a [`JsonReport`].
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct JsonAntiPattern {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lowercase category.
    pub category: Category,
    /// Lowercase severity.
    pub severity: Severity,
    /// What the problem is.
    pub description: String,
    /// How to fix it.
    pub suggestion: String,
    /// What triggered detection.
    pub evidence: String,
}

/// Enhancement section of a [`JsonReport`].
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct JsonEnhancement {
    /// Rewritten prompt.
    pub improved_prompt: String,
    /// What changed and why.
    pub explanation: String,
    /// Provider identifier.
    pub provider: String,
    /// Model used.
    pub model: String,
}

impl JsonReport {
    /// Build the serializable view.
    pub fn new(result: &AnalysisResult, enhancement: Option<&EnhancementResult>) -> Self {
        Self {
            prompt: result.prompt.clone(),
            overall_score: result.overall_score(),
            overall_label: result.overall_label().to_string(),
            word_count: result.word_count,
            sentence_count: result.sentence_count,
            dimensions: result.dimensions.iter().map(JsonDimension::from).collect(),
            anti_patterns: result.anti_patterns.iter().map(JsonAntiPattern::from).collect(),
            suggestions: result.suggestions.clone(),
            enhancement: enhancement.map(JsonEnhancement::from),
        }
    }
}

impl From<&DimensionScore> for JsonDimension {
    fn from(dim: &DimensionScore) -> Self {
        Self {
            name: dim.name().to_string(),
            score: dim.score,
            max_score: dim.max_score,
            label: dim.label().to_string(),
            details: dim.details.clone(),
        }
    }
}

impl From<&DetectedAntiPattern> for JsonAntiPattern {
    fn from(detected: &DetectedAntiPattern) -> Self {
        let pattern = detected.pattern;
        Self {
            id: pattern.id.to_string(),
            name: pattern.name.to_string(),
            category: pattern.category,
            severity: pattern.severity,
            description: pattern.description.to_string(),
            suggestion: pattern.suggestion.to_string(),
            evidence: detected.evidence.clone(),
        }
    }
}

impl From<&EnhancementResult> for JsonEnhancement {
    fn from(enhancement: &EnhancementResult) -> Self {
        Self {
            improved_prompt: enhancement.improved_prompt.clone(),
            explanation: enhancement.explanation.clone(),
            provider: enhancement.provider.clone(),
            model: enhancement.model.clone(),
        }
    }
}

/// Render the analysis as pretty-printed JSON.
pub fn render_json(
    result: &AnalysisResult,
    enhancement: Option<&EnhancementResult>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(result, enhancement))
}

/// Render the analysis as a Markdown document.
pub fn render_markdown(result: &AnalysisResult, enhancement: Option<&EnhancementResult>) -> String {
    let mut out = String::new();

    out.push_str("# PromptLab Analysis Report\n\n");

    out.push_str("## Prompt\n\n");
    for line in result.prompt.lines() {
        if line.is_empty() {
            out.push_str(">\n");
        } else {
            let _ = writeln!(out, "> {line}");
        }
    }
    if result.prompt.is_empty() {
        out.push_str(">\n");
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "**Words:** {} | **Sentences:** {}\n",
        result.word_count, result.sentence_count
    );

    let _ = writeln!(
        out,
        "## Overall Score: {:.1}/10 ({})\n",
        result.overall_score(),
        result.overall_label()
    );

    out.push_str("## Dimension Scores\n\n");
    out.push_str("| Dimension | Score | Rating | Details |\n");
    out.push_str("|-----------|-------|--------|---------|\n");
    for dim in &result.dimensions {
        let _ = writeln!(
            out,
            "| {} | {:.1}/10 | {} | {} |",
            dim.name(),
            dim.score,
            dim.label(),
            dim.details.replace('|', "\\|")
        );
    }
    out.push('\n');

    if !result.anti_patterns.is_empty() {
        out.push_str("## Anti-Patterns Detected\n\n");
        for detected in &result.anti_patterns {
            let pattern = detected.pattern;
            let _ = writeln!(
                out,
                "- **[{}] {}**: {}",
                pattern.severity.as_str().to_uppercase(),
                pattern.name,
                pattern.description
            );
            if !detected.evidence.is_empty() {
                let _ = writeln!(out, "  - *Evidence:* {}", detected.evidence);
            }
        }
        out.push('\n');
    }

    if !result.suggestions.is_empty() {
        out.push_str("## Suggestions\n\n");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            let _ = writeln!(out, "{}. {suggestion}", i + 1);
        }
        out.push('\n');
    }

    if let Some(enhancement) = enhancement {
        out.push_str("## AI-Enhanced Prompt\n\n");
        let _ = writeln!(
            out,
            "*Provider: {}/{}*\n",
            enhancement.provider, enhancement.model
        );
        let _ = writeln!(out, "```\n{}\n```\n", enhancement.improved_prompt);
        if !enhancement.explanation.is_empty() {
            let _ = writeln!(out, "**Explanation:** {}\n", enhancement.explanation);
        }
    }

    out
}
