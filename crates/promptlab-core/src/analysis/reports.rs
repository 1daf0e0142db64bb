//! Result types for prompt analysis.

use serde::Serialize;

use crate::catalog::AntiPatternDefinition;

/// Highest score a dimension can reach.
pub const MAX_SCORE: f64 = 10.0;

/// One of the four scored quality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    /// Specific, unambiguous wording.
    Clarity,
    /// Role, context, task and output format present.
    Structure,
    /// Constraints, examples and quantitative details.
    Specificity,
    /// Word count in the useful range.
    Length,
}

impl Dimension {
    /// All dimensions in report order.
    pub const ALL: [Self; 4] = [
        Self::Clarity,
        Self::Structure,
        Self::Specificity,
        Self::Length,
    ];

    /// Display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clarity => "Clarity",
            Self::Structure => "Structure",
            Self::Specificity => "Specificity",
            Self::Length => "Length",
        }
    }

    /// Weight in the overall score.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Clarity => 0.30,
            Self::Structure | Self::Specificity => 0.25,
            Self::Length => 0.20,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rating {
    /// 8 and above.
    Excellent,
    /// 6 to 8.
    Good,
    /// 4 to 6.
    Fair,
    /// 2 to 4.
    Weak,
    /// Below 2.
    Poor,
}

impl Rating {
    /// Band for a score on the 0-10 scale.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Excellent
        } else if score >= 6.0 {
            Self::Good
        } else if score >= 4.0 {
            Self::Fair
        } else if score >= 2.0 {
            Self::Weak
        } else {
            Self::Poor
        }
    }

    /// Display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Weak => "Weak",
            Self::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for a single dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    /// Which dimension.
    pub dimension: Dimension,
    /// Score in `[1.0, 10.0]`, one decimal.
    pub score: f64,
    /// Always [`MAX_SCORE`].
    pub max_score: f64,
    /// Human-readable explanation.
    pub details: String,
}

impl DimensionScore {
    /// Build a score out of [`MAX_SCORE`].
    pub fn new(dimension: Dimension, score: f64, details: impl Into<String>) -> Self {
        Self {
            dimension,
            score,
            max_score: MAX_SCORE,
            details: details.into(),
        }
    }

    /// Dimension display name.
    pub const fn name(&self) -> &'static str {
        self.dimension.as_str()
    }

    /// Score as a percentage of the maximum.
    pub fn percentage(&self) -> f64 {
        self.score / self.max_score * 100.0
    }

    /// Qualitative band.
    pub fn label(&self) -> Rating {
        Rating::from_score(self.score)
    }
}

/// An anti-pattern found in a prompt.
#[derive(Debug, Clone)]
pub struct DetectedAntiPattern {
    /// Catalog entry that matched.
    pub pattern: &'static AntiPatternDefinition,
    /// What triggered the detection.
    pub evidence: String,
}

impl PartialEq for DetectedAntiPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.id == other.pattern.id && self.evidence == other.evidence
    }
}

/// Complete analysis of one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The analyzed text (trimmed, or the original input when blank).
    pub prompt: String,
    /// Clarity, Structure, Specificity and Length, in that order.
    pub dimensions: Vec<DimensionScore>,
    /// Detected anti-patterns in catalog order.
    pub anti_patterns: Vec<DetectedAntiPattern>,
    /// Prioritized suggestions.
    pub suggestions: Vec<String>,
    /// Whitespace-separated tokens in the prompt.
    pub word_count: usize,
    /// Sentence estimate.
    pub sentence_count: usize,
}

impl AnalysisResult {
    /// Weighted mean of the dimension scores, one decimal; 0.0 without dimensions.
    pub fn overall_score(&self) -> f64 {
        let (weighted, total) = self
            .dimensions
            .iter()
            .fold((0.0, 0.0), |(sum, weight), dim| {
                let w = dim.dimension.weight();
                (sum + dim.score * w, weight + w)
            });
        if total == 0.0 {
            return 0.0;
        }
        super::round1(weighted / total)
    }

    /// Qualitative band for the overall score.
    pub fn overall_label(&self) -> Rating {
        Rating::from_score(self.overall_score())
    }

    /// Look up a dimension score.
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Returns `true` if the anti-pattern with this id was detected.
    pub fn has_anti_pattern(&self, id: &str) -> bool {
        self.anti_patterns.iter().any(|d| d.pattern.id == id)
    }
}
