//! Anti-pattern detection.
//!
//! Walks the catalog in declaration order and evaluates each entry's
//! [`DetectionStrategy`].

use super::reports::DetectedAntiPattern;
use crate::catalog::{AntiPatternDefinition, Catalog, DetectionStrategy};

/// Detect every catalog anti-pattern present in a prompt.
///
/// Output is in catalog order with at most one entry per pattern.
pub fn detect_anti_patterns(
    text: &str,
    text_lower: &str,
    catalog: &'static Catalog,
) -> Vec<DetectedAntiPattern> {
    catalog
        .patterns()
        .iter()
        .filter_map(|pattern| {
            evaluate(pattern, text, text_lower, catalog).map(|evidence| {
                tracing::trace!(pattern = pattern.id, %evidence, "anti-pattern detected");
                DetectedAntiPattern { pattern, evidence }
            })
        })
        .collect()
}

/// Evidence for a single pattern, or `None` when it is absent.
fn evaluate(
    pattern: &AntiPatternDefinition,
    text: &str,
    text_lower: &str,
    catalog: &Catalog,
) -> Option<String> {
    match &pattern.strategy {
        DetectionStrategy::AbsenceOfKeywords { bank, evidence } => (!catalog
            .bank(*bank)
            .contains_any(text_lower))
        .then(|| (*evidence).to_string()),
        DetectionStrategy::ZeroKeywordHits { bank, evidence } => {
            (catalog.bank(*bank).hits(text_lower) == 0).then(|| (*evidence).to_string())
        }
        DetectionStrategy::ThresholdCount {
            estimator,
            threshold,
        } => {
            let count = estimator.count(text);
            (count >= *threshold).then(|| estimator.evidence(count))
        }
        DetectionStrategy::SignalThenKeyword { signals } => catalog
            .signals(*signals)
            .first_match(text, text_lower)
            .map(|found| found.evidence()),
    }
}
