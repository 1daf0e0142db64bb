//! Structure scoring.
//!
//! A well-formed prompt has four parts: a role, some context, a task verb
//! and an output format. Each present part is worth 2.5 points.

use super::reports::{Dimension, DimensionScore};
use crate::catalog::{BankId, Catalog};
use crate::text;

const COMPONENT_POINTS: f64 = 2.5;

/// Score whether a prompt has role, context, task and output format.
pub fn score_structure(text_lower: &str, catalog: &Catalog) -> DimensionScore {
    let components = [
        (
            catalog.bank(BankId::Role).contains_any(text_lower),
            "role",
            "role/persona",
        ),
        (
            catalog.bank(BankId::Context).contains_any(text_lower),
            "context",
            "context/background",
        ),
        (text::has_task_verb(text_lower), "task", "clear task verb"),
        (
            catalog.bank(BankId::OutputFormat).contains_any(text_lower),
            "output format",
            "output format",
        ),
    ];

    let mut score = 0.0;
    let mut present = Vec::new();
    let mut missing = Vec::new();
    for (found, has_label, missing_label) in components {
        if found {
            score += COMPONENT_POINTS;
            present.push(has_label);
        } else {
            missing.push(missing_label);
        }
    }

    let mut parts = Vec::with_capacity(2);
    if !present.is_empty() {
        parts.push(format!("Has: {}", present.join(", ")));
    }
    if !missing.is_empty() {
        parts.push(format!("Missing: {}", missing.join(", ")));
    }

    DimensionScore::new(
        Dimension::Structure,
        super::clamp_score(score),
        parts.join(". "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(text: &str) -> DimensionScore {
        score_structure(&text.to_lowercase(), Catalog::builtin())
    }

    #[test]
    fn all_components_present() {
        let score = structure(
            "You are a senior editor. The audience is new hires. \
             Summarize the handbook as a numbered list.",
        );
        assert!((score.score - 10.0).abs() < f64::EPSILON);
        assert_eq!(score.details, "Has: role, context, task, output format");
    }

    #[test]
    fn nothing_present_clamps_to_one() {
        let score = structure("hello there");
        assert!((score.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            score.details,
            "Missing: role/persona, context/background, clear task verb, output format"
        );
    }

    #[test]
    fn mixed_components() {
        let score = structure("Write a poem");
        assert!((score.score - 2.5).abs() < f64::EPSILON);
        assert_eq!(
            score.details,
            "Has: task. Missing: role/persona, context/background, output format"
        );
    }
}
