//! Specificity scoring.
//!
//! Starts low at 2.0; constraints, examples, numbers and a multi-line
//! layout earn points.

use super::reports::{Dimension, DimensionScore};
use crate::catalog::{BankId, Catalog};
use crate::text;

const BASE: f64 = 2.0;

/// Score how constrained and concrete a prompt is.
pub fn score_specificity(text: &str, text_lower: &str, catalog: &Catalog) -> DimensionScore {
    let mut score = BASE;
    let mut details = Vec::new();

    match catalog.bank(BankId::Constraint).hits(text_lower) {
        hits if hits >= 5 => {
            score += 3.0;
            details.push("Strong constraints present");
        }
        hits if hits >= 2 => {
            score += 2.0;
            details.push("Some constraints present");
        }
        1 => {
            score += 1.0;
            details.push("Minimal constraints");
        }
        _ => details.push("No constraints detected"),
    }

    if catalog.bank(BankId::Example).contains_any(text_lower) {
        score += 2.5;
        details.push("Includes examples");
    } else {
        details.push("No examples provided");
    }

    let numbers = text::count_numeric_tokens(text);
    if numbers >= 3 {
        score += 1.5;
        details.push("Multiple numeric details");
    } else if numbers >= 1 {
        score += 0.75;
    }

    if text::count_nonblank_lines(text) >= 5 {
        score += 1.0;
        details.push("Well-structured multi-line prompt");
    }

    DimensionScore::new(
        Dimension::Specificity,
        super::clamp_score(score),
        details.join("; "),
    )
}
