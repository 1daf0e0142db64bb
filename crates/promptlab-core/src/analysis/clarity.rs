//! Clarity scoring.
//!
//! Starts at 7.0 and deducts for vague phrasing, very short prompts and a
//! bare pronoun reference at the start; rewards concrete numbers.

use super::reports::{Dimension, DimensionScore};
use crate::catalog::{Catalog, SignalSetId};
use crate::text;

const BASE: f64 = 7.0;

/// Score how specific and unambiguous a prompt is.
///
/// `text` is the trimmed prompt, `text_lower` its lowercase form.
pub fn score_clarity(text: &str, text_lower: &str, catalog: &Catalog) -> DimensionScore {
    let mut score = BASE;
    let mut details: Vec<String> = Vec::new();

    let vague_hits = catalog
        .signals(SignalSetId::VagueLanguage)
        .hit_count(text, text_lower);
    if vague_hits >= 3 {
        score -= 4.0;
        details.push("Multiple vague phrases detected".to_string());
    } else if vague_hits >= 1 {
        score -= 2.0 * vague_hits as f64;
        details.push(format!("{vague_hits} vague phrase(s) detected"));
    }

    let words = text::count_words(text);
    if words < 5 {
        score -= 3.0;
        details.push("Extremely short -- likely too ambiguous".to_string());
    } else if words < 10 {
        score -= 1.5;
        details.push("Very short -- may lack clarity".to_string());
    }

    if text::count_numeric_tokens(text) >= 2 {
        score += 1.0;
        details.push("Contains numeric specifics".to_string());
    }

    let starts_with_reference = catalog
        .signals(SignalSetId::UnresolvedReference)
        .patterns()
        .iter()
        .any(|re| re.is_match(text));
    if starts_with_reference {
        score -= 1.5;
        details.push("Starts with an ambiguous pronoun reference".to_string());
    }

    let details = if details.is_empty() {
        "Clear and specific".to_string()
    } else {
        details.join("; ")
    };
    DimensionScore::new(Dimension::Clarity, super::clamp_score(score), details)
}
