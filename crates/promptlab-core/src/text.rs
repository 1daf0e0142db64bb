//! Text metrics.
//!
//! Word, sentence, numeric-token and line counts, plus the task verb checks
//! shared by the structure scorer and the multiple-requests detector.

use regex::Regex;
use std::sync::LazyLock;

use crate::word_lists::{TASK_STARTER_VERBS, TASK_VERBS};

/// Sentence terminators followed by whitespace or end of text.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s|$)").expect("valid regex"));

/// Standalone digit runs.
static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("valid regex"));

/// A task verb opening a clause, optionally after "and", "also" or "can you (also)".
static TASK_STARTER: LazyLock<Regex> = LazyLock::new(|| {
    let verbs = TASK_STARTER_VERBS.join("|");
    Regex::new(&format!(
        r"(?i)(?:^|[.!?]\s+|\n\s*)(?:(?:and\s+)?(?:also\s+|can\s+you\s+(?:also\s+)?)?)?({verbs})\b"
    ))
    .expect("valid regex")
});

/// Any word-bounded task verb.
static TASK_VERB: LazyLock<Regex> = LazyLock::new(|| {
    let verbs = TASK_VERBS.join("|");
    Regex::new(&format!(r"\b({verbs})\b")).expect("valid regex")
});

/// Count whitespace-separated tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count sentences, never returning less than one.
///
/// Splits on runs of `.`, `!` or `?` that are followed by whitespace or the
/// end of the text. Text without terminal punctuation is one sentence.
pub fn count_sentences(text: &str) -> usize {
    let fragments = SENTENCE_BREAK
        .split(text.trim())
        .filter(|fragment| !fragment.trim().is_empty())
        .count();
    fragments.max(1)
}

/// Count maximal digit runs bounded by word boundaries.
pub fn count_numeric_tokens(text: &str) -> usize {
    NUMERIC_TOKEN.find_iter(text).count()
}

/// Estimate how many separate requests a prompt makes.
///
/// Counts task verbs that start a clause (text start, after sentence
/// punctuation, or after a newline, allowing "and", "also" and "can you
/// also" in between) and adds every `?` in the text. A sentence that both
/// starts with a task verb and ends in a question counts twice.
pub fn estimate_distinct_tasks(text: &str) -> usize {
    let starters = TASK_STARTER.find_iter(text).count();
    let questions = text.matches('?').count();
    starters + questions
}

/// Returns `true` if the lowercased text contains a task verb.
pub fn has_task_verb(text_lower: &str) -> bool {
    TASK_VERB.is_match(text_lower)
}

/// Count lines that contain something other than whitespace.
pub fn count_nonblank_lines(text: &str) -> usize {
    text.trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .count()
}
