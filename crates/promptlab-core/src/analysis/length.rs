//! Length scoring from word count alone.

use super::reports::{Dimension, DimensionScore};

/// Score a prompt's word count.
///
/// 20 to 300 words is the sweet spot (8.0 rising to 10.0 at 300). Shorter
/// prompts step down to 2.0; longer ones drop to 7.0 and then lose a point
/// per 200 words past 500, bottoming out at 3.0.
pub fn score_length(word_count: usize) -> DimensionScore {
    let n = word_count as f64;
    let (score, verdict) = match word_count {
        0..5 => (2.0, "too short to convey a meaningful task"),
        5..10 => (4.0, "quite short, likely missing details"),
        10..20 => (6.0, "on the short side"),
        20..=300 => (8.0 + ((n - 20.0) / 140.0).min(2.0), "good length"),
        301..=500 => (7.0, "on the long side, consider trimming"),
        _ => (
            (7.0 - (n - 500.0) / 200.0).max(3.0),
            "quite long, risk of losing focus",
        ),
    };

    DimensionScore::new(
        Dimension::Length,
        super::round1(score.min(10.0)),
        format!("{word_count} words -- {verdict}"),
    )
}
