//! Suggestion composition.

use std::collections::HashSet;

use super::reports::DetectedAntiPattern;

/// Shown when no anti-pattern was detected.
pub const ENCOURAGEMENT: &str = "This is already a strong prompt. Consider adding edge-case \
                                 handling or examples for even better results.";

/// Build the prioritized suggestion list.
///
/// High-severity patterns come first; catalog order breaks ties. Each
/// pattern contributes its suggestion once.
pub fn compose_suggestions(anti_patterns: &[DetectedAntiPattern]) -> Vec<String> {
    let mut ordered: Vec<&DetectedAntiPattern> = anti_patterns.iter().collect();
    ordered.sort_by_key(|detected| detected.pattern.severity.rank());

    let mut seen = HashSet::new();
    let mut suggestions: Vec<String> = ordered
        .into_iter()
        .filter(|detected| seen.insert(detected.pattern.id))
        .map(|detected| detected.pattern.suggestion.to_string())
        .collect();

    if anti_patterns.is_empty() && suggestions.is_empty() {
        suggestions.push(ENCOURAGEMENT.to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn detected(id: &str) -> DetectedAntiPattern {
        DetectedAntiPattern {
            pattern: Catalog::builtin().get(id).expect("known pattern"),
            evidence: String::new(),
        }
    }

    fn suggestion_of(id: &str) -> String {
        Catalog::builtin()
            .get(id)
            .expect("known pattern")
            .suggestion
            .to_string()
    }

    #[test]
    fn empty_input_gets_encouragement() {
        assert_eq!(compose_suggestions(&[]), vec![ENCOURAGEMENT.to_string()]);
    }

    #[test]
    fn high_severity_first() {
        let suggestions =
            compose_suggestions(&[detected("no_examples"), detected("missing_context")]);
        assert_eq!(
            suggestions,
            vec![suggestion_of("missing_context"), suggestion_of("no_examples")]
        );
    }

    #[test]
    fn ties_keep_catalog_order() {
        let suggestions = compose_suggestions(&[
            detected("missing_role"),
            detected("missing_output_format"),
            detected("missing_context"),
            detected("no_constraints"),
        ]);
        assert_eq!(
            suggestions,
            vec![
                suggestion_of("missing_context"),
                suggestion_of("missing_role"),
                suggestion_of("missing_output_format"),
                suggestion_of("no_constraints"),
            ]
        );
    }

    #[test]
    fn duplicates_collapse() {
        let suggestions = compose_suggestions(&[detected("no_examples"), detected("no_examples")]);
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn no_encouragement_when_patterns_present() {
        let suggestions = compose_suggestions(&[detected("ambiguous_pronouns")]);
        assert!(!suggestions.contains(&ENCOURAGEMENT.to_string()));
    }
}
