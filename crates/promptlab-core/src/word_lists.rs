//! Curated phrase lists for prompt analysis.
//!
//! Role, context, output-format, constraint and example indicators, the
//! vague-language signals, and the task verbs used by the structure scorer
//! and the distinct-task estimate. All keyword entries are lowercase and are
//! matched as plain substrings of the lowercased prompt.

/// Phrases that assign a role or persona to the model.
pub const ROLE_KEYWORDS: &[&str] = &[
    "you are",
    "act as",
    "acting as",
    "your role",
    "as a",
    "as an",
    "pretend you",
    "imagine you",
    "take the role",
    "persona",
    "you're a",
    "you're an",
    "play the role",
    "behave as",
    "respond as",
];

/// Phrases that request a particular output shape.
pub const OUTPUT_FORMAT_KEYWORDS: &[&str] = &[
    "format",
    "output as",
    "return as",
    "respond with",
    "respond in",
    "in json",
    "as json",
    "as a list",
    "as a table",
    "numbered list",
    "bullet points",
    "bulleted list",
    "markdown",
    "csv",
    "xml",
    "yaml",
    "in the form of",
    "paragraph",
    "paragraphs",
    "essay",
    "report",
    "template",
    "code block",
    "formatted as",
];

/// Phrases that supply background, audience or purpose.
pub const CONTEXT_KEYWORDS: &[&str] = &[
    "background",
    "context",
    "for context",
    "the situation is",
    "the goal is",
    "the purpose is",
    "i'm working on",
    "i am working on",
    "the project is",
    "this is for",
    "the audience is",
    "the target",
    "we need",
    "my team",
    "our company",
    "my company",
    "the client",
    "the customer",
    "the user",
    "use case",
];

/// Limits on length, scope, tone or behavior.
pub const CONSTRAINT_KEYWORDS: &[&str] = &[
    "must",
    "should",
    "no more than",
    "no less than",
    "at most",
    "at least",
    "limit",
    "maximum",
    "minimum",
    "between",
    "within",
    "under",
    "constraint",
    "requirement",
    "do not",
    "don't",
    "avoid",
    "never",
    "always",
    "keep it",
    "make sure",
    "ensure",
    "words",
    "sentences",
    "tone",
    "formal",
    "informal",
    "casual",
    "professional",
    "academic",
    "concise",
];

/// Markers of embedded examples or sample input/output.
pub const EXAMPLE_KEYWORDS: &[&str] = &[
    "for example",
    "example:",
    "example of",
    "e.g.",
    "such as",
    "like this:",
    "here's an example",
    "here is an example",
    "sample",
    "for instance",
    "input:",
    "output:",
    "expected:",
    "here's what i mean",
    "here is what i mean",
];

/// Regex sources for hand-wavy instructions. Compiled case-insensitively.
pub const VAGUE_SIGNALS: &[&str] = &[
    r"\bmake\s+it\s+(good|better|nice|great|awesome|perfect)\b",
    r"\bimprove\s+this\b",
    r"\bdo\s+(something|a\s+good\s+job|your\s+best)\b",
    r"\bsomething\s+(about|on|related)\b",
    r"\bwhatever\s+you\s+think\b",
    r"\bjust\s+make\s+it\s+work\b",
];

/// Literal hand-wavy phrases.
pub const VAGUE_KEYWORDS: &[&str] = &[
    "make it good",
    "make it better",
    "make it nice",
    "do something",
    "whatever you think",
    "you decide",
    "be creative",
    "do your best",
    "just make it work",
];

/// An edit verb followed by a bare pronoun at the very start of the prompt.
pub const UNRESOLVED_REFERENCE_SIGNALS: &[&str] =
    &[r"^(fix|improve|change|update|rewrite|edit|modify)\s+(it|this|that)\b"];

/// Verbs that open a new request when they start a clause.
pub const TASK_STARTER_VERBS: &[&str] = &[
    "write",
    "create",
    "generate",
    "build",
    "make",
    "list",
    "explain",
    "describe",
    "summarize",
    "translate",
    "convert",
    "fix",
    "improve",
    "update",
    "edit",
    "rewrite",
    "help",
    "tell",
    "give",
    "design",
    "develop",
    "analyze",
    "compare",
    "review",
];

/// Verbs that show the prompt states a concrete task.
pub const TASK_VERBS: &[&str] = &[
    "write",
    "create",
    "generate",
    "build",
    "make",
    "list",
    "explain",
    "describe",
    "summarize",
    "translate",
    "convert",
    "fix",
    "improve",
    "update",
    "edit",
    "rewrite",
    "analyze",
    "compare",
    "design",
    "develop",
    "review",
    "draft",
    "compose",
    "produce",
    "outline",
    "calculate",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lowercase(list: &[&str]) {
        for entry in list {
            assert_eq!(*entry, entry.to_lowercase(), "{entry} is not lowercase");
        }
    }

    #[test]
    fn keyword_lists_are_lowercase() {
        assert_lowercase(ROLE_KEYWORDS);
        assert_lowercase(OUTPUT_FORMAT_KEYWORDS);
        assert_lowercase(CONTEXT_KEYWORDS);
        assert_lowercase(CONSTRAINT_KEYWORDS);
        assert_lowercase(EXAMPLE_KEYWORDS);
        assert_lowercase(VAGUE_KEYWORDS);
    }

    #[test]
    fn structure_verbs_extend_task_starters() {
        let missing: Vec<_> = TASK_STARTER_VERBS
            .iter()
            .filter(|v| !TASK_VERBS.contains(v))
            .collect();
        assert_eq!(missing, vec![&"help", &"tell", &"give"]);
    }
}
