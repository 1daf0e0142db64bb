//! Anti-pattern catalog and keyword banks.
//!
//! The [`Catalog`] is the read-only lookup state shared by the scorers and
//! the detector: five keyword banks, two regex/keyword signal sets, and the
//! eight anti-pattern definitions. It is built once, lazily, and handed out
//! by reference via [`Catalog::builtin`].
//!
//! Each [`AntiPatternDefinition`] carries an explicit [`DetectionStrategy`]
//! that names the bank, signal set or estimator it reads, so the detector
//! never has to look at a pattern's id to decide how to evaluate it.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder, RegexSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;
use crate::word_lists::{
    CONSTRAINT_KEYWORDS, CONTEXT_KEYWORDS, EXAMPLE_KEYWORDS, OUTPUT_FORMAT_KEYWORDS,
    ROLE_KEYWORDS, UNRESOLVED_REFERENCE_SIGNALS, VAGUE_KEYWORDS, VAGUE_SIGNALS,
};

/// How much a detected anti-pattern hurts prompt quality.
///
/// Only used to order suggestions; it never changes a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nice to fix.
    Low,
    /// Worth fixing.
    Medium,
    /// Fix first.
    High,
}

impl Severity {
    /// Suggestion priority, lowest first: High = 0, Medium = 1, Low = 2.
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Lowercase name (`"high"`, `"medium"`, `"low"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad grouping for anti-patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Missing role, context or output format.
    Structure,
    /// Vague or ambiguous wording.
    Clarity,
    /// Missing constraints or examples.
    Specificity,
    /// Too many requests at once.
    Scope,
}

impl Category {
    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Clarity => "clarity",
            Self::Specificity => "specificity",
            Self::Scope => "scope",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one of the catalog's keyword banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankId {
    /// Role / persona phrases.
    Role,
    /// Background and audience phrases.
    Context,
    /// Output format phrases.
    OutputFormat,
    /// Constraint phrases.
    Constraint,
    /// Example markers.
    Example,
}

/// Identifies one of the catalog's regex/keyword signal sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSetId {
    /// Hand-wavy instructions ("make it good", "you decide").
    VagueLanguage,
    /// An edit verb with a bare pronoun at the start ("fix it").
    UnresolvedReference,
}

/// A counting function over the original-case prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Estimator {
    /// [`text::estimate_distinct_tasks`].
    DistinctTasks,
}

impl Estimator {
    /// Run the estimator.
    pub fn count(self, text: &str) -> usize {
        match self {
            Self::DistinctTasks => text::estimate_distinct_tasks(text),
        }
    }

    /// Evidence message for a count that crossed the threshold.
    pub fn evidence(self, count: usize) -> String {
        match self {
            Self::DistinctTasks => format!("Detected ~{count} distinct tasks/requests"),
        }
    }
}

/// How the detector decides whether an anti-pattern is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionStrategy {
    /// Present when no phrase of the bank occurs.
    AbsenceOfKeywords {
        /// Bank to search.
        bank: BankId,
        /// Evidence recorded on detection.
        evidence: &'static str,
    },
    /// Present when the bank's hit count is exactly zero.
    ZeroKeywordHits {
        /// Bank to count.
        bank: BankId,
        /// Evidence recorded on detection.
        evidence: &'static str,
    },
    /// Present when an estimator reaches a threshold.
    ThresholdCount {
        /// Counting function.
        estimator: Estimator,
        /// Minimum count that triggers detection.
        threshold: usize,
    },
    /// Present when any regex of the set matches, else when any keyword occurs.
    SignalThenKeyword {
        /// Signal set to evaluate.
        signals: SignalSetId,
    },
}

/// A single detectable anti-pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntiPatternDefinition {
    /// Stable identifier, e.g. `missing_role`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Broad grouping.
    pub category: Category,
    /// Suggestion priority.
    pub severity: Severity,
    /// What the problem is.
    pub description: &'static str,
    /// How to fix it.
    pub suggestion: &'static str,
    /// How to detect it.
    pub strategy: DetectionStrategy,
}

/// An ordered list of lowercase phrases matched as substrings.
#[derive(Debug, Clone)]
pub struct KeywordBank {
    matcher: RegexSet,
}

impl KeywordBank {
    /// Compile a bank from lowercase phrases.
    pub fn new(phrases: &'static [&'static str]) -> Self {
        let matcher = RegexSet::new(phrases.iter().map(|phrase| regex::escape(phrase)))
            .expect("valid regex");
        Self { matcher }
    }

    /// Number of distinct phrases that occur in `text_lower`.
    pub fn hits(&self, text_lower: &str) -> usize {
        self.matcher.matches(text_lower).iter().count()
    }

    /// Returns `true` if any phrase occurs in `text_lower`.
    pub fn contains_any(&self, text_lower: &str) -> bool {
        self.matcher.is_match(text_lower)
    }
}

/// Regex signals checked against the original text, then keyword signals
/// checked against the lowercased text.
#[derive(Debug, Clone)]
pub struct SignalSet {
    patterns: Vec<Regex>,
    keywords: &'static [&'static str],
}

impl SignalSet {
    /// Compile case-insensitive regex sources plus a keyword list.
    pub fn new(sources: &[&str], keywords: &'static [&'static str]) -> Self {
        let patterns = sources
            .iter()
            .map(|source| {
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .expect("valid regex")
            })
            .collect();
        Self { patterns, keywords }
    }

    /// Compiled regex signals in declaration order.
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Number of matching regexes plus number of contained keywords.
    pub fn hit_count(&self, text: &str, text_lower: &str) -> usize {
        let regex_hits = self.patterns.iter().filter(|re| re.is_match(text)).count();
        let keyword_hits = self
            .keywords
            .iter()
            .filter(|kw| text_lower.contains(**kw))
            .count();
        regex_hits + keyword_hits
    }

    /// First regex match (as the matched substring) or first contained keyword.
    pub fn first_match<'t>(&self, text: &'t str, text_lower: &str) -> Option<SignalMatch<'t>> {
        if let Some(found) = self.patterns.iter().find_map(|re| re.find(text)) {
            return Some(SignalMatch::Pattern(found.as_str()));
        }
        self.keywords
            .iter()
            .find(|kw| text_lower.contains(**kw))
            .map(|kw| SignalMatch::Keyword(kw))
    }
}

/// What triggered a signal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMatch<'t> {
    /// Substring matched by a regex signal.
    Pattern(&'t str),
    /// Keyword signal found in the text.
    Keyword(&'static str),
}

impl SignalMatch<'_> {
    /// Evidence string for this match.
    pub fn evidence(&self) -> String {
        match self {
            Self::Pattern(matched) => format!("Matched: \"{matched}\""),
            Self::Keyword(keyword) => format!("Contains: \"{keyword}\""),
        }
    }
}

/// Read-only detection data: keyword banks, signal sets and definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    role: KeywordBank,
    context: KeywordBank,
    output_format: KeywordBank,
    constraint: KeywordBank,
    example: KeywordBank,
    vague_language: SignalSet,
    unresolved_reference: SignalSet,
    patterns: Vec<AntiPatternDefinition>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(Catalog::new);

impl Catalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    fn new() -> Self {
        Self {
            role: KeywordBank::new(ROLE_KEYWORDS),
            context: KeywordBank::new(CONTEXT_KEYWORDS),
            output_format: KeywordBank::new(OUTPUT_FORMAT_KEYWORDS),
            constraint: KeywordBank::new(CONSTRAINT_KEYWORDS),
            example: KeywordBank::new(EXAMPLE_KEYWORDS),
            vague_language: SignalSet::new(VAGUE_SIGNALS, VAGUE_KEYWORDS),
            unresolved_reference: SignalSet::new(UNRESOLVED_REFERENCE_SIGNALS, &[]),
            patterns: builtin_patterns(),
        }
    }

    /// Look up a keyword bank.
    pub const fn bank(&self, id: BankId) -> &KeywordBank {
        match id {
            BankId::Role => &self.role,
            BankId::Context => &self.context,
            BankId::OutputFormat => &self.output_format,
            BankId::Constraint => &self.constraint,
            BankId::Example => &self.example,
        }
    }

    /// Look up a signal set.
    pub const fn signals(&self, id: SignalSetId) -> &SignalSet {
        match id {
            SignalSetId::VagueLanguage => &self.vague_language,
            SignalSetId::UnresolvedReference => &self.unresolved_reference,
        }
    }

    /// All definitions in declaration order.
    pub fn patterns(&self) -> &[AntiPatternDefinition] {
        &self.patterns
    }

    /// Find a definition by id.
    pub fn get(&self, id: &str) -> Option<&AntiPatternDefinition> {
        self.patterns.iter().find(|p| p.id == id)
    }
}

fn builtin_patterns() -> Vec<AntiPatternDefinition> {
    vec![
        // -- Structure ----------------------------------------------------------
        AntiPatternDefinition {
            id: "missing_role",
            name: "Missing Role / Persona",
            category: Category::Structure,
            severity: Severity::Medium,
            description: "The prompt does not assign a role or persona to the AI.",
            suggestion: "Start with a role assignment like 'You are an experienced technical \
                         writer...' to ground the AI's perspective and expertise level.",
            strategy: DetectionStrategy::AbsenceOfKeywords {
                bank: BankId::Role,
                evidence: "No role or persona assignment found",
            },
        },
        AntiPatternDefinition {
            id: "missing_output_format",
            name: "No Output Format Specified",
            category: Category::Structure,
            severity: Severity::Medium,
            description: "The prompt does not specify what format the output should take.",
            suggestion: "Specify the desired output format, e.g. 'Return the result as a \
                         numbered list', 'Format as JSON', or 'Write a 3-paragraph essay'.",
            strategy: DetectionStrategy::AbsenceOfKeywords {
                bank: BankId::OutputFormat,
                evidence: "No output format specification found",
            },
        },
        AntiPatternDefinition {
            id: "missing_context",
            name: "Missing Context / Background",
            category: Category::Structure,
            severity: Severity::High,
            description: "The prompt lacks background information or context for the task.",
            suggestion: "Add context about the audience, purpose, or background situation. \
                         For example: 'I'm writing a blog for beginner Python developers...'",
            strategy: DetectionStrategy::AbsenceOfKeywords {
                bank: BankId::Context,
                evidence: "No contextual background found",
            },
        },
        // -- Clarity ------------------------------------------------------------
        AntiPatternDefinition {
            id: "vague_language",
            name: "Vague / Hand-wavy Language",
            category: Category::Clarity,
            severity: Severity::High,
            description: "The prompt uses vague qualifiers instead of concrete instructions.",
            suggestion: "Replace vague words with specific criteria. Instead of 'make it good', \
                         say 'ensure the tone is professional and each paragraph has a topic \
                         sentence'.",
            strategy: DetectionStrategy::SignalThenKeyword {
                signals: SignalSetId::VagueLanguage,
            },
        },
        AntiPatternDefinition {
            id: "ambiguous_pronouns",
            name: "Ambiguous Pronoun References",
            category: Category::Clarity,
            severity: Severity::Low,
            description: "The prompt uses pronouns ('it', 'this', 'that') without clear \
                          referents, which can confuse the model.",
            suggestion: "Replace ambiguous pronouns with explicit nouns. Instead of 'Improve it \
                         and make it shorter', say 'Improve the product description and reduce \
                         it to under 50 words'.",
            strategy: DetectionStrategy::SignalThenKeyword {
                signals: SignalSetId::UnresolvedReference,
            },
        },
        // -- Specificity --------------------------------------------------------
        AntiPatternDefinition {
            id: "no_constraints",
            name: "No Constraints or Boundaries",
            category: Category::Specificity,
            severity: Severity::Medium,
            description: "The prompt sets no limits on length, scope, tone, or format.",
            suggestion: "Add constraints like word count, tone, audience level, or scope. \
                         Example: 'Keep it under 200 words, written for a non-technical \
                         audience.'",
            strategy: DetectionStrategy::ZeroKeywordHits {
                bank: BankId::Constraint,
                evidence: "No constraint or boundary keywords found",
            },
        },
        AntiPatternDefinition {
            id: "no_examples",
            name: "No Examples Provided",
            category: Category::Specificity,
            severity: Severity::Low,
            description: "The prompt does not include examples of desired input/output, which \
                          helps the model understand expectations.",
            suggestion: "Add 1-2 examples of what good output looks like. Few-shot examples \
                         dramatically improve output quality for structured tasks.",
            strategy: DetectionStrategy::AbsenceOfKeywords {
                bank: BankId::Example,
                evidence: "No example or sample output found",
            },
        },
        // -- Scope --------------------------------------------------------------
        AntiPatternDefinition {
            id: "multiple_requests",
            name: "Multiple Unrelated Requests",
            category: Category::Scope,
            severity: Severity::High,
            description: "The prompt appears to ask for several unrelated things at once, \
                          which dilutes focus and quality.",
            suggestion: "Break this into separate prompts, one per task. If tasks are related, \
                         use numbered steps to impose order.",
            strategy: DetectionStrategy::ThresholdCount {
                estimator: Estimator::DistinctTasks,
                threshold: 3,
            },
        },
    ]
}
