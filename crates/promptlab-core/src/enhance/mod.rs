//! Optional remote prompt enhancement.
//!
//! Asks OpenAI or Anthropic to rewrite a prompt, informed by the local
//! analysis. Runs strictly after [`crate::analyze`] has finished and never
//! changes the analysis; every failure is an [`EnhanceError`] the caller can
//! report and move past.
//!
//! The network client lives behind the `enhance` feature. Builds without it
//! still validate settings and then report [`EnhanceError::MissingDependency`].

#[cfg(feature = "enhance")]
mod client;

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::config::Config;
use crate::error::{EnhanceError, EnhanceResult};

/// Default seconds to wait for a provider response.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Response token budget sent to both providers.
pub const MAX_TOKENS: u32 = 1500;

/// Sampling temperature sent to OpenAI.
pub const OPENAI_TEMPERATURE: f32 = 0.7;

/// Explanation used when the response has no recognizable sections.
pub const FALLBACK_EXPLANATION: &str = "See improved prompt above.";

/// Supported enhancement providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI chat completions.
    OpenAi,
    /// Anthropic messages.
    Anthropic,
}

impl Provider {
    /// Parse a provider name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            _ => None,
        }
    }

    /// Identifier as written in config (`openai`, `anthropic`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Human-facing name used in error messages.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    /// Model used when none is configured.
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-sonnet-4-20250514",
        }
    }

    /// API root used when no base URL is configured.
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the enhancer needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceSettings {
    /// Provider API key.
    pub api_key: Option<String>,
    /// Provider name, validated at call time.
    pub provider: String,
    /// Model override.
    pub model: Option<String>,
    /// API root override.
    pub base_url: Option<String>,
    /// How long to wait for the provider.
    pub timeout: Duration,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: Provider::OpenAi.as_str().to_string(),
            model: None,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EnhanceSettings {
    /// Build settings from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            api_key: config.api_key.clone(),
            provider: config.provider.clone().unwrap_or(defaults.provider),
            model: config.model.clone(),
            base_url: config.api_base_url.clone(),
            timeout: config
                .enhance_timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }

    /// Override the provider name.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }
}

/// An improved prompt returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancementResult {
    /// The rewritten prompt.
    pub improved_prompt: String,
    /// What changed and why.
    pub explanation: String,
    /// Provider identifier.
    pub provider: String,
    /// Model that produced the rewrite.
    pub model: String,
}

/// Ask the configured provider to rewrite `prompt`.
///
/// Checks run in order: credential, provider name, network support, then
/// the remote call under the configured timeout.
#[tracing::instrument(skip_all, fields(provider = %settings.provider))]
pub async fn enhance(
    prompt: &str,
    result: &AnalysisResult,
    settings: &EnhanceSettings,
) -> EnhanceResult<EnhancementResult> {
    let api_key = settings
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(EnhanceError::MissingCredential)?;

    let provider =
        Provider::parse(&settings.provider).ok_or_else(|| EnhanceError::UnsupportedProvider {
            provider: settings.provider.trim().to_lowercase(),
        })?;

    let model = settings
        .model
        .as_deref()
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .unwrap_or_else(|| provider.default_model())
        .to_string();

    let request = CompletionRequest {
        provider,
        api_key,
        model: &model,
        base_url: settings
            .base_url
            .as_deref()
            .unwrap_or_else(|| provider.default_base_url()),
        system: build_system_message(result),
        user: build_user_message(prompt),
        timeout: settings.timeout,
    };

    tracing::debug!(model = %model, "requesting enhancement");
    let content = complete(&request).await?;
    let (improved_prompt, explanation) = parse_enhancement_response(&content);
    tracing::info!(model = %model, "enhancement received");

    Ok(EnhancementResult {
        improved_prompt,
        explanation,
        provider: provider.as_str().to_string(),
        model,
    })
}

/// One chat request, provider-agnostic.
#[derive(Debug)]
#[cfg_attr(not(feature = "enhance"), allow(dead_code))]
pub(crate) struct CompletionRequest<'a> {
    pub(crate) provider: Provider,
    pub(crate) api_key: &'a str,
    pub(crate) model: &'a str,
    pub(crate) base_url: &'a str,
    pub(crate) system: String,
    pub(crate) user: String,
    pub(crate) timeout: Duration,
}

#[cfg(feature = "enhance")]
async fn complete(request: &CompletionRequest<'_>) -> EnhanceResult<String> {
    client::complete(request).await
}

#[cfg(not(feature = "enhance"))]
#[allow(clippy::unused_async)]
async fn complete(_request: &CompletionRequest<'_>) -> EnhanceResult<String> {
    Err(EnhanceError::MissingDependency)
}

/// System instructions carrying the analysis summary.
pub fn build_system_message(result: &AnalysisResult) -> String {
    let issues = if result.anti_patterns.is_empty() {
        "  (none)".to_string()
    } else {
        result
            .anti_patterns
            .iter()
            .map(|d| format!("  - {}: {}", d.pattern.name, d.evidence))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let suggestions = if result.suggestions.is_empty() {
        "  (none)".to_string()
    } else {
        result
            .suggestions
            .iter()
            .map(|s| format!("  - {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an expert prompt engineer. The user has a prompt that was \
         analyzed by an automated tool. Your job is to rewrite the prompt to \
         address the identified issues while preserving the user's original intent.\n\n\
         Overall score: {score:.1}/10\n\n\
         Detected issues:\n{issues}\n\n\
         Suggestions:\n{suggestions}\n\n\
         Return ONLY:\n\
         1. The improved prompt (clearly labeled)\n\
         2. A brief explanation of what you changed and why (2-4 sentences)\n\n\
         Do not add commentary beyond these two sections.",
        score = result.overall_score(),
    )
}

/// User turn wrapping the original prompt.
pub fn build_user_message(prompt: &str) -> String {
    format!("Here is the prompt to improve:\n\n{prompt}")
}

static IMPROVED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:improved prompt|rewritten prompt|enhanced prompt)[:\s]*\n")
        .expect("valid regex")
});

static EXPLANATION_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n(?:explanation|what i changed|changes made)").expect("valid regex")
});

static EXPLANATION_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:explanation|what i changed|changes made)[:\s]*\n(.*)")
        .expect("valid regex")
});

/// Split a provider response into `(improved_prompt, explanation)`.
///
/// Prefers labeled sections ("Improved prompt:" ... "Explanation:"). Without
/// both labels, the first blank line separates prompt from explanation.
/// Failing that, the whole response is the prompt. Never fails.
pub fn parse_enhancement_response(content: &str) -> (String, String) {
    let improved = IMPROVED_HEADER.find(content).map(|header| {
        let start = header.end();
        let end = EXPLANATION_BOUNDARY
            .find_at(content, start)
            .map_or(content.len(), |m| m.start());
        &content[start..end]
    });
    let explanation = EXPLANATION_SECTION
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    if let (Some(improved), Some(explanation)) = (improved, explanation) {
        return (improved.trim().to_string(), explanation.trim().to_string());
    }

    let trimmed = content.trim();
    if let Some((prompt, rest)) = trimmed.split_once("\n\n") {
        return (prompt.trim().to_string(), rest.trim().to_string());
    }

    (trimmed.to_string(), FALLBACK_EXPLANATION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;

    fn settings(api_key: Option<&str>, provider: &str) -> EnhanceSettings {
        EnhanceSettings {
            api_key: api_key.map(String::from),
            ..EnhanceSettings::default()
        }
        .with_provider(provider)
    }

    #[test]
    fn parses_labeled_sections() {
        let content = "Improved prompt:\nYou are a chef. Write a recipe.\n\n\
                       Explanation:\nAdded a role and a task.";
        let (prompt, explanation) = parse_enhancement_response(content);
        assert_eq!(prompt, "You are a chef. Write a recipe.");
        assert_eq!(explanation, "Added a role and a task.");
    }

    #[test]
    fn labeled_sections_ignore_case_and_alternate_names() {
        let content = "REWRITTEN PROMPT\n\nAct as a tutor.\nWhat I changed:\nMore context.";
        let (prompt, explanation) = parse_enhancement_response(content);
        assert_eq!(prompt, "Act as a tutor.");
        assert_eq!(explanation, "More context.");
    }

    #[test]
    fn falls_back_to_blank_line_split() {
        let content = "  Act as a tutor.\n\nI added a persona.\n\nAnd more.  ";
        let (prompt, explanation) = parse_enhancement_response(content);
        assert_eq!(prompt, "Act as a tutor.");
        assert_eq!(explanation, "I added a persona.\n\nAnd more.");
    }

    #[test]
    fn falls_back_to_whole_response() {
        let (prompt, explanation) = parse_enhancement_response("  Just the prompt.\n");
        assert_eq!(prompt, "Just the prompt.");
        assert_eq!(explanation, FALLBACK_EXPLANATION);
    }

    #[test]
    fn empty_response_does_not_fail() {
        let (prompt, explanation) = parse_enhancement_response("");
        assert_eq!(prompt, "");
        assert_eq!(explanation, FALLBACK_EXPLANATION);
    }

    #[test]
    fn provider_parsing() {
        assert_eq!(Provider::parse("OpenAI"), Some(Provider::OpenAi));
        assert_eq!(Provider::parse("  anthropic "), Some(Provider::Anthropic));
        assert_eq!(Provider::parse("gemini"), None);
        assert_eq!(Provider::OpenAi.default_model(), "gpt-4o-mini");
        assert_eq!(Provider::Anthropic.default_model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn settings_from_config() {
        let config = Config {
            provider: Some("anthropic".to_string()),
            api_key: Some("sk-test".to_string()),
            enhance_timeout_secs: Some(5),
            ..Config::default()
        };
        let settings = EnhanceSettings::from_config(&config);
        assert_eq!(settings.provider, "anthropic");
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.timeout, Duration::from_secs(5));

        let defaults = EnhanceSettings::from_config(&Config::default());
        assert_eq!(defaults.provider, "openai");
        assert_eq!(defaults.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn system_message_lists_issues_and_suggestions() {
        let result = analyze("Write me something about dogs");
        let message = build_system_message(&result);
        assert!(message.starts_with("You are an expert prompt engineer."));
        assert!(message.contains("Overall score: "));
        assert!(
            message.contains("  - Missing Role / Persona: No role or persona assignment found")
        );
        assert!(message.contains("Suggestions:\n  - "));
    }

    #[test]
    fn system_message_without_issues() {
        let mut result = analyze("Write me something about dogs");
        result.anti_patterns.clear();
        result.suggestions.clear();
        let message = build_system_message(&result);
        assert!(message.contains("Detected issues:\n  (none)"));
        assert!(message.contains("Suggestions:\n  (none)"));
    }

    #[test]
    fn user_message_wraps_prompt() {
        assert_eq!(
            build_user_message("Write a poem"),
            "Here is the prompt to improve:\n\nWrite a poem"
        );
    }

    #[tokio::test]
    async fn missing_key_is_missing_credential() {
        let result = analyze("Write a poem");
        for key in [None, Some(""), Some("   ")] {
            let err = enhance("Write a poem", &result, &settings(key, "openai"))
                .await
                .unwrap_err();
            assert!(matches!(err, EnhanceError::MissingCredential), "{err:?}");
        }
    }

    #[tokio::test]
    async fn credential_checked_before_provider() {
        let result = analyze("Write a poem");
        let err = enhance("Write a poem", &result, &settings(None, "gemini"))
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::MissingCredential));
    }

    #[tokio::test]
    async fn unknown_provider_is_unsupported() {
        let result = analyze("Write a poem");
        let err = enhance("Write a poem", &result, &settings(Some("sk-test"), " Gemini "))
            .await
            .unwrap_err();
        match err {
            EnhanceError::UnsupportedProvider { provider } => assert_eq!(provider, "gemini"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(feature = "enhance")]
    fn local_settings(base_url: String, timeout: Duration) -> EnhanceSettings {
        EnhanceSettings {
            api_key: Some("sk-test".to_string()),
            base_url: Some(base_url),
            timeout,
            ..EnhanceSettings::default()
        }
    }

    #[cfg(feature = "enhance")]
    #[tokio::test]
    async fn refused_connection_is_remote_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let result = analyze("Write a poem");
        let settings = local_settings(
            format!("http://127.0.0.1:{port}"),
            Duration::from_secs(10),
        );

        let err = enhance("Write a poem", &result, &settings)
            .await
            .unwrap_err();
        match err {
            EnhanceError::Remote { provider, .. } => assert_eq!(provider, "OpenAI"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(feature = "enhance")]
    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let result = analyze("Write a poem");
        let settings = local_settings(format!("http://{addr}"), Duration::from_millis(100))
            .with_provider("anthropic");

        let err = enhance("Write a poem", &result, &settings)
            .await
            .unwrap_err();
        match err {
            EnhanceError::Timeout { provider, timeout } => {
                assert_eq!(provider, "Anthropic");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(not(feature = "enhance"))]
    #[tokio::test]
    async fn build_without_network_reports_missing_dependency() {
        let result = analyze("Write a poem");
        let err = enhance("Write a poem", &result, &settings(Some("sk-test"), "openai"))
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::MissingDependency));
    }
}
