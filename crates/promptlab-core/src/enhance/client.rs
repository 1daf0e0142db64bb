//! HTTP calls to the enhancement providers.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use super::{CompletionRequest, MAX_TOKENS, OPENAI_TEMPERATURE, Provider};
use crate::error::{EnhanceError, EnhanceResult};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Send the request and return the raw response text.
pub(super) async fn complete(request: &CompletionRequest<'_>) -> EnhanceResult<String> {
    let provider = request.provider;
    let call = async {
        match provider {
            Provider::OpenAi => openai(request).await,
            Provider::Anthropic => anthropic(request).await,
        }
    };

    timeout(request.timeout, call)
        .await
        .map_err(|_| EnhanceError::Timeout {
            provider: provider.display_name(),
            timeout: request.timeout,
        })?
}

async fn openai(request: &CompletionRequest<'_>) -> EnhanceResult<String> {
    let body = OpenAiRequest {
        model: request.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.system,
            },
            ChatMessage {
                role: "user",
                content: &request.user,
            },
        ],
        temperature: OPENAI_TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };
    let url = endpoint(request.base_url, "chat/completions");

    let response = Client::new()
        .post(&url)
        .bearer_auth(request.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| remote(Provider::OpenAi, e))?;
    let parsed: OpenAiResponse = check_status(Provider::OpenAi, response)
        .await?
        .json()
        .await
        .map_err(|e| remote(Provider::OpenAi, e))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| EnhanceError::Remote {
            provider: Provider::OpenAi.display_name(),
            message: "response contained no choices".to_string(),
        })?;
    Ok(choice.message.content.unwrap_or_default())
}

async fn anthropic(request: &CompletionRequest<'_>) -> EnhanceResult<String> {
    let body = AnthropicRequest {
        model: request.model,
        max_tokens: MAX_TOKENS,
        system: &request.system,
        messages: vec![ChatMessage {
            role: "user",
            content: &request.user,
        }],
    };
    let url = endpoint(request.base_url, "messages");

    let response = Client::new()
        .post(&url)
        .header("x-api-key", request.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| remote(Provider::Anthropic, e))?;
    let parsed: AnthropicResponse = check_status(Provider::Anthropic, response)
        .await?
        .json()
        .await
        .map_err(|e| remote(Provider::Anthropic, e))?;

    let block = parsed
        .content
        .into_iter()
        .next()
        .ok_or_else(|| EnhanceError::Remote {
            provider: Provider::Anthropic.display_name(),
            message: "response contained no content".to_string(),
        })?;
    Ok(block.text.unwrap_or_default())
}

async fn check_status(
    provider: Provider,
    response: reqwest::Response,
) -> EnhanceResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(EnhanceError::Remote {
        provider: provider.display_name(),
        message: format!("request failed with status {status}: {}", body.trim()),
    })
}

fn remote(provider: Provider, err: reqwest::Error) -> EnhanceError {
    EnhanceError::Remote {
        provider: provider.display_name(),
        message: err.to_string(),
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_paths() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint("http://localhost:8080", "messages"),
            "http://localhost:8080/messages"
        );
    }

    #[test]
    fn openai_body_shape() {
        let body = OpenAiRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: OPENAI_TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 1500);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn anthropic_response_without_text() {
        let parsed: AnthropicResponse =
            serde_json::from_str(r#"{"content": [{"type": "tool_use"}]}"#).unwrap();
        assert!(parsed.content[0].text.is_none());
    }
}
