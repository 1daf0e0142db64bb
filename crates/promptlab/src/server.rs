//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes prompt analysis to AI assistants over stdio. The server is a thin
//! presentation layer: each `#[tool]` method delegates to `promptlab_core`
//! and serializes the result.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use promptlab_core::render;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_info_format")]
    pub format: String,
}

fn default_info_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_prompt` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzePromptParams {
    /// The prompt text to analyze.
    pub text: String,
    /// Report format: "json" (default) or "markdown".
    #[serde(default = "default_report_format")]
    pub format: String,
}

fn default_report_format() -> String {
    "json".to_string()
}

/// MCP server exposing prompt analysis to AI assistants.
#[derive(Clone)]
pub struct PromptLabServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input: Option<usize>,
}

impl Default for PromptLabServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PromptLabServer {
    /// Create a new MCP server instance with no input limit.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input: None,
        }
    }

    /// Reject prompts larger than `max_input` bytes.
    pub fn with_input_limit(mut self, max_input: Option<usize>) -> Self {
        self.max_input = max_input;
        self
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score a prompt and list anti-patterns and suggestions.
    #[tool(
        description = "Score an LLM prompt on clarity, structure, specificity and length (0-10 each), detect common anti-patterns, and return prioritized suggestions."
    )]
    #[tracing::instrument(
        skip(self, params),
        fields(otel.kind = "server", format = %params.format)
    )]
    fn analyze_prompt(
        &self,
        Parameters(params): Parameters<AnalyzePromptParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_prompt", "executing MCP tool");

        if let Some(max) = self.max_input
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: prompt is {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }
        if params.text.trim().is_empty() {
            return Err(McpError::invalid_params("prompt is empty", None));
        }

        let result = promptlab_core::analyze(&params.text);

        let text = match params.format.as_str() {
            "json" => render::render_json(&result, None)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?,
            "markdown" | "md" => render::render_markdown(&result, None),
            other => {
                return Err(McpError::invalid_params(
                    format!("unknown format '{other}'. Supported: json, markdown"),
                    None,
                ));
            }
        };

        tracing::info!(
            tool = "analyze_prompt",
            overall = result.overall_score(),
            anti_patterns = result.anti_patterns.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for PromptLabServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call analyze_prompt to score a prompt before sending it to a model.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
