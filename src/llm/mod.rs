pub mod openai;
pub mod provider;

pub use openai::OpenAiCompatProvider;
pub use provider::{LlmConfig, Provider};

use crate::tools::ToolSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// A single tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Raw arguments JSON as produced by the model
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCallRequest>>,
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn new(
        role: ChatMessageRole,
        content: Option<String>,
        tool_calls: Option<Vec<ToolCallRequest>>,
        tool_call_id: Option<String>,
    ) -> Self {
        Self {
            role,
            content,
            tool_calls,
            tool_call_id,
        }
    }

    pub fn system(content: String) -> Self {
        Self::new(ChatMessageRole::System, Some(content), None, None)
    }

    pub fn user(content: String) -> Self {
        Self::new(ChatMessageRole::User, Some(content), None, None)
    }

    pub fn assistant_tool_calls(tool_calls: Vec<ToolCallRequest>) -> Self {
        Self::new(ChatMessageRole::Assistant, None, Some(tool_calls), None)
    }

    pub fn tool(content: String, tool_call_id: String) -> Self {
        Self::new(ChatMessageRole::Tool, Some(content), None, Some(tool_call_id))
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub tools: Option<Vec<ToolSpec>>,
}

impl CompletionRequest {
    pub fn new(
        messages: Vec<ChatMessage>,
        model: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        tools: Option<Vec<ToolSpec>>,
    ) -> Self {
        Self {
            messages,
            model,
            temperature,
            max_tokens,
            tools,
        }
    }
}

/// Token usage as reported by the API, when it reports one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

#[derive(Debug, Clone)]
pub enum CompletionKind {
    Message { content: String },
    ToolCall { tool_calls: Vec<ToolCallRequest> },
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub kind: CompletionKind,
    pub usage: Option<Usage>,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("API returned no choices")]
    EmptyResponse,
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn completion(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Construct a provider for the given configuration. Every supported backend
/// speaks the OpenAI chat-completions dialect, so a single client covers all
/// of them; the config decides base URL and credentials.
pub fn get_provider(config: LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    Ok(Arc::new(OpenAiCompatProvider::new(config)?))
}
