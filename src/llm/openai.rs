use serde::{Deserialize, Serialize};

use super::{
    ChatMessage, ChatMessageRole, CompletionKind, CompletionRequest, CompletionResponse,
    LlmConfig, LlmError, LlmProvider, ToolCallRequest, Usage,
};
use async_trait::async_trait;

/// Chat-completions client for OpenAI-compatible APIs (OpenAI, OpenRouter,
/// Gemini's compatibility endpoint, Ollama)
pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiCompatProvider {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.resolved_api_key(),
            base_url: config.resolved_base_url(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiTool>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Serialize, Deserialize)]
struct ApiTool {
    #[serde(rename = "type")]
    kind: String,
    function: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: ApiFunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

fn role_name(role: ChatMessageRole) -> &'static str {
    match role {
        ChatMessageRole::System => "system",
        ChatMessageRole::User => "user",
        ChatMessageRole::Assistant => "assistant",
        ChatMessageRole::Tool => "tool",
    }
}

fn to_api_message(message: &ChatMessage) -> ApiMessage<'_> {
    ApiMessage {
        role: role_name(message.role),
        content: message.content.as_deref(),
        tool_calls: message.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|call| ApiToolCall {
                    id: call.id.clone(),
                    kind: "function".to_string(),
                    function: ApiFunctionCall {
                        name: call.function.name.clone(),
                        arguments: call.function.arguments.clone(),
                    },
                })
                .collect()
        }),
        tool_call_id: message.tool_call_id.as_deref(),
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn completion(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let tools = request.tools.as_ref().and_then(|tools| {
            if tools.is_empty() {
                None
            } else {
                Some(
                    tools
                        .iter()
                        .map(|spec| ApiTool {
                            kind: "function".to_string(),
                            function: serde_json::json!({
                                "name": spec.name,
                                "description": spec.description,
                                "parameters": spec.parameters,
                            }),
                        })
                        .collect(),
                )
            }
        });

        let body = ApiRequest {
            model: &request.model,
            messages: request.messages.iter().map(to_api_message).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            tools,
        };

        let mut http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = http_request.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ApiResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;

        let kind = match choice.message.tool_calls {
            Some(calls) if !calls.is_empty() => CompletionKind::ToolCall {
                tool_calls: calls
                    .into_iter()
                    .map(|call| ToolCallRequest {
                        id: call.id,
                        function: super::FunctionCall {
                            name: call.function.name,
                            arguments: call.function.arguments,
                        },
                    })
                    .collect(),
            },
            _ => CompletionKind::Message {
                content: choice.message.content.unwrap_or_default(),
            },
        };

        Ok(CompletionResponse {
            kind,
            usage: parsed.usage,
        })
    }
}
