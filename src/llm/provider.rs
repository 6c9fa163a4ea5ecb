use serde::{Deserialize, Serialize};

use super::LlmError;

/// LLM backends the tool can talk to. All of them expose an
/// OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Provider {
    /// OpenAI API
    OpenAI,
    /// OpenRouter aggregator
    OpenRouter,
    /// Google Gemini via its OpenAI-compatible endpoint
    Gemini,
    /// Ollama local models
    Ollama,
    /// Custom provider with custom base URL
    Custom(String),
}

impl Provider {
    /// Parse a provider name from configuration
    pub fn from_name(name: &str) -> Result<Self, LlmError> {
        match name.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "openrouter" => Ok(Provider::OpenRouter),
            "gemini" | "google" => Ok(Provider::Gemini),
            "ollama" => Ok(Provider::Ollama),
            other => Err(LlmError::ConfigError(format!(
                "unknown LLM provider '{}' (expected openai, openrouter, gemini or ollama)",
                other
            ))),
        }
    }

    /// Default base URL for the provider
    pub fn base_url(&self) -> String {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1".to_string(),
            Provider::OpenRouter => "https://openrouter.ai/api/v1".to_string(),
            Provider::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
            }
            Provider::Ollama => "http://localhost:11434/v1".to_string(),
            Provider::Custom(url) => url.clone(),
        }
    }

    /// Environment variable consulted for the API key when the config
    /// does not carry one
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAI => Some("OPENAI_API_KEY"),
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::Gemini => Some("GEMINI_API_KEY"),
            Provider::Ollama => None,
            Provider::Custom(_) => Some("LLM_API_KEY"),
        }
    }
}

/// Connection configuration for an LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    /// Custom base URL (overrides the provider default)
    pub base_url: Option<String>,
}

impl LlmConfig {
    pub fn new(provider: Provider, api_key: Option<String>) -> Self {
        Self {
            provider,
            api_key,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Effective base URL: the override if present, the provider default
    /// otherwise
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.provider.base_url())
    }

    /// Effective API key: config value first, then the provider's
    /// environment variable
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| {
            self.provider
                .api_key_env_var()
                .and_then(|var| std::env::var(var).ok())
        })
    }
}
