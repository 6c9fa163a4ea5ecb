use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::llm::{LlmConfig, Provider};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// LLM backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Custom base URL (overrides the provider default)
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub serper_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from `agentverse.toml` (optional) with
    /// `AGENTVERSE_*` environment overrides, e.g. `AGENTVERSE_SERVER__PORT`
    pub fn load() -> Result<Self> {
        Self::load_from("agentverse")
    }

    pub fn load_from(file_stem: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(file_stem, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("AGENTVERSE").separator("__"))
            .build()
            .context("failed to read configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Connection config for the configured LLM backend
    pub fn llm_config(&self) -> Result<LlmConfig> {
        let provider = Provider::from_name(&self.llm.provider)?;
        let mut llm_config = LlmConfig::new(provider, self.llm.api_key.clone());
        if let Some(base_url) = &self.llm.base_url {
            llm_config = llm_config.with_base_url(base_url.clone());
        }
        Ok(llm_config)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
