use crate::llm::LlmProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Core Agent structure: a persona plus the model it runs on
#[derive(Clone)]
pub struct Agent {
    pub id: String,
    pub name: String,

    // Persona
    pub role: String,
    pub goal: String,
    pub backstory: String,

    // Names of registered tools this agent may call
    pub tools: Vec<String>,

    pub allow_delegation: bool,
    pub verbose: bool,

    // LLM configuration
    pub llm_config: AgentModelConfig,

    // LLM provider
    pub provider: Arc<dyn LlmProvider>,
}

/// LLM settings for agents
#[derive(Debug, Clone)]
pub struct AgentModelConfig {
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl AgentModelConfig {
    pub fn new(model_name: String, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model_name,
            temperature,
            max_tokens,
        }
    }
}

impl Agent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        role: String,
        goal: String,
        backstory: String,
        tools: Vec<String>,
        allow_delegation: bool,
        verbose: bool,
        llm_config: AgentModelConfig,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            role,
            goal,
            backstory,
            tools,
            allow_delegation,
            verbose,
            llm_config,
            provider,
        }
    }

    /// Copy of the agent with `{key}` placeholders in goal and backstory
    /// resolved from the kickoff inputs
    pub fn interpolated(&self, inputs: &HashMap<String, String>) -> Self {
        let mut agent = self.clone();
        agent.goal = crate::task::interpolate(&self.goal, inputs);
        agent.backstory = crate::task::interpolate(&self.backstory, inputs);
        agent
    }
}

/// Agent response with execution metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The actual response content from the agent
    pub content: String,
    /// Whether the task was completed successfully
    pub success: bool,
    /// Time taken to complete the task in milliseconds
    pub execution_time_ms: u64,
    /// Number of tokens in the request
    pub input_tokens: u32,
    /// Number of tokens generated in the response
    pub output_tokens: u32,
    /// Total tokens used (input + output)
    pub total_tokens: u32,
    /// Tools that were used during execution
    pub tools_used: Vec<String>,
    /// Model used for the response
    pub model_used: String,
    /// Temperature setting used
    pub temperature: f32,
    /// Any error message if the task failed
    pub error: Option<String>,
    /// Timestamp when the response was generated
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl AgentResponse {
    /// Create a successful response
    pub fn success(
        content: String,
        execution_time_ms: u64,
        input_tokens: u32,
        output_tokens: u32,
        model_used: String,
        temperature: f32,
        tools_used: Vec<String>,
    ) -> Self {
        Self {
            content,
            success: true,
            execution_time_ms,
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            tools_used,
            model_used,
            temperature,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response
    pub fn error(
        error: String,
        execution_time_ms: u64,
        model_used: String,
        temperature: f32,
    ) -> Self {
        Self {
            content: String::new(),
            success: false,
            execution_time_ms,
            input_tokens: 0,
            output_tokens: 0,
            total_tokens: 0,
            tools_used: Vec::new(),
            model_used,
            temperature,
            error: Some(error),
            timestamp: chrono::Utc::now(),
        }
    }
}
