pub mod serper;

use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, OnceLock};

/// Description of a tool as presented to the LLM (OpenAI function shape)
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: serde_json::Value,
}

/// Boxed future returned by tool handlers
pub type ToolFuture = Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send>>;

/// A registered tool: its LLM-facing spec plus the handler that runs it.
/// Handlers take the raw arguments JSON produced by the model.
#[derive(Clone)]
pub struct Tool {
    pub spec: ToolSpec,
    pub handler: fn(String) -> ToolFuture,
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),
    #[error("Tool API error: {message}")]
    ApiError { message: String },
}

fn registry() -> &'static Mutex<HashMap<String, Tool>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, Tool>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Register a tool under its spec name. Later registrations replace earlier
/// ones with the same name.
pub fn register_tool(tool: Tool) {
    let mut tools = registry().lock().expect("tool registry poisoned");
    tools.insert(tool.spec.name.clone(), tool);
}

/// Resolve tool specs for the given names, skipping names nothing registered.
pub fn get_tool_specs_by_names(names: &[String]) -> Vec<ToolSpec> {
    let tools = registry().lock().expect("tool registry poisoned");
    names
        .iter()
        .filter_map(|name| match tools.get(name) {
            Some(tool) => Some(tool.spec.clone()),
            None => {
                tracing::warn!(tool = %name, "requested tool is not registered");
                None
            }
        })
        .collect()
}

/// Execute a registered tool with the raw arguments JSON from the model.
pub async fn execute_tool(name: &str, args: &str) -> Result<String, ToolError> {
    let handler = {
        let tools = registry().lock().expect("tool registry poisoned");
        tools
            .get(name)
            .map(|tool| tool.handler)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?
    };
    handler(args.to_string()).await
}

// Builtins register before main so agents can resolve them by name.
#[ctor::ctor]
fn register_builtins() {
    register_tool(serper::serper_tool());
}
