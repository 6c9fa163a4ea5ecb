use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A unit of work handed to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub expected_output: Option<String>,
    /// Persona key of the agent this task is assigned to
    pub agent: String,
}

impl Task {
    pub fn new(description: String, expected_output: Option<String>, agent: String) -> Self {
        Self {
            description,
            expected_output,
            agent,
        }
    }

    /// Produce a copy with `{key}` placeholders replaced from the kickoff
    /// inputs. Placeholders without a matching input are left intact.
    pub fn interpolated(&self, inputs: &HashMap<String, String>) -> Self {
        Self {
            description: interpolate(&self.description, inputs),
            expected_output: self
                .expected_output
                .as_ref()
                .map(|expected| interpolate(expected, inputs)),
            agent: self.agent.clone(),
        }
    }
}

/// Replace `{key}` placeholders in a template with values from the inputs map
pub fn interpolate(template: &str, inputs: &HashMap<String, String>) -> String {
    let mut text = template.to_string();
    for (key, value) in inputs {
        text = text.replace(&format!("{{{}}}", key), value);
    }
    text
}

/// Result of running a single task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    pub agent: String,
    pub content: String,
    pub total_tokens: u32,
    pub duration_ms: u64,
}
