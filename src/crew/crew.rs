use crate::agent::Agent;
use crate::task::{Task, TaskOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("Crew has no tasks to run")]
    EmptyCrew,
    #[error("Task is assigned to '{0}' but no such agent is in the crew")]
    MissingAgent(String),
    #[error("Agent '{agent}' failed: {message}")]
    TaskFailed { agent: String, message: String },
}

/// A set of agents and the ordered tasks they execute
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    verbose: bool,
}

/// Result of a crew run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Output of the final task, the artifact the user sees
    pub raw: String,
    /// Every task's output, in execution order
    pub task_outputs: Vec<TaskOutput>,
    pub total_tokens: u32,
    pub duration_ms: u64,
}

impl Crew {
    /// Assemble a crew. Every task must name an agent present in the crew.
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>, verbose: bool) -> Result<Self, CrewError> {
        if tasks.is_empty() {
            return Err(CrewError::EmptyCrew);
        }
        for task in &tasks {
            if !agents.iter().any(|agent| agent.name == task.agent) {
                return Err(CrewError::MissingAgent(task.agent.clone()));
            }
        }
        Ok(Self {
            agents,
            tasks,
            verbose,
        })
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(|agent| agent.name.as_str()).collect()
    }

    /// Run the tasks sequentially. Inputs are interpolated into every task
    /// and every agent's goal/backstory; each task sees the outputs of the
    /// tasks before it as context. The first failure aborts the run.
    pub async fn kickoff(&self, inputs: &HashMap<String, String>) -> Result<CrewOutput, CrewError> {
        let start_time = std::time::Instant::now();
        let mut task_outputs: Vec<TaskOutput> = Vec::new();
        let mut context_parts: Vec<String> = Vec::new();
        let mut total_tokens = 0;

        for task in &self.tasks {
            let task = task.interpolated(inputs);
            let agent = self
                .agents
                .iter()
                .find(|agent| agent.name == task.agent)
                .ok_or_else(|| CrewError::MissingAgent(task.agent.clone()))?
                .interpolated(inputs);

            if self.verbose {
                tracing::info!(agent = %agent.name, "starting task");
            }

            let context = if context_parts.is_empty() {
                None
            } else {
                Some(context_parts.join("\n\n"))
            };
            let response = agent.call(&task, context.as_deref()).await;

            if !response.success {
                return Err(CrewError::TaskFailed {
                    agent: agent.name.clone(),
                    message: response
                        .error
                        .unwrap_or_else(|| "Unknown error".to_string()),
                });
            }

            if self.verbose {
                tracing::info!(
                    agent = %agent.name,
                    tokens = response.total_tokens,
                    duration_ms = response.execution_time_ms,
                    "task completed"
                );
            }

            total_tokens += response.total_tokens;
            context_parts.push(format!("## {} ({})\n{}", agent.name, agent.role, response.content));
            task_outputs.push(TaskOutput {
                agent: agent.name.clone(),
                content: response.content,
                total_tokens: response.total_tokens,
                duration_ms: response.execution_time_ms,
            });
        }

        let raw = task_outputs
            .last()
            .map(|output| output.content.clone())
            .unwrap_or_default();

        Ok(CrewOutput {
            raw,
            task_outputs,
            total_tokens,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentModelConfig;
    use crate::llm::{
        CompletionKind, CompletionRequest, CompletionResponse, LlmError, LlmProvider,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Provider double that answers with a canned string and records the
    /// prompts it was asked
    struct RecordingProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn completion(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let user_prompt = request
                .messages
                .iter()
                .filter_map(|m| m.content.clone())
                .collect::<Vec<_>>()
                .join("\n---\n");
            self.prompts.lock().unwrap().push(user_prompt);
            Ok(CompletionResponse {
                kind: CompletionKind::Message {
                    content: self.reply.clone(),
                },
                usage: None,
            })
        }
    }

    fn agent(name: &str, provider: Arc<dyn LlmProvider>) -> Agent {
        Agent::new(
            name.to_string(),
            format!("{} role", name),
            format!("Work on {{topic}} as {}", name),
            "Backstory about {topic}.".to_string(),
            vec![],
            false,
            false,
            AgentModelConfig::new("test-model".to_string(), 0.7, 512),
            provider,
        )
    }

    fn task(agent: &str, description: &str) -> Task {
        Task::new(description.to_string(), None, agent.to_string())
    }

    fn topic_inputs() -> HashMap<String, String> {
        let mut inputs = HashMap::new();
        inputs.insert("topic".to_string(), "rust web servers".to_string());
        inputs
    }

    #[test]
    fn test_new_rejects_empty_tasks() {
        let provider = Arc::new(RecordingProvider::new("x"));
        let result = Crew::new(vec![agent("Writer", provider)], vec![], false);
        assert!(matches!(result, Err(CrewError::EmptyCrew)));
    }

    #[test]
    fn test_new_rejects_unknown_task_agent() {
        let provider = Arc::new(RecordingProvider::new("x"));
        let result = Crew::new(
            vec![agent("Writer", provider)],
            vec![task("Editor", "edit it")],
            false,
        );
        assert!(matches!(result, Err(CrewError::MissingAgent(name)) if name == "Editor"));
    }

    #[tokio::test]
    async fn test_kickoff_runs_tasks_in_order_with_context() {
        let provider = Arc::new(RecordingProvider::new("# Output"));
        let crew = Crew::new(
            vec![
                agent("Researcher", provider.clone()),
                agent("Writer", provider.clone()),
            ],
            vec![
                task("Researcher", "Research {topic}"),
                task("Writer", "Write about {topic}"),
            ],
            false,
        )
        .unwrap();

        let output = crew.kickoff(&topic_inputs()).await.unwrap();

        assert_eq!(output.task_outputs.len(), 2);
        assert_eq!(output.task_outputs[0].agent, "Researcher");
        assert_eq!(output.task_outputs[1].agent, "Writer");
        assert_eq!(output.raw, "# Output");

        let prompts = provider.prompts.lock().unwrap();
        // First task: topic interpolated, no context yet
        assert!(prompts[0].contains("Research rust web servers"));
        assert!(!prompts[0].contains("Context from work completed"));
        // Second task: sees the first task's output as context
        assert!(prompts[1].contains("Write about rust web servers"));
        assert!(prompts[1].contains("Context from work completed"));
        assert!(prompts[1].contains("# Output"));
        // Agent persona was interpolated too
        assert!(prompts[1].contains("Work on rust web servers as Writer"));
    }

    #[tokio::test]
    async fn test_kickoff_aborts_on_task_failure() {
        struct FailingProvider;

        #[async_trait]
        impl LlmProvider for FailingProvider {
            async fn completion(
                &self,
                _request: CompletionRequest,
            ) -> Result<CompletionResponse, LlmError> {
                Err(LlmError::ApiError {
                    status: 429,
                    message: "rate limited".to_string(),
                })
            }
        }

        let crew = Crew::new(
            vec![agent("Researcher", Arc::new(FailingProvider))],
            vec![task("Researcher", "Research {topic}")],
            false,
        )
        .unwrap();

        let result = crew.kickoff(&topic_inputs()).await;
        match result {
            Err(CrewError::TaskFailed { agent, message }) => {
                assert_eq!(agent, "Researcher");
                assert!(message.contains("rate limited"));
            }
            other => panic!("expected TaskFailed, got {:?}", other.map(|_| ())),
        }
    }
}
