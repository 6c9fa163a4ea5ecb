use crate::agent::agent::Agent;
use crate::llm::ChatMessage;
use crate::task::Task;

impl Agent {
    /// Build initial messages for a task, optionally carrying context from
    /// earlier tasks in the run
    pub fn build_initial_messages(&self, task: &Task, context: Option<&str>) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.build_system_prompt()),
            ChatMessage::user(self.build_task_prompt(task, context)),
        ]
    }

    /// System prompt from the persona
    fn build_system_prompt(&self) -> String {
        let mut prompt = format!(
            "You are {}, working as {}.\n\n{}\n\nYour personal goal is: {}",
            self.name, self.role, self.backstory, self.goal
        );

        if !self.tools.is_empty() {
            prompt.push_str(&format!(
                "\n\nYou have access to the following tools: {}. \
                 Use them to gather current, factual information before answering.",
                self.tools.join(", ")
            ));
        }

        prompt.push_str(
            "\n\nWork on the task you are given and produce the deliverable yourself. \
             Do not ask the user questions.",
        );
        prompt
    }

    /// Task-specific prompt
    fn build_task_prompt(&self, task: &Task, context: Option<&str>) -> String {
        let mut prompt = format!("Task: {}", task.description);

        if let Some(expected_output) = &task.expected_output {
            prompt.push_str(&format!("\n\nExpected Output: {}", expected_output));
        }

        if let Some(context) = context {
            if !context.trim().is_empty() {
                prompt.push_str(&format!(
                    "\n\nContext from work completed earlier in this run:\n{}",
                    context
                ));
            }
        }

        prompt.push_str(
            "\n\nIMPORTANT - Output Format: respond with the deliverable itself as plain \
             markdown. Do not wrap the response in a code fence.",
        );
        prompt
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
    use std::sync::Arc;

    struct NullProvider;

    #[async_trait]
    impl LlmProvider for NullProvider {
        async fn completion(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                kind: CompletionKind::Message {
                    content: "ok".to_string(),
                },
                usage: None,
            })
        }
    }

    fn test_agent(tools: Vec<String>) -> Agent {
        Agent::new(
            "Researcher".to_string(),
            "Lead Research Scientist".to_string(),
            "Uncover developments in Rust".to_string(),
            "You're a seasoned researcher.".to_string(),
            tools,
            false,
            false,
            AgentModelConfig::new("test-model".to_string(), 0.7, 1024),
            Arc::new(NullProvider),
        )
    }

    #[test]
    fn test_system_prompt_mentions_persona_and_tools() {
        let agent = test_agent(vec!["serper_search".to_string()]);
        let messages = agent.build_initial_messages(
            &Task::new("desc".to_string(), None, "Researcher".to_string()),
            None,
        );
        let system = messages[0].content.as_deref().unwrap();
        assert!(system.contains("Lead Research Scientist"));
        assert!(system.contains("seasoned researcher"));
        assert!(system.contains("serper_search"));
    }

    #[test]
    fn test_task_prompt_includes_context_and_expected_output() {
        let agent = test_agent(vec![]);
        let task = Task::new(
            "Write the article".to_string(),
            Some("1000 words".to_string()),
            "Writer".to_string(),
        );
        let messages = agent.build_initial_messages(&task, Some("research brief"));
        let user = messages[1].content.as_deref().unwrap();
        assert!(user.contains("Task: Write the article"));
        assert!(user.contains("Expected Output: 1000 words"));
        assert!(user.contains("research brief"));
    }

    #[test]
    fn test_blank_context_is_omitted() {
        let agent = test_agent(vec![]);
        let task = Task::new("desc".to_string(), None, "Writer".to_string());
        let messages = agent.build_initial_messages(&task, Some("   "));
        let user = messages[1].content.as_deref().unwrap();
        assert!(!user.contains("Context from work completed"));
    }
}
