use crate::agent::agent::{Agent, AgentResponse};
use crate::agent::output::clean_artifact;
use crate::llm::{ChatMessage, CompletionKind, CompletionRequest, Usage};
use crate::task::Task;
use crate::tools;

const MAX_RETRIES: usize = 3;

impl Agent {
    /// Execute a task and return a response with execution metrics.
    /// `context` carries the outputs of tasks completed earlier in the run.
    pub async fn call(&self, task: &Task, context: Option<&str>) -> AgentResponse {
        let start_time = std::time::Instant::now();

        match self.process_task(task, context).await {
            Ok((content, input_tokens, output_tokens, tools_used)) => AgentResponse::success(
                content,
                start_time.elapsed().as_millis() as u64,
                input_tokens,
                output_tokens,
                self.llm_config.model_name.clone(),
                self.llm_config.temperature,
                tools_used,
            ),
            Err(error) => AgentResponse::error(
                error,
                start_time.elapsed().as_millis() as u64,
                self.llm_config.model_name.clone(),
                self.llm_config.temperature,
            ),
        }
    }

    /// Core task processing: drive the LLM, re-asking on transport errors
    /// and on output that fails artifact cleanup
    async fn process_task(
        &self,
        task: &Task,
        context: Option<&str>,
    ) -> Result<(String, u32, u32, Vec<String>), String> {
        let mut tools_used = Vec::new();
        let mut messages = self.build_initial_messages(task, context);

        for attempt in 1..=MAX_RETRIES {
            let (raw_result, input_tokens, output_tokens) =
                match self.execute_with_llm(&mut messages, &mut tools_used).await {
                    Ok(result) => result,
                    Err(e) => {
                        if attempt == MAX_RETRIES {
                            return Err(format!(
                                "LLM execution failed after {} attempts: {}",
                                MAX_RETRIES, e
                            ));
                        }
                        tracing::warn!(agent = %self.name, attempt, error = %e, "LLM call failed, retrying");
                        continue;
                    }
                };

            match clean_artifact(&raw_result) {
                Ok(content) => return Ok((content, input_tokens, output_tokens, tools_used)),
                Err(validation_error) => {
                    if attempt == MAX_RETRIES {
                        return Err(format!(
                            "Output validation failed after {} attempts: {}",
                            MAX_RETRIES, validation_error
                        ));
                    }
                    messages.push(ChatMessage::user(format!(
                        "Your previous response was invalid: {}. \
                         Please provide the complete deliverable as plain markdown.",
                        validation_error
                    )));
                }
            }
        }

        Err("Maximum retry attempts exceeded".to_string())
    }

    /// One pass through the LLM, resolving tool calls until the model
    /// produces a message
    async fn execute_with_llm(
        &self,
        messages: &mut Vec<ChatMessage>,
        tools_used: &mut Vec<String>,
    ) -> Result<(String, u32, u32), String> {
        let tool_specs = if self.tools.is_empty() {
            None
        } else {
            Some(tools::get_tool_specs_by_names(&self.tools))
        };

        let mut total_input_tokens = 0;
        let mut total_output_tokens = 0;

        loop {
            let request = CompletionRequest::new(
                messages.clone(),
                self.llm_config.model_name.clone(),
                Some(self.llm_config.temperature),
                Some(self.llm_config.max_tokens),
                tool_specs.clone(),
            );

            let response = self
                .provider
                .completion(request)
                .await
                .map_err(|e| e.to_string())?;

            let usage = response.usage.unwrap_or_default();
            total_input_tokens += self.input_tokens_or_estimate(&usage, messages);

            match response.kind {
                CompletionKind::Message { content } => {
                    total_output_tokens += self.output_tokens_or_estimate(&usage, &content);
                    return Ok((content, total_input_tokens, total_output_tokens));
                }
                CompletionKind::ToolCall { tool_calls } => {
                    total_output_tokens += usage.completion_tokens;
                    messages.push(ChatMessage::assistant_tool_calls(tool_calls.clone()));

                    for call in tool_calls {
                        let tool_name = call.function.name.clone();
                        let tool_args = call.function.arguments.clone();
                        tools_used.push(tool_name.clone());

                        // A failing tool reports back to the model instead of
                        // aborting the whole run
                        let tool_result = match tools::execute_tool(&tool_name, &tool_args).await {
                            Ok(result) => result,
                            Err(e) => {
                                tracing::warn!(agent = %self.name, tool = %tool_name, error = %e, "tool execution failed");
                                format!("Tool '{}' failed: {}", tool_name, e)
                            }
                        };

                        if self.verbose {
                            tracing::debug!(
                                agent = %self.name,
                                tool = %tool_name,
                                result_len = tool_result.len(),
                                "tool executed"
                            );
                        }

                        messages.push(ChatMessage::tool(tool_result, call.id));
                    }
                }
            }
        }
    }

    fn input_tokens_or_estimate(&self, usage: &Usage, messages: &[ChatMessage]) -> u32 {
        if usage.prompt_tokens > 0 {
            return usage.prompt_tokens;
        }
        let total_chars: usize = messages
            .iter()
            .map(|msg| msg.content.as_deref().unwrap_or_default().len() + 20)
            .sum();
        // ~3.5 characters per token for English text
        (total_chars as f64 / 3.5) as u32
    }

    fn output_tokens_or_estimate(&self, usage: &Usage, content: &str) -> u32 {
        if usage.completion_tokens > 0 {
            return usage.completion_tokens;
        }
        (content.len() as f64 / 3.5) as u32
    }
}
