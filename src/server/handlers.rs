use crate::agent::AgentModelConfig;
use crate::catalog::{self, CatalogError};
use crate::server::error::AppError;
use crate::server::AppState;
use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// GET / - the single page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct PersonaInfo {
    pub name: String,
    pub role: String,
    pub summary: String,
    pub tools: Vec<String>,
}

#[derive(Serialize)]
pub struct AgentsListResponse {
    pub agents: Vec<PersonaInfo>,
    pub count: usize,
}

// GET /api/agents - the builtin personas
pub async fn list_agents() -> Json<AgentsListResponse> {
    let agents: Vec<PersonaInfo> = catalog::builtin_personas()
        .into_iter()
        .map(|persona| PersonaInfo {
            name: persona.name,
            role: persona.role,
            summary: persona.summary,
            tools: persona.tools,
        })
        .collect();

    Json(AgentsListResponse {
        count: agents.len(),
        agents,
    })
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub agents: Vec<String>,
    pub temperature: Option<f32>,
}

#[derive(Serialize)]
pub struct TaskSummary {
    pub agent: String,
    pub total_tokens: u32,
    pub duration_ms: u64,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub content: String,
    pub file_name: String,
    pub task_outputs: Vec<TaskSummary>,
    pub total_tokens: u32,
    pub duration_ms: u64,
}

// POST /api/generate - run the selected agents against the topic
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let topic = request.topic.trim().to_string();
    if topic.is_empty() {
        return Err(AppError::InvalidRequest(
            "Enter a topic to generate content about".to_string(),
        ));
    }
    if request.agents.is_empty() {
        return Err(AppError::InvalidRequest(
            "Select at least one agent".to_string(),
        ));
    }

    let temperature = request.temperature.unwrap_or(state.config.llm.temperature);
    if !(0.0..=1.0).contains(&temperature) {
        return Err(AppError::InvalidRequest(
            "Temperature must be between 0.0 and 1.0".to_string(),
        ));
    }

    let llm_config = AgentModelConfig::new(
        state.config.llm.model.clone(),
        temperature,
        state.config.llm.max_tokens,
    );

    let crew = catalog::crew_for(&request.agents, &llm_config, state.provider.clone())
        .map_err(|e| match e {
            CatalogError::UnknownPersona(name) => AppError::UnknownAgent(name),
            CatalogError::Crew(e) => AppError::Generation(e),
        })?;

    let mut inputs = HashMap::new();
    inputs.insert("topic".to_string(), topic.clone());

    tracing::info!(topic = %topic, agents = ?request.agents, temperature, "starting content generation");
    let output = crew.kickoff(&inputs).await?;
    tracing::info!(
        tokens = output.total_tokens,
        duration_ms = output.duration_ms,
        "content generation finished"
    );

    let file_name = format!("{}_article.md", topic.to_lowercase().replace(' ', "_"));

    Ok(Json(GenerateResponse {
        content: output.raw,
        file_name,
        task_outputs: output
            .task_outputs
            .into_iter()
            .map(|task| TaskSummary {
                agent: task.agent,
                total_tokens: task.total_tokens,
                duration_ms: task.duration_ms,
            })
            .collect(),
        total_tokens: output.total_tokens,
        duration_ms: output.duration_ms,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::llm::{
        CompletionKind, CompletionRequest, CompletionResponse, LlmError, LlmProvider,
    };
    use crate::server::router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn completion(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                kind: CompletionKind::Message {
                    content: self.0.to_string(),
                },
                usage: None,
            })
        }
    }

    fn test_app(reply: &'static str) -> axum::Router {
        let state = Arc::new(AppState {
            config: AppConfig::load_from("no-such-file").unwrap(),
            provider: Arc::new(CannedProvider(reply)),
        });
        router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let response = test_app("x")
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_agents() {
        let response = test_app("x")
            .oneshot(
                Request::builder()
                    .uri("/api/agents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["count"], 7);
        assert_eq!(json["agents"][0]["name"], "Researcher");
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_topic() {
        let response = test_app("x")
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({"topic": "   ", "agents": ["Writer"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("topic"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_selection() {
        let response = test_app("x")
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({"topic": "AI", "agents": []}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_agent() {
        let response = test_app("x")
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({"topic": "AI", "agents": ["Astrologer"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Unknown agent: Astrologer");
    }

    #[tokio::test]
    async fn test_generate_happy_path() {
        let response = test_app("# AI in Healthcare\n\nAn article.")
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({
                    "topic": "AI in Healthcare",
                    "agents": ["Writer", "Editor"],
                    "temperature": 0.5
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["file_name"], "ai_in_healthcare_article.md");
        assert_eq!(json["task_outputs"].as_array().unwrap().len(), 2);
        assert!(json["content"].as_str().unwrap().contains("An article."));
    }

    #[tokio::test]
    async fn test_generate_rejects_out_of_range_temperature() {
        let response = test_app("x")
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({"topic": "AI", "agents": ["Writer"], "temperature": 1.5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
