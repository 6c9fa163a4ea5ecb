pub mod error;
pub mod handlers;

use crate::config::AppConfig;
use crate::llm::LlmProvider;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state: configuration plus the LLM provider every
/// crew run goes through
pub struct AppState {
    pub config: AppConfig,
    pub provider: Arc<dyn LlmProvider>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/agents", get(handlers::list_agents))
        .route("/api/generate", post(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
