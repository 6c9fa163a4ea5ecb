use agentverse::config::AppConfig;
use agentverse::llm;
use agentverse::server::{self, AppState};

use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        "configuration loaded"
    );

    // The search tool reads its key from the environment; a key from the
    // config file is exported so both sources work
    if let Some(serper_key) = &config.search.serper_api_key {
        std::env::set_var("SERPER_API_KEY", serper_key);
    }
    if config.llm_config()?.resolved_api_key().is_none() {
        tracing::warn!(
            "no LLM API key configured; generation requests will fail until one is set"
        );
    }

    let provider = llm::get_provider(config.llm_config()?)?;
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    let state = Arc::new(AppState { config, provider });
    let app = server::router(state);

    info!("AgentVerse running on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("received SIGTERM, shutting down");
        },
    }
}
