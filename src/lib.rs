use anyhow::Result;
use tokio::net::TcpListener;

pub mod ai;
mod api;
pub mod category;
mod config;
pub mod messages;
mod relay;
mod system_info;

pub use ai::fallback::{fallback_pool, FallbackPool, FallbackSelector, RandomSource};
pub use api::{router as api_router, CHAT_PATH};
pub use category::Category;
pub use config::Config;
pub use relay::{ChatResponse, PromptRouter, ValidationError};
pub use system_info::BuildInfo;

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Reads .env (if present) and the environment once.
    let config = Config::from_env();

    tracing::info!(build = %BuildInfo::current(), "Starting companion relay...");

    let relay = PromptRouter::new(config.ai, FallbackSelector::default())?;
    if relay.is_configured() {
        tracing::info!(relay = ?relay, "Upstream model configured");
    } else {
        tracing::warn!("DASHSCOPE_API_KEY not set, serving fallback replies only");
    }
    let app = api_router(relay);

    let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
    tracing::info!(addr = %config.bind_addr, path = CHAT_PATH, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
