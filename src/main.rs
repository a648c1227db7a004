use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lms_api::config::AppConfig;
use lms_api::database::get_db_pool;
use lms_api::routes::build_router;
use lms_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let db = get_db_pool(&config)
        .await
        .context("failed to connect to database")?;

    let app_state = AppState::new(db, &config);

    match app_state.reset_tokens.purge_expired().await {
        Ok(0) => {}
        Ok(purged) => tracing::info!("🧹 Purged {} expired reset tokens", purged),
        Err(e) => tracing::warn!("Failed to purge expired reset tokens: {}", e),
    }

    let app = build_router(app_state);
    start_server(app, &config.bind_address()).await
}

async fn start_server(app: axum::Router, addr: &str) -> anyhow::Result<()> {
    tracing::info!("🚀 Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
