use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slide_api::{router, ApiConfig, AppState, AppStateInner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slide_api=info,tower_http=info")),
        )
        .init();

    let config = ApiConfig::from_env()?;
    let state: AppState = Arc::new(AppStateInner::default());
    info!("starting position\n{}", state.snapshot());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Slide API running on http://{}", config.bind_addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
