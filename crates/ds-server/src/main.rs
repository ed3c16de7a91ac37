use anyhow::Context;
use ds_core::DocsmithConfig;
use ds_server::{app_with_state, state::AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // docsmith-server [config.json]
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DocsmithConfig::resolve(config_path.as_deref()).context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::from_config(config).context("failed to initialise server state")?;
    let app = app_with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, version = env!("CARGO_PKG_VERSION"), "docsmith server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}
