//! Profile aggregator server.

use anyhow::Context;
use profile_aggregator::api::rest::{AppState, create_router};
use profile_aggregator::config::AppConfig;
use profile_aggregator::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging).context("failed to install tracing subscriber")?;

    let state = AppState::from_upstream_config(&config.upstream)
        .context("failed to wire upstream sources")?;
    let router = create_router(Arc::new(state));

    let listener = TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?;

    info!(
        address = %listener.local_addr()?,
        user_service = %config.upstream.user_service_url,
        order_service = %config.upstream.order_service_url,
        timeout_ms = config.upstream.timeout_ms,
        "profile aggregator listening"
    );
    info!("try: curl http://localhost:{}/api/user-profile/1", config.server.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("profile aggregator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
