//! Mock user and order services for local development.
//!
//! ```text
//! cargo run --features cli --bin mock-upstream -- --port 4000
//! ```

use anyhow::Context;
use clap::Parser;
use profile_aggregator::config::{DEFAULT_LOG_FILTER, LoggingConfig};
use profile_aggregator::infrastructure::mock_upstream::{MockUpstream, MockUpstreamConfig};
use profile_aggregator::telemetry;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// Serves `/users/{id}` and `/orders?userId={id}` from seeded data.
#[derive(Debug, Parser)]
#[command(name = "mock-upstream", version, about)]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 4000)]
    port: u16,

    /// Simulated latency of the user endpoint.
    #[arg(long, default_value_t = 50)]
    user_latency_ms: u64,

    /// Simulated latency of the orders endpoint.
    #[arg(long, default_value_t = 100)]
    order_latency_ms: u64,

    /// Emit JSON logs.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    telemetry::init(&LoggingConfig {
        json: args.json_logs,
        filter: DEFAULT_LOG_FILTER.to_owned(),
    })
    .context("failed to install tracing subscriber")?;

    let router = MockUpstream::seeded(MockUpstreamConfig {
        user_latency: Duration::from_millis(args.user_latency_ms),
        order_latency: Duration::from_millis(args.order_latency_ms),
    })
    .into_router();

    let address = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(address = %listener.local_addr()?, "mock upstream listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
