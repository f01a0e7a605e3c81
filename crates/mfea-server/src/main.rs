//! MFEA HTTP server
//!
//! Liveness for the hosting platform plus a JSON view of the market check.
//!
//! Endpoints:
//!   GET /          - liveness text
//!   GET /healthz   - health check
//!   GET /check     - evaluate the market
//!   GET /commands  - bot command list
//!   GET /links     - external link

mod handlers;
mod keepalive;
mod state;

use mfea_market::{MarketEvaluator, MfeaConfig};
use mfea_utils::config::{env_lookup, parse_var};

use crate::keepalive::KeepAliveConfig;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let app_config = mfea_utils::Config::from_env();
    // Request-level traces stay out of production logs.
    let default_filter = if app_config.is_production() {
        "info"
    } else {
        "info,tower_http=debug"
    };
    mfea_utils::init_tracing_with(default_filter);

    let config = MfeaConfig::from_env()?;
    let evaluator = MarketEvaluator::from_config(&config)?;
    tracing::info!(
        app = %app_config.app_name,
        environment = %app_config.environment,
        symbol = %config.symbol,
        rate_provider = ?config.rate_provider,
        rate_policy = ?config.rate_policy,
        "configuration loaded"
    );

    let state = AppState::new(evaluator, config.link_url.as_str());
    let app = handlers::router(state);

    if let Some(keepalive) = KeepAliveConfig::from_lookup(&env_lookup)? {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        keepalive::spawn(keepalive, client);
    }

    let port: u16 = parse_var(&env_lookup, "PORT").unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "mfea server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("mfea server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
