use std::sync::Arc;
use anyhow::Context;
use pointledger::api::{ApiState, create_router};
use pointledger::config::AppConfig;
use pointledger::ledger::PointService;
use pointledger::observability::metrics::register_metrics;
use pointledger::observability::tracing::init_tracing;
use pointledger::storage::{InMemoryBalanceStore, InMemoryHistoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("POINTLEDGER_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("failed to load configuration")?;

    init_tracing(&config.logging)?;
    register_metrics()?;

    let latency = config.store.simulated_latency();
    let service = PointService::with_config(
        InMemoryBalanceStore::with_latency(latency),
        InMemoryHistoryStore::with_latency(latency),
        config.ledger.clone(),
    );
    let app = create_router(Arc::new(ApiState::new(service)));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, env = %env, "pointledger listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pointledger stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
