use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use infrastructure::DynamoTaskStore;
use tasks_api::config::Config;
use tasks_api::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = Config::from_env()?;

    let store = DynamoTaskStore::connect(
        &config.dynamodb_endpoint,
        &config.aws_region,
        &config.table_name,
    )
    .await
    .context("failed to connect to the task store")?;

    let state = AppState::new(Arc::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, table = %config.table_name, "server starting");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
