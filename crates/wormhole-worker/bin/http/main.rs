mod cli;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use wormhole_storage::open_store;
use wormhole_worker::{http, WorkerNode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    wormhole_telemetry::init_tracing(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        store_backend = %config.store.backend,
        "starting worker node"
    );

    let store = open_store(config.store.backend, config.store.redis_settings())
        .await
        .context("failed to open mapping store")?;
    let node = WorkerNode::new(store);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "worker node is running");

    axum::serve(listener, http::router(node))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down worker node");
        })
        .await?;

    Ok(())
}
