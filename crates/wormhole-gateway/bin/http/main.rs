mod cli;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use wormhole_dispatcher::{ClusterTopology, Dispatcher, HttpNodeClient};
use wormhole_gateway::{App, AppState, FrontendService};
use wormhole_storage::open_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    wormhole_telemetry::init_tracing(config.log_format)?;

    let nodes: Vec<String> = config.nodes.iter().map(ToString::to_string).collect();
    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        store_backend = %config.store.backend,
        nodes = ?nodes,
        "starting gateway"
    );

    let topology = ClusterTopology::new(config.nodes.clone()).context("invalid topology")?;
    let client = HttpNodeClient::new(config.node_client.settings(topology.len()))?;
    let store = open_store(config.store.backend, config.store.redis_settings())
        .await
        .context("failed to open mapping store")?;

    let frontend = FrontendService::builder()
        .dispatcher(Dispatcher::new(topology, std::sync::Arc::new(client)))
        .store(store)
        .base_url(config.base_url)
        .build();

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway is running");

    axum::serve(listener, App::router(AppState::new(frontend)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down gateway");
        })
        .await?;

    Ok(())
}
