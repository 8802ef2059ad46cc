mod cli;

use crate::cli::CLI;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info};
use wormhole_dispatcher::{ClusterTopology, Dispatcher, HttpNodeClient, NodeAddress};
use wormhole_gateway::{App, AppState, FrontendService};
use wormhole_storage::open_store;
use wormhole_worker::WorkerNode;

async fn wait_for(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    wormhole_telemetry::init_tracing(config.log_format)?;

    let store = open_store(config.store.backend, config.store.redis_settings())
        .await
        .context("failed to open mapping store")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut servers = JoinSet::new();
    let mut nodes = Vec::new();

    for addr in config.node_addrs()? {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind worker on {addr}"))?;
        let addr = listener.local_addr()?;
        let router = wormhole_worker::http::router(WorkerNode::new(store.clone()));
        let shutdown = wait_for(shutdown_rx.clone());

        info!(node = %addr, "worker node is running");
        servers.spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
                .with_context(|| format!("worker {addr} failed"))
        });
        nodes.push(NodeAddress::parse(&addr.to_string())?);
    }

    let topology = ClusterTopology::new(nodes)?;
    let client = HttpNodeClient::new(config.node_client.settings(topology.len()))?;
    let frontend = FrontendService::builder()
        .dispatcher(Dispatcher::new(topology, Arc::new(client)))
        .store(store)
        .base_url(config.base_url)
        .build();

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway is running");

    let router = App::router(AppState::new(frontend));
    let shutdown = wait_for(shutdown_rx.clone());
    servers.spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("gateway failed")
    });

    supervise(servers, tokio::signal::ctrl_c(), shutdown_tx).await
}

/// Runs until `interrupt` resolves or a server stops on its own, then asks
/// every server to stop and waits for all of them.
///
/// The first failure wins; a server that stops before shutdown was requested
/// counts as a failure even if it returned `Ok`.
async fn supervise<F>(
    mut servers: JoinSet<anyhow::Result<()>>,
    interrupt: F,
    shutdown_tx: watch::Sender<bool>,
) -> anyhow::Result<()>
where
    F: Future,
{
    let mut outcome = tokio::select! {
        _ = interrupt => {
            info!("shutting down cluster");
            Ok(())
        }
        Some(result) = servers.join_next() => {
            let result = result
                .map_err(anyhow::Error::from)
                .and_then(|served| served)
                .and_then(|()| Err(anyhow!("server stopped before shutdown was requested")));
            if let Err(e) = &result {
                error!(error = %e, "server exited early");
            }
            result
        }
    };
    shutdown_tx.send_replace(true);

    while let Some(result) = servers.join_next().await {
        let result = result.map_err(anyhow::Error::from).and_then(|served| served);
        if outcome.is_ok() {
            outcome = result;
        }
    }
    outcome
}
