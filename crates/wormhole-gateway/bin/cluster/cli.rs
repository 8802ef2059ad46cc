use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use wormhole_gateway::config::{NodeClientArgs, BASE_URL_ENV, DEFAULT_BASE_URL};
use wormhole_storage::StoreArgs;
use wormhole_telemetry::{LogFormat, LOG_FORMAT_ENV};

pub const LISTEN_ADDR_ENV: &str = "WORMHOLE_GATEWAY_LISTEN_ADDR";
pub const NUM_NODES_ENV: &str = "WORMHOLE_NUM_NODES";
pub const FIRST_NODE_PORT_ENV: &str = "WORMHOLE_FIRST_NODE_PORT";
pub const NODE_HOST_ENV: &str = "WORMHOLE_NODE_HOST";

/// Runs a gateway plus `num_nodes` workers in one process.
#[derive(Debug, Parser)]
#[command(name = "wormhole-cluster", about = "Single-process Wormhole cluster")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = "127.0.0.1:8080")]
    pub listen_addr: SocketAddr,

    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = NUM_NODES_ENV,
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub num_nodes: u16,

    /// Worker `i` listens on `first_node_port + i`.
    #[arg(long, env = FIRST_NODE_PORT_ENV, default_value_t = 8081)]
    pub first_node_port: u16,

    #[arg(long, env = NODE_HOST_ENV, default_value = "127.0.0.1")]
    pub node_host: IpAddr,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub node_client: NodeClientArgs,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn node_addrs(&self) -> anyhow::Result<Vec<SocketAddr>> {
        (0..self.num_nodes)
            .map(|i| {
                let port = self.first_node_port.checked_add(i).ok_or_else(|| {
                    anyhow::anyhow!("node port overflows: {} + {}", self.first_node_port, i)
                })?;
                Ok(SocketAddr::new(self.node_host, port))
            })
            .collect()
    }
}
