use clap::Parser;
use std::net::SocketAddr;
use wormhole_dispatcher::NodeAddress;
use wormhole_gateway::config::{NodeClientArgs, BASE_URL_ENV, DEFAULT_BASE_URL};
use wormhole_storage::StoreArgs;
use wormhole_telemetry::{LogFormat, LOG_FORMAT_ENV};

pub const LISTEN_ADDR_ENV: &str = "WORMHOLE_GATEWAY_LISTEN_ADDR";
pub const NODES_ENV: &str = "WORMHOLE_NODES";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_NODES: &str = "127.0.0.1:8081,127.0.0.1:8082,127.0.0.1:8083";

#[derive(Debug, Parser)]
#[command(name = "wormhole-gateway", about = "Public Wormhole gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL short URLs are built on.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Worker node addresses, in round-robin order.
    #[arg(
        long,
        env = NODES_ENV,
        value_delimiter = ',',
        default_value = DEFAULT_NODES,
        required = true
    )]
    pub nodes: Vec<NodeAddress>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub node_client: NodeClientArgs,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
