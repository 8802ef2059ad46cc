//! Command line / environment options of the gateway binaries.

use clap::Args;
use std::time::Duration;
use wormhole_dispatcher::HttpNodeClientSettings;

pub const BASE_URL_ENV: &str = "WORMHOLE_BASE_URL";
pub const NODE_TIMEOUT_ENV: &str = "WORMHOLE_NODE_TIMEOUT_MS";
pub const NODE_CONNECT_TIMEOUT_ENV: &str = "WORMHOLE_NODE_CONNECT_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// How the gateway talks to worker nodes.
#[derive(Debug, Clone, Args)]
pub struct NodeClientArgs {
    /// Upper bound for one forwarded request, in milliseconds.
    #[arg(long, env = NODE_TIMEOUT_ENV, default_value_t = 5000)]
    pub node_timeout_ms: u64,

    #[arg(long, env = NODE_CONNECT_TIMEOUT_ENV, default_value_t = 2000)]
    pub node_connect_timeout_ms: u64,
}

impl NodeClientArgs {
    pub fn settings(&self, num_nodes: usize) -> HttpNodeClientSettings {
        HttpNodeClientSettings::builder()
            .timeout(Duration::from_millis(self.node_timeout_ms))
            .connect_timeout(Duration::from_millis(self.node_connect_timeout_ms))
            .pool_max_idle_per_host(num_nodes)
            .build()
    }
}
