use std::sync::Arc;

use tracing::{debug, warn};
use wormhole_core::{extract_code, ShortCode};

use crate::client::NodeClient;
use crate::error::DispatchError;
use crate::topology::{ClusterTopology, NodeAddress};

/// Assigns each shorten request to exactly one worker node, round-robin.
///
/// The dispatcher only forwards. Persisting the mapping is the worker's job,
/// and workers never dispatch again, so a request crosses at most one hop.
pub struct Dispatcher {
    topology: ClusterTopology,
    client: Arc<dyn NodeClient>,
}

impl Dispatcher {
    pub fn new(topology: ClusterTopology, client: Arc<dyn NodeClient>) -> Self {
        Self { topology, client }
    }

    /// Picks the node for the next request and advances the cursor.
    pub fn next_node(&self) -> &NodeAddress {
        self.topology.next_node()
    }

    pub fn topology(&self) -> &ClusterTopology {
        &self.topology
    }

    /// Forwards `url` to the next node and returns the code it reports.
    ///
    /// Exactly one request is sent per call. Any failure, including an empty
    /// or malformed body, is returned as is; there is no retry and no
    /// fallback to another node.
    pub async fn shorten(&self, url: &str) -> Result<ShortCode, DispatchError> {
        let node = self.next_node();
        debug!(node = %node, "dispatching shorten request");

        let body = self.client.shorten(node, url).await.inspect_err(|e| {
            warn!(node = %node, error = %e, "dispatch failed");
        })?;

        parse_code(node, &body)
    }
}

/// Reads the code out of a node response. Nodes answer with the bare code,
/// but a full short URL is accepted as well.
fn parse_code(node: &NodeAddress, body: &str) -> Result<ShortCode, DispatchError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DispatchError::MalformedResponse {
            node: node.clone(),
            message: "empty response body".to_string(),
        });
    }

    ShortCode::parse(extract_code(body)).map_err(|e| DispatchError::MalformedResponse {
        node: node.clone(),
        message: e.to_string(),
    })
}
