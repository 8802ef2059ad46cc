use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::TopologyError;

/// Network location of a worker node, e.g. `127.0.0.1:8081` or
/// `http://worker-1:8081`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeAddress(String);

impl NodeAddress {
    pub fn parse(addr: &str) -> Result<Self, TopologyError> {
        let addr = addr.trim();
        if addr.is_empty() || addr.chars().any(char::is_whitespace) {
            return Err(TopologyError::InvalidAddress(addr.to_string()));
        }
        Ok(Self(addr.trim_end_matches('/').to_string()))
    }

    /// Base URL of the node; plain `host:port` addresses are reached over http.
    pub fn base_url(&self) -> String {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            self.0.clone()
        } else {
            format!("http://{}", self.0)
        }
    }

    /// The node's internal shorten endpoint.
    pub fn shorten_endpoint(&self) -> String {
        format!("{}/shorten", self.base_url())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeAddress {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The fixed set of worker nodes plus the round-robin cursor over them.
///
/// The node list never changes after construction. The cursor always holds
/// the index of the node that receives the next request and is the only
/// mutable state; it is advanced with a compare-and-swap loop so concurrent
/// callers each see a distinct value.
#[derive(Debug)]
pub struct ClusterTopology {
    nodes: Vec<NodeAddress>,
    cursor: AtomicUsize,
}

impl ClusterTopology {
    pub fn new(nodes: Vec<NodeAddress>) -> Result<Self, TopologyError> {
        if nodes.is_empty() {
            return Err(TopologyError::Empty);
        }
        Ok(Self {
            nodes,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the node at the cursor and advances the cursor modulo the
    /// cluster size, as one atomic step.
    pub fn next_node(&self) -> &NodeAddress {
        let len = self.nodes.len();
        let idx = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some((current + 1) % len)
            })
            .unwrap_or_else(|current| current);
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[NodeAddress] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; an empty topology cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
