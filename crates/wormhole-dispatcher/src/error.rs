use thiserror::Error;

use crate::topology::NodeAddress;

/// Failure to forward a shorten request to a worker node.
///
/// A dispatch failure is final: the request is neither retried nor routed
/// to another node.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("node client setup failed: {0}")]
    Setup(String),
    #[error("request to node {node} failed: {message}")]
    Transport { node: NodeAddress, message: String },
    #[error("request to node {node} timed out")]
    Timeout { node: NodeAddress },
    #[error("node {node} answered with status {status}: {message}")]
    Status {
        node: NodeAddress,
        status: u16,
        message: String,
    },
    #[error("node {node} sent a malformed response: {message}")]
    MalformedResponse { node: NodeAddress, message: String },
}

/// Invalid cluster topology configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("cluster topology must contain at least one node")]
    Empty,
    #[error("invalid node address: '{0}'")]
    InvalidAddress(String),
}
