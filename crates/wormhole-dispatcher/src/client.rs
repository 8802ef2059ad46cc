use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use crate::error::DispatchError;
use crate::topology::NodeAddress;

pub const DEFAULT_NODE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Transport used by the dispatcher to reach a worker node.
///
/// One call is one request to one node; implementations must not retry or
/// fail over to another node.
#[async_trait]
pub trait NodeClient: Send + Sync + 'static {
    /// Asks `node` to shorten `url` and returns the raw response body.
    async fn shorten(&self, node: &NodeAddress, url: &str) -> Result<String, DispatchError>;
}

/// Settings for [`HttpNodeClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpNodeClientSettings {
    /// Upper bound for a whole request, from connect to the last body byte.
    #[builder(default = DEFAULT_NODE_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,

    /// Idle connections kept per worker node.
    #[builder(default = 3)]
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpNodeClientSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// [`NodeClient`] speaking the worker's HTTP interface: a form-encoded
/// `POST /shorten` with a `url` field, answered by the bare code.
#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    http: reqwest::Client,
}

impl HttpNodeClient {
    pub fn new(settings: HttpNodeClientSettings) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .build()
            .map_err(|e| DispatchError::Setup(e.to_string()))?;
        Ok(Self { http })
    }
}

fn map_reqwest_error(node: &NodeAddress, err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        DispatchError::Timeout { node: node.clone() }
    } else {
        DispatchError::Transport {
            node: node.clone(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn shorten(&self, node: &NodeAddress, url: &str) -> Result<String, DispatchError> {
        let endpoint = node.shorten_endpoint();
        trace!(node = %node, endpoint = %endpoint, "forwarding shorten request");

        let response = self
            .http
            .post(&endpoint)
            .form(&[("url", url)])
            .send()
            .await
            .map_err(|e| map_reqwest_error(node, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(node, e))?;

        if !status.is_success() {
            return Err(DispatchError::Status {
                node: node.clone(),
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(node = %node, status = status.as_u16(), "node answered");
        Ok(body)
    }
}
