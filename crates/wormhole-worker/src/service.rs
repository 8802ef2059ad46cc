use std::sync::Arc;

use tracing::{debug, info};
use wormhole_core::{generate, ShortCode, UrlStore};

use crate::error::WorkerError;

/// The terminal write path of the cluster.
///
/// A worker derives the code for a URL and persists the mapping in the
/// shared store. It never forwards a request anywhere else.
///
/// Note: codes are a hash of the URL and no collision check is performed;
/// a later write for the same code replaces the earlier one.
#[derive(Clone)]
pub struct WorkerNode {
    store: Arc<dyn UrlStore>,
}

impl WorkerNode {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// Validates `url`, derives its code and writes the mapping.
    ///
    /// The code is only returned after the store acknowledged the write;
    /// a failed write is returned as [`WorkerError::Persistence`].
    pub async fn handle_shorten(&self, url: &str) -> Result<ShortCode, WorkerError> {
        if url.is_empty() {
            return Err(WorkerError::InvalidInput(
                "Missing 'url' parameter".to_string(),
            ));
        }

        let code = generate(url);
        debug!(code = %code, "generated short code");

        self.store.put(&code, url).await?;

        info!(code = %code, "stored url mapping");
        Ok(code)
    }
}
