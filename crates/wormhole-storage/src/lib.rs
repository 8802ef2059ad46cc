//! Mapping store backends for the Wormhole URL shortener.

pub mod config;
pub mod memory;
pub mod redis;

pub use config::StoreArgs;
pub use memory::InMemoryUrlStore;
pub use self::redis::{RedisStoreSettings, RedisUrlStore};
pub use wormhole_core::{StoreError, UrlStore};

use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{info, warn};

/// Which store implementation a process should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Process-local map; only shared between nodes running in one process.
    #[value(name = "in-memory")]
    InMemory,
    /// Shared Redis instance.
    #[value(name = "redis")]
    Redis,
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::InMemory => write!(f, "in-memory"),
            StoreBackend::Redis => write!(f, "redis"),
        }
    }
}

/// Opens the configured store.
///
/// For Redis, a `PING` probe runs once. An unreachable Redis is logged and
/// the store is returned anyway; its commands fail until Redis answers. Only
/// an unparsable URL is an error.
pub async fn open_store(
    backend: StoreBackend,
    settings: RedisStoreSettings,
) -> Result<Arc<dyn UrlStore>, StoreError> {
    match backend {
        StoreBackend::InMemory => Ok(Arc::new(InMemoryUrlStore::new())),
        StoreBackend::Redis => {
            let url = settings.url.clone();
            let store = RedisUrlStore::new(settings)?;
            match store.ping().await {
                Ok(()) => info!(url = %url, "redis is reachable"),
                Err(e) => warn!(url = %url, error = %e, "redis did not answer ping"),
            }
            Ok(Arc::new(store))
        }
    }
}
