//! Store options shared by every binary that opens a store.

use clap::Args;
use std::time::Duration;

use crate::redis::{RedisStoreSettings, DEFAULT_REDIS_URL};
use crate::StoreBackend;

pub const STORE_BACKEND_ENV: &str = "WORMHOLE_STORE_BACKEND";
pub const REDIS_URL_ENV: &str = "WORMHOLE_REDIS_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "WORMHOLE_REDIS_KEY_PREFIX";
pub const STORE_TIMEOUT_ENV: &str = "WORMHOLE_STORE_TIMEOUT_MS";

/// Where the code → URL mappings live.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    #[arg(
        long = "store",
        env = STORE_BACKEND_ENV,
        value_enum,
        default_value_t = StoreBackend::Redis
    )]
    pub backend: StoreBackend,

    #[arg(long, env = REDIS_URL_ENV, default_value = DEFAULT_REDIS_URL)]
    pub redis_url: String,

    #[arg(long, env = REDIS_KEY_PREFIX_ENV, default_value = "")]
    pub redis_key_prefix: String,

    /// Upper bound for every store operation, in milliseconds.
    #[arg(long, env = STORE_TIMEOUT_ENV, default_value_t = 3000)]
    pub store_timeout_ms: u64,
}

impl StoreArgs {
    pub fn redis_settings(&self) -> RedisStoreSettings {
        RedisStoreSettings::builder()
            .url(self.redis_url.clone())
            .key_prefix(self.redis_key_prefix.clone())
            .timeout(Duration::from_millis(self.store_timeout_ms))
            .build()
    }
}
