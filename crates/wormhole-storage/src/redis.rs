use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;
use wormhole_core::store::{Result, UrlStore};
use wormhole_core::{ShortCode, StoreError};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection settings for [`RedisUrlStore`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisStoreSettings {
    /// Redis connection URL, e.g. `redis://127.0.0.1:6379`.
    #[builder(default = DEFAULT_REDIS_URL.to_string(), setter(into))]
    pub url: String,

    /// Prefix prepended to every short code to form the Redis key.
    /// Empty by default, so keys are the bare codes.
    #[builder(default, setter(into))]
    pub key_prefix: String,

    /// Upper bound for connecting and for every single command.
    #[builder(default = DEFAULT_STORE_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for RedisStoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A [`UrlStore`] backed by a shared Redis instance.
///
/// Mappings are stored as plain `SET <prefix><code> <url>` without expiry.
/// The connection is opened by the first command, not by [`RedisUrlStore::new`],
/// so a process can start while Redis is down. A failed connect attempt is
/// retried by the next command; once open, the connection manager reconnects
/// transparently. Every command, connecting included, is bounded by the
/// configured timeout.
#[derive(Clone)]
pub struct RedisUrlStore {
    client: redis::Client,
    conn: Arc<OnceCell<ConnectionManager>>,
    url: String,
    key_prefix: String,
    timeout: Duration,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

impl RedisUrlStore {
    /// Creates a store for `settings` without touching the network.
    ///
    /// Fails only when the URL cannot be parsed.
    pub fn new(settings: RedisStoreSettings) -> Result<Self> {
        let client = redis::Client::open(settings.url.as_str())
            .map_err(|e| map_redis_error("invalid redis url", e))?;

        Ok(Self {
            client,
            conn: Arc::new(OnceCell::new()),
            url: settings.url,
            key_prefix: settings.key_prefix,
            timeout: settings.timeout,
        })
    }

    /// Sends `PING`, checking that the backend answers.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        self.bounded("ping", async move {
            redis::cmd("PING").query_async::<String>(&mut conn).await
        })
        .await
        .map(|_| ())
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let manager = tokio::time::timeout(
                    self.timeout,
                    ConnectionManager::new(self.client.clone()),
                )
                .await
                .map_err(|_| {
                    StoreError::Timeout(format!(
                        "connecting to {} took longer than {:?}",
                        self.url, self.timeout
                    ))
                })?
                .map_err(|e| map_redis_error("failed to connect to redis", e))?;

                debug!(url = %self.url, "connected to redis");
                Ok::<_, StoreError>(manager)
            })
            .await?;
        Ok(conn.clone())
    }

    fn key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }

    async fn bounded<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e| map_redis_error(operation, e)),
            Err(_) => Err(StoreError::Timeout(format!(
                "{operation}: no reply within {:?}",
                self.timeout
            ))),
        }
    }
}

#[async_trait]
impl UrlStore for RedisUrlStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        let key = self.key(code);
        trace!(code = %code, "writing mapping to redis");

        let mut conn = self.connection().await.inspect_err(|e| {
            warn!(code = %code, error = %e, "redis unavailable on set");
        })?;
        let result = self
            .bounded("failed to write value to redis", async {
                conn.set::<_, _, ()>(&key, url).await
            })
            .await;

        match &result {
            Ok(()) => debug!(code = %code, "stored mapping in redis"),
            Err(e) => warn!(code = %code, error = %e, "redis error on set"),
        }
        result
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.key(code);
        trace!(code = %code, "fetching mapping from redis");

        let mut conn = self.connection().await.inspect_err(|e| {
            warn!(code = %code, error = %e, "redis unavailable on get");
        })?;
        let result = self
            .bounded("failed to fetch value from redis", async {
                conn.get::<_, Option<String>>(&key).await
            })
            .await;

        match &result {
            Ok(Some(_)) => debug!(code = %code, "found mapping in redis"),
            Ok(None) => trace!(code = %code, "no mapping in redis"),
            Err(e) => warn!(code = %code, error = %e, "redis error on get"),
        }
        result
    }
}
