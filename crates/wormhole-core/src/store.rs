use crate::error::StoreError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The shared key-value store holding code → URL mappings.
///
/// Every node in the cluster talks to the same store, so a mapping written
/// by any worker is visible to the gateway's redirect path as soon as
/// [`put`](UrlStore::put) returns.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Writes the mapping for `code`, replacing any previous value.
    ///
    /// Returns only once the write is acknowledged by the backend.
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()>;

    /// Looks up the URL stored under `code`.
    ///
    /// Returns `Ok(None)` only when the backend reports the key as missing.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;
}

#[async_trait]
impl<S: UrlStore + ?Sized> UrlStore for std::sync::Arc<S> {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        (**self).put(code, url).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).get(code).await
    }
}
