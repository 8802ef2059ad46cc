use async_trait::async_trait;
use dashmap::DashMap;
use wormhole_core::store::{Result, UrlStore};
use wormhole_core::ShortCode;

/// In-memory implementation of [`UrlStore`] using DashMap.
///
/// Useful for single-process runs and tests. Nodes in separate processes do
/// not share it, so a real cluster needs [`RedisUrlStore`][crate::RedisUrlStore].
#[derive(Debug, Default)]
pub struct InMemoryUrlStore {
    storage: DashMap<String, String>,
}

impl InMemoryUrlStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        self.storage.insert(code.as_str().to_owned(), url.to_owned());
        Ok(())
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.clone()))
    }
}
