use std::sync::Arc;

use tracing::{debug, info};
use typed_builder::TypedBuilder;
use wormhole_core::{generate, ShortCode, UrlStore};
use wormhole_dispatcher::Dispatcher;

use crate::error::{FrontendError, Result};

/// The public entry point of the cluster.
///
/// Shorten requests are handed to the [`Dispatcher`], which forwards each of
/// them to one worker node. Redirects are served straight from the shared
/// store. This is the only place in the system that dispatches.
#[derive(TypedBuilder)]
pub struct FrontendService {
    dispatcher: Dispatcher,
    store: Arc<dyn UrlStore>,
    /// Public base URL the canonical short URLs are built on.
    #[builder(setter(into))]
    base_url: String,
}

impl FrontendService {
    /// Shortens `url` through one worker node and returns the canonical
    /// short URL.
    ///
    /// The returned URL is built from a code computed locally; the worker's
    /// answer must match it, otherwise the stored key and the URL given to
    /// the client would disagree.
    pub async fn shorten(&self, url: &str) -> Result<String> {
        if url.is_empty() {
            return Err(FrontendError::InvalidInput(
                "Missing 'url' parameter".to_string(),
            ));
        }
        debug!("shorten request validated");

        let stored = self.dispatcher.shorten(url).await?;
        debug!(code = %stored, "worker persisted mapping");

        let canonical = generate(url);
        if stored != canonical {
            return Err(FrontendError::CodeMismatch {
                expected: canonical.to_string(),
                stored: stored.to_string(),
            });
        }

        let short_url = canonical.to_url(&self.base_url);
        info!(code = %canonical, short_url = %short_url, "shortened url");
        Ok(short_url)
    }

    /// Looks up the redirect target for `code`.
    ///
    /// Codes that are not well formed can never have been stored and are
    /// reported as not found without a store round-trip.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        let Ok(code) = ShortCode::parse(code) else {
            return Err(FrontendError::NotFound(code.to_string()));
        };

        match self.store.get(&code).await? {
            Some(url) => {
                let target = normalize_redirect(&url);
                debug!(code = %code, target = %target, "resolved short code");
                Ok(target)
            }
            None => Err(FrontendError::NotFound(code.to_string())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Prefixes `http://` unless the URL already starts with `http://` or
/// `https://` (ASCII case-insensitive).
pub fn normalize_redirect(url: &str) -> String {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_scheme {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
