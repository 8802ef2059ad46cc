//! Public gateway of the Wormhole URL shortener.
//!
//! The gateway exposes `POST /shorten` and `GET /{code}` to clients. Shorten
//! requests go through the round-robin [`Dispatcher`][wormhole_dispatcher::Dispatcher]
//! to one worker node; redirects read the shared store directly.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod service;
pub mod state;

pub use app::App;
pub use error::FrontendError;
pub use service::{normalize_redirect, FrontendService};
pub use state::AppState;
