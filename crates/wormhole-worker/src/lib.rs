//! Worker node of the Wormhole cluster.
//!
//! A worker receives shorten requests forwarded by the gateway, derives the
//! short code and writes the mapping to the shared store. This crate has no
//! dispatch capability of its own: nothing here can forward a request to
//! another node.

pub mod error;
pub mod http;
pub mod service;

pub use error::WorkerError;
pub use service::WorkerNode;
