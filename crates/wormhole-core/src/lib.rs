//! Core types and traits for the Wormhole URL shortener.
//!
//! This crate provides the pieces shared by the gateway and the worker
//! nodes: the short code type, the deterministic code generator and the
//! contract of the shared mapping store.

pub mod codegen;
pub mod error;
pub mod shortcode;
pub mod store;

pub use codegen::generate;
pub use error::{CoreError, StoreError};
pub use shortcode::{extract_code, ShortCode};
pub use store::UrlStore;
