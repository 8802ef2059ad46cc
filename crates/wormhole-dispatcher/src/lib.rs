//! Round-robin dispatch of shorten requests to worker nodes.
//!
//! The gateway owns one [`Dispatcher`]. It holds the fixed
//! [`ClusterTopology`] and forwards every shorten request to exactly one
//! node through a [`NodeClient`], normally the [`HttpNodeClient`].

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod topology;

pub use client::{HttpNodeClient, HttpNodeClientSettings, NodeClient};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, TopologyError};
pub use topology::{ClusterTopology, NodeAddress};
