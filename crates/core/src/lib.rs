//! # hydromap-core
//!
//! Async aggregation of the pipeline network from the operations backend.
//!
//! [`InfrastructureService`] lists every station, terminal, production field
//! and pipeline, then resolves each pipeline's path through its segments or
//! reference points. The result is a
//! [`hydromap_network::dataset::InfrastructureDataset`] ready for filtering
//! and rendering.

pub mod assembler;
pub mod config;
pub mod error;
pub mod http;
pub mod pagination;
pub mod resolver;
pub mod service;

#[cfg(test)]
mod test_support;

pub use config::{CoreConfig, EndpointConfig};
pub use error::{CoreError, Result};
pub use http::HttpFetcher;
pub use pagination::fetch_all;
pub use resolver::{ReferenceResolver, SourceKind};
pub use service::InfrastructureService;

// Re-export the domain crate
pub use hydromap_network as network;
