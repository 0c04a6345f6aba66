//! Errors raised while aggregating infrastructure from the backend.

use hydromap_network::models::types::{FetchError, NetworkError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Transport, timeout, HTTP status or URL failure of one request
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not build HTTP client: {0}")]
    Client(String),

    #[error("Aggregation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
