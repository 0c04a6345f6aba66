//! Pluggable networking traits.
//!
//! The aggregation layer talks to the backend only through these, so tests
//! and alternative transports can stand in for HTTP.

use std::future::Future;
use std::pin::Pin;

use crate::models::types::FetchError;

/// Fetch the raw body of a backend resource.
///
/// `path` is relative to the API root and may carry a query string, e.g.
/// `pipelines?page=0&size=100`.
pub trait DataFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>>;
}
