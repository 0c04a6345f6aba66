//! reqwest-backed [`DataFetcher`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use hydromap_network::models::types::FetchError;
use hydromap_network::network::DataFetcher;
use reqwest::{Client, Url};
use tracing::trace;

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};

/// Fetches backend resources over HTTP(S) relative to one base URL.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Client(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url_for(&self, path: &str) -> std::result::Result<Url, FetchError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| FetchError::InvalidUrl {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn get(&self, path: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let url = self.url_for(path)?;
        trace!(%url, "GET");

        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout {
                    path: path.to_string(),
                }
            } else {
                FetchError::Transport {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}

impl DataFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<Vec<u8>, FetchError>> + Send + 'a>> {
        Box::pin(self.get(path))
    }
}
