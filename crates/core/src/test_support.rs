//! In-memory backend for tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use hydromap_network::models::types::FetchError;
use hydromap_network::network::DataFetcher;

#[derive(Clone, Debug)]
pub enum FakeResponse {
    Body(String),
    Status(u16),
    Transport(String),
}

/// Serves canned responses by exact request path and records every request.
/// Unknown paths answer 404.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FakeResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: serde_json::Value) -> Self {
        self.responses
            .insert(path.to_string(), FakeResponse::Body(body.to_string()));
        self
    }

    pub fn with_body(mut self, path: &str, body: &str) -> Self {
        self.responses
            .insert(path.to_string(), FakeResponse::Body(body.to_string()));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.responses
            .insert(path.to_string(), FakeResponse::Status(status));
        self
    }

    pub fn with_transport_error(mut self, path: &str, message: &str) -> Self {
        self.responses
            .insert(path.to_string(), FakeResponse::Transport(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|path| path.starts_with(prefix))
            .count()
    }

    fn respond(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push(path.to_string());

        match self.responses.get(path) {
            Some(FakeResponse::Body(body)) => Ok(body.clone().into_bytes()),
            Some(FakeResponse::Status(status)) => Err(FetchError::Status {
                path: path.to_string(),
                status: *status,
            }),
            Some(FakeResponse::Transport(message)) => Err(FetchError::Transport {
                path: path.to_string(),
                message: message.clone(),
            }),
            None => Err(FetchError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}

impl DataFetcher for FakeFetcher {
    fn fetch<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>> {
        let result = self.respond(path);
        Box::pin(async move { result })
    }
}

/// Never answers; used to observe cancellation.
pub struct PendingFetcher;

impl DataFetcher for PendingFetcher {
    fn fetch<'a>(
        &'a self,
        _path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>> {
        Box::pin(std::future::pending())
    }
}
