//! Paginated list aggregation.
//!
//! List endpoints answer either with a page envelope or, on older
//! deployments, with a bare JSON array holding the whole collection. Both
//! shapes are folded into one `Vec` here and nowhere else.

use hydromap_network::network::DataFetcher;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub last: Option<bool>,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl<T> PageEnvelope<T> {
    /// Whether no page follows this one.
    ///
    /// `last` wins when present, then `totalPages`. With neither, a short or
    /// empty page ends the listing.
    pub fn is_final(&self, requested: u64, page_size: usize) -> bool {
        if self.content.is_empty() {
            return true;
        }
        if let Some(last) = self.last {
            return last;
        }
        match self.total_pages {
            Some(total) => self.number.unwrap_or(requested) + 1 >= total,
            None => self.content.len() < page_size,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageResponse<T> {
    Page(PageEnvelope<T>),
    Bare(Vec<T>),
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| CoreError::Decode {
        path: path.to_string(),
        source,
    })
}

fn page_path(endpoint: &str, page: u64, size: usize) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}page={page}&size={size}")
}

/// Every item of a paginated list endpoint, in server order.
///
/// Pages are requested sequentially from 0. Any failed page fails the whole
/// call; partial listings are never returned.
pub async fn fetch_all<T>(
    fetcher: &dyn DataFetcher,
    endpoint: &str,
    page_size: usize,
) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send,
{
    let page_size = page_size.max(1);
    let mut items = Vec::new();
    let mut page = 0u64;

    loop {
        let path = page_path(endpoint, page, page_size);
        let body = fetcher.fetch(&path).await?;

        match decode::<PageResponse<T>>(&path, &body)? {
            PageResponse::Bare(all) => {
                debug!(endpoint, count = all.len(), "Bare list response");
                items.extend(all);
                break;
            }
            PageResponse::Page(envelope) => {
                let done = envelope.is_final(page, page_size);
                debug!(
                    endpoint,
                    page,
                    count = envelope.content.len(),
                    total = ?envelope.total_elements,
                    "Fetched page"
                );
                items.extend(envelope.content);
                if done {
                    break;
                }
                page += 1;
            }
        }
    }

    Ok(items)
}
