use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::auth::Token;
use crate::error::{RelayError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com";

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifHit {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: String,
    images: Images,
}

#[derive(Debug, Deserialize)]
struct Images {
    original: Rendition,
}

#[derive(Debug, Deserialize)]
struct Rendition {
    url: String,
}

/// Client for the Giphy search endpoint.
pub struct GiphyClient {
    client: Client,
    search_url: Url,
    api_key: Token,
}

impl GiphyClient {
    pub fn new(base_url: &str, api_key: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cirelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to create HTTP client: {e}")))?;

        let search_url = Url::parse(base_url)
            .and_then(|base| base.join("v1/gifs/search"))
            .map_err(|e| RelayError::Config(format!("Invalid Giphy URL: {e}")))?;

        Ok(Self {
            client,
            search_url,
            api_key,
        })
    }

    /// Up to `limit` hits for `term`, in relevance order.
    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<GifHit>> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", self.api_key.as_str())
            .append_pair("q", term)
            .append_pair("limit", &limit.to_string());

        debug!("Searching Giphy for '{term}' (limit {limit})");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RelayError::status(status));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::ApiShape(format!("failed to parse Giphy response: {e}")))?;

        Ok(parsed
            .data
            .into_iter()
            .map(|item| GifHit {
                id: item.id,
                url: item.images.original.url,
            })
            .collect())
    }
}
