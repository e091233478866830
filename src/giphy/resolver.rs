use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use rand::seq::IndexedRandom;

use super::cache::GifCache;
use super::client::GiphyClient;
use crate::error::Result;

/// Returned when a search yields nothing usable.
pub const FALLBACK_URL: &str = "https://media.giphy.com/media/VbnUQpnihPSIgIXuZv/giphy.gif";

/// Giphy ids that are never posted.
pub const REJECTED_IDS: &[&str] = &["1JThPpN776F9e", "A0SDbHUTcClz2"];

/// Resolves a search term to one GIF URL, serving repeat terms from a
/// [`GifCache`] for the freshness window.
pub struct GifResolver {
    client: GiphyClient,
    cache: GifCache,
    rejected: HashSet<String>,
}

impl GifResolver {
    pub fn new(client: GiphyClient, cache: GifCache) -> Self {
        Self {
            client,
            cache,
            rejected: REJECTED_IDS.iter().map(|id| id.to_string()).collect(),
        }
    }

    pub async fn resolve(&self, term: &str, limit: u32) -> Result<String> {
        if let Some(urls) = self.cache.fresh(term).await {
            if let Some(url) = pick(&urls) {
                debug!("Cache hit for '{term}' ({} candidates)", urls.len());
                return Ok(url);
            }
        }

        let hits = self.client.search(term, limit).await?;
        let urls: Vec<String> = hits
            .into_iter()
            .filter(|hit| {
                let rejected = self.rejected.contains(&hit.id);
                if rejected {
                    debug!("Rejected GIF id {} ({})", hit.id, hit.url);
                }
                !rejected
            })
            .map(|hit| hit.url)
            .collect();

        let urls = self.cache.store(term, urls).await;
        let cached_terms = self.cache.len().await;
        debug!(
            "Cached {} candidates for '{term}' ({cached_terms} terms cached)",
            urls.len()
        );

        Ok(pick(&urls).unwrap_or_else(|| FALLBACK_URL.to_string()))
    }
}

fn pick(urls: &Arc<[String]>) -> Option<String> {
    urls.choose(&mut rand::rng()).cloned()
}
