mod cache;
mod client;
mod resolver;

pub use cache::GifCache;
pub use client::{GiphyClient, DEFAULT_BASE_URL};
pub use resolver::GifResolver;
