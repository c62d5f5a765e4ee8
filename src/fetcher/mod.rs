pub mod cache;
pub mod http_fetcher;
pub mod parallel;
pub mod retry;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

pub use cache::{CachedFetcher, ResponseCache};
pub use http_fetcher::HttpFetcher;
pub use parallel::ParallelFetcher;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Streaming response body
pub struct ByteStream {
    /// Value of the `Content-Length` header, if sent
    pub content_length: Option<u64>,
    pub chunks: BoxStream<'static, Result<Vec<u8>, FetchError>>,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body decoded as UTF-8.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// GET `url` and return the body as a stream of chunks.
    async fn open_stream(&self, url: &str) -> Result<ByteStream, FetchError>;
}
