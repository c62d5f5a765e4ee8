//! In-memory [`Fetcher`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;

use crate::fetcher::{ByteStream, FetchError, Fetcher};

#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    files: HashMap<String, (Vec<u8>, Option<u64>)>,
    requests: Mutex<HashMap<String, usize>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Serve `body` as a stream, advertising `content_length`.
    pub fn with_file(mut self, url: &str, body: Vec<u8>, content_length: Option<u64>) -> Self {
        self.files.insert(url.to_string(), (body, content_length));
        self
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    fn record(&self, url: &str) {
        *self.requests.lock().unwrap().entry(url.to_string()).or_default() += 1;
    }

    fn not_found(url: &str) -> FetchError {
        FetchError::Status {
            url: url.to_string(),
            status: 404,
        }
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.record(url);
        self.pages.get(url).cloned().ok_or_else(|| Self::not_found(url))
    }

    async fn open_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        self.record(url);
        let (body, content_length) = self.files.get(url).cloned().ok_or_else(|| Self::not_found(url))?;
        let chunks: Vec<Result<Vec<u8>, FetchError>> =
            body.chunks(300).map(|c| Ok(c.to_vec())).collect();

        Ok(ByteStream {
            content_length,
            chunks: futures::stream::iter(chunks).boxed(),
        })
    }
}
