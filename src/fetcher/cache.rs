//! On-disk cache of fetched pages.
//!
//! Each entry is a JSON file named by the SHA-256 of its URL. Only page
//! bodies fetched with [`Fetcher::fetch_text`] are cached; download streams
//! always go to the network.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::fetcher::{ByteStream, FetchError, Fetcher};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: String,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Option<Duration>,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file name for `url`
    pub fn key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::key(url)))
    }

    /// Cached body for `url`. Missing, unreadable and expired entries are misses.
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        let content = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Ignoring corrupt cache entry: {}", e);
                return None;
            }
        };

        if entry.url != url {
            return None;
        }

        if let Some(ttl) = self.ttl {
            let age = Utc::now().signed_duration_since(entry.fetched_at);
            if age.to_std().is_ok_and(|age| age > ttl) {
                tracing::debug!(url, "Cache entry expired");
                return None;
            }
        }

        Some(entry.body)
    }

    pub fn put(&self, url: &str, body: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body: body.to_string(),
        };
        let json = serde_json::to_string(&entry).map_err(io::Error::other)?;
        fs::write(self.entry_path(url), json)
    }

    /// Remove every cached entry, returning how many were removed.
    pub fn clear(&self) -> io::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// [`Fetcher`] that serves pages from a [`ResponseCache`] when it can.
pub struct CachedFetcher {
    inner: Arc<dyn Fetcher>,
    cache: ResponseCache,
}

impl CachedFetcher {
    pub fn new(inner: Arc<dyn Fetcher>, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl Fetcher for CachedFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.cache.get(url) {
            tracing::debug!(url, "Cache hit");
            return Ok(body);
        }

        let body = self.inner.fetch_text(url).await?;
        if let Err(e) = self.cache.put(url, &body) {
            tracing::warn!(url, "Failed to cache response: {}", e);
        }
        Ok(body)
    }

    async fn open_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        self.inner.open_stream(url).await
    }
}
