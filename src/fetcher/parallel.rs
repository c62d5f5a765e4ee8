use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;

use crate::fetcher::{FetchError, Fetcher};
use crate::progress::ProgressTracker;

pub const DEFAULT_WORKERS: usize = 4;

/// Fetches independent pages with bounded concurrency.
///
/// Results come back in input order regardless of completion order, so
/// downstream tallies match a sequential run.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher>, workers: usize) -> Self {
        Self {
            fetcher,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `op` over `items` with at most `workers` in flight, collecting
    /// outputs in input order.
    pub async fn map_ordered<I, O, F, Fut>(
        &self,
        items: Vec<I>,
        progress: &ProgressTracker,
        op: F,
    ) -> Vec<O>
    where
        F: Fn(Arc<dyn Fetcher>, I) -> Fut,
        Fut: Future<Output = O>,
    {
        futures::stream::iter(items)
            .map(|item| op(self.fetcher.clone(), item))
            .buffered(self.workers)
            .inspect(|_| progress.inc(1))
            .collect()
            .await
    }

    pub async fn fetch_all(
        &self,
        urls: Vec<String>,
        progress: &ProgressTracker,
    ) -> Vec<(String, Result<String, FetchError>)> {
        self.map_ordered(urls, progress, |fetcher, url| async move {
            let result = fetcher.fetch_text(&url).await;
            (url, result)
        })
        .await
    }
}
