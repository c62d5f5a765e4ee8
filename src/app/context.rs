use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{CachedFetcher, Fetcher, HttpFetcher, ParallelFetcher, ResponseCache};
use crate::progress::ProgressTracker;

pub struct AppContext {
    pub config: Config,
    pub cache: Option<ResponseCache>,
    pub fetcher: Arc<dyn Fetcher>,
    pub parallel_fetcher: ParallelFetcher,
    pub docs_url: Url,
    pub peps_url: Url,
    show_progress: bool,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let http: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.http)?);

        let (fetcher, cache) = if config.cache.enabled {
            let cache = ResponseCache::new(config.cache.resolve_dir()?, config.cache.ttl());
            let cached: Arc<dyn Fetcher> = Arc::new(CachedFetcher::new(http, cache.clone()));
            (cached, Some(cache))
        } else {
            (http, None)
        };

        Self::build(config, fetcher, cache, true)
    }

    /// Context around an arbitrary fetcher, without cache or progress bars.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        Self::build(config, fetcher, None, false)
    }

    fn build(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        cache: Option<ResponseCache>,
        show_progress: bool,
    ) -> Result<Self> {
        let docs_url = Url::parse(&config.urls.docs)?;
        let peps_url = Url::parse(&config.urls.peps)?;
        let parallel_fetcher = ParallelFetcher::with_workers(fetcher.clone(), config.http.workers);

        Ok(Self {
            config,
            cache,
            fetcher,
            parallel_fetcher,
            docs_url,
            peps_url,
            show_progress,
        })
    }

    /// Empty the response cache; returns the number of removed entries.
    pub fn clear_cache(&self) -> Result<usize> {
        match &self.cache {
            Some(cache) => Ok(cache.clear()?),
            None => Ok(0),
        }
    }

    pub async fn fetch_document(&self, url: &str) -> Result<Html> {
        let body = self.fetcher.fetch_text(url).await?;
        Ok(Html::parse_document(&body))
    }

    pub fn workers(&self) -> usize {
        self.parallel_fetcher.workers()
    }

    pub fn progress_items(&self, len: usize, msg: &str) -> ProgressTracker {
        if self.show_progress {
            ProgressTracker::items(len as u64, msg)
        } else {
            ProgressTracker::hidden()
        }
    }

    pub fn progress_bytes(&self, total: Option<u64>) -> ProgressTracker {
        if self.show_progress {
            ProgressTracker::bytes(total)
        } else {
            ProgressTracker::hidden()
        }
    }
}
