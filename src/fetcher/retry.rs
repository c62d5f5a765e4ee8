//! Retry logic with exponential backoff
//!
//! Every request made by [`HttpFetcher`](super::HttpFetcher) goes through
//! [`with_retry`], so all modes share one policy configured under
//! `[http.retry]`.

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::fetcher::FetchError;

/// Whether a failed request is worth another attempt under `config`.
///
/// Timeouts, connection failures and the configured server error statuses
/// are transient. Everything else (4xx, malformed URLs, body decoding) is not.
pub fn is_retryable(error: &FetchError, config: &RetryConfig) -> bool {
    match error {
        FetchError::Transport { source, .. } => source.is_timeout() || source.is_connect(),
        FetchError::Status { status, .. } => config.retry_statuses.contains(status),
        FetchError::InvalidUrl { .. } => false,
    }
}

/// Run `operation` until it succeeds, fails permanently, or
/// `config.max_attempts` retries are used up.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, mut operation: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay();

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if is_retryable(&e, config) && attempt < config.max_attempts => {
                attempt += 1;

                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying"
                );

                tokio::time::sleep(delay).await;
                delay = next_delay(delay, config);
            }
            Err(e) => {
                if is_retryable(&e, config) {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "Request failed after all retry attempts exhausted"
                    );
                }
                return Err(e);
            }
        }
    }
}

/// Next backoff delay, capped at `max_delay`. Multipliers that give a
/// negative, non-finite or overflowing delay fall back to the cap.
fn next_delay(delay: Duration, config: &RetryConfig) -> Duration {
    Duration::try_from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier)
        .map_or(config.max_delay(), |next| next.min(config.max_delay()))
}
