use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, Response};
use url::Url;

use crate::config::{HttpConfig, RetryConfig};
use crate::fetcher::retry::with_retry;
use crate::fetcher::{ByteStream, FetchError, Fetcher};

pub struct HttpFetcher {
    client: Client,
    retry: RetryConfig,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            retry: config.retry.clone(),
        })
    }

    async fn send(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.send(url).await?;
        let body = response.bytes().await.map_err(|e| transport(url, e))?;
        // Pages are UTF-8 whatever the declared charset says
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_url(url)?;
        tracing::debug!(%url, "GET");
        with_retry(&self.retry, || self.get_text(&url)).await
    }

    async fn open_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        let url = parse_url(url)?;
        tracing::debug!(%url, "GET (stream)");
        let response = with_retry(&self.retry, || self.send(&url)).await?;

        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let chunks = futures::stream::try_unfold(response, move |mut response| {
            let url = url.clone();
            async move {
                match response.chunk().await {
                    Ok(Some(chunk)) => Ok(Some((chunk.to_vec(), response))),
                    Ok(None) => Ok(None),
                    Err(e) => Err(transport(&url, e)),
                }
            }
        })
        .boxed();

        Ok(ByteStream {
            content_length,
            chunks,
        })
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        source: e,
    })
}

fn transport(url: &Url, source: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        source,
    }
}
