use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};
use crate::decoder::decode;
use crate::error::{CrawlError, Result};
use crate::fetch::Fetcher;
use crate::runtime::config::CrawlerConfig;
use crate::runtime::node::Node;

enum Reply {
    Body(String),
    Unavailable(StatusCode),
}

/// Fetches nodes over HTTP from paths relative to a fixed base address.
/// One pooled client is shared by every task of a traversal.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, &CrawlerConfig::default())
    }

    pub fn with_config(base_url: &str, config: &CrawlerConfig) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| CrawlError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            // a redirect is a non-200 answer like any other
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            base,
            max_retries: config.max_retries,
        })
    }

    /// One GET attempt. Transport errors, body reads included, come back as `Err`.
    async fn get(&self, url: &Url) -> std::result::Result<Reply, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(Reply::Unavailable(status));
        }
        response.text().await.map(Reply::Body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Option<Node> {
        let url = match self.base.join(path) {
            Ok(url) => url,
            Err(e) => {
                warn!(path, error = %e, "Cannot resolve path against base url");
                return None;
            }
        };

        let mut attempt = 0;
        loop {
            match self.get(&url).await {
                Ok(Reply::Body(body)) => {
                    debug!(%url, attempt, bytes = body.len(), "Fetched node");
                    return Some(decode(&body));
                }
                Ok(Reply::Unavailable(status)) => {
                    warn!(%url, %status, "Resource unavailable");
                    return None;
                }
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!(%url, attempt, error = %e, "Transport failure, retrying");
                }
                Err(e) => {
                    warn!(%url, attempts = attempt + 1, error = %e, "Giving up on resource");
                    return None;
                }
            }
        }
    }
}
