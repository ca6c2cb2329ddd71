//! HTTP transport for feed documents

use async_trait::async_trait;
use serde_json::Value;

use super::FetchError;
use crate::config::FeedConfig;

/// Fetches a JSON document by URL.
///
/// The poll loop only depends on this trait, so tests and alternative
/// transports can stand in for the network.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// GET `url` and parse the body as JSON.
    ///
    /// Non-2xx statuses, timeouts, and unparseable bodies are errors.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a client honouring the feed timeout and user agent.
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
