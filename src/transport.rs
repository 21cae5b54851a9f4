use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

use crate::config::HttpConfig;

/// Transport-level failures. These never leave a fetcher; they are logged
/// and turned into "no thumbnail".
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failure reported by an `HttpTransport` that is not backed by reqwest.
    #[error("transport error: {0}")]
    Other(String),
}

/// Response of a JSON GET. `body` is `Value::Null` unless `ok` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub ok: bool,
    pub body: Value,
}

impl JsonResponse {
    pub fn not_ok() -> Self {
        JsonResponse {
            ok: false,
            body: Value::Null,
        }
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Existence probe. Returns whether the status was 2xx.
    async fn head(&self, url: &str) -> Result<bool, FetchError>;

    /// GET with `Accept: application/json`, body parsed only on 2xx.
    async fn get_json(&self, url: &str) -> Result<JsonResponse, FetchError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(10))
            .build()?;

        Ok(ReqwestTransport { client })
    }
}

fn iden(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => format!("{}{}", parsed.host_str().unwrap_or_default(), parsed.path()),
        Err(_) => url.to_string(),
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn head(&self, url: &str) -> Result<bool, FetchError> {
        let iden = iden(url);
        log::debug!("{iden}: HEAD");

        let resp = self.client.head(url).send().await?;
        let status = resp.status();
        log::debug!("{iden}: status {status}");

        Ok(status.is_success())
    }

    async fn get_json(&self, url: &str) -> Result<JsonResponse, FetchError> {
        let iden = iden(url);
        log::debug!("{iden}: GET");

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            log::debug!("{iden}: status {status}");
            return Ok(JsonResponse::not_ok());
        }

        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        Ok(JsonResponse { ok: true, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iden_strips_query() {
        assert_eq!(
            iden("https://vimeo.com/api/oembed.json?url=abc"),
            "vimeo.com/api/oembed.json"
        );
        assert_eq!(iden("not a url"), "not a url");
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let transport = ReqwestTransport::new(&HttpConfig::default());
        assert!(transport.is_ok());
    }
}
