use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first one included.
    pub attempts: u32,
    pub backoff: Duration,
    /// Per attempt, connect included. An elapsed timeout is a transport
    /// failure and is retried like one.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(500),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay after the `failed`-th failure (0-based): backoff, 2x, 4x, ...
    pub fn delay_for(&self, failed: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(failed))
    }
}

/// MyQuran wraps every payload as `{ "status": true, "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(retry: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(retry.timeout)
            .connect_timeout(retry.timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                context: "Gagal menyiapkan koneksi".to_string(),
                source,
            })?;
        Ok(Self { client, retry })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T> {
        let body = self.get_text(url, context).await?;
        decode(&body, context)
    }

    /// GET with retry on transport failures (timeouts included) and 5xx. 4xx
    /// comes back at once.
    pub async fn get_text(&self, url: &str, context: &str) -> Result<String> {
        let attempts = self.retry.attempts.max(1);
        let mut failed = 0;
        loop {
            match self.get_once(url, context).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() && failed + 1 < attempts => {
                    let delay = self.retry.delay_for(failed);
                    warn!(url, attempt = failed + 1, ?delay, error = %err, "request failed, retrying");
                    sleep(delay).await;
                    failed += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once(&self, url: &str, context: &str) -> Result<String> {
        debug!(url, "GET");
        let transport = |source| ApiError::Transport {
            context: context.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        if !status.is_success() {
            debug!(url, %status, body = %text, "non-success response");
            return Err(ApiError::Status {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(text)
    }
}

/// `base_url` with `segments` appended, each percent-encoded as a single
/// path segment.
pub fn endpoint_url(base_url: &str, segments: &[&str], context: &str) -> Result<String> {
    let mut url = Url::parse(base_url).map_err(|e| ApiError::malformed(context, e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::malformed(context, base_url))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

pub fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        context: context.to_string(),
        body: body.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy {
            attempts: 4,
            backoff: Duration::from_millis(100),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn endpoint_segments_cannot_escape_the_path() {
        let url = endpoint_url(
            "https://alanwarpakijangan.com/api/",
            &["articles", "../admin?page=2#x"],
            "Gagal mengambil detail artikel",
        )
        .unwrap();
        assert_eq!(url, "https://alanwarpakijangan.com/api/articles/..%2Fadmin%3Fpage=2%23x");
    }

    #[test]
    fn unparseable_base_is_malformed() {
        let err = endpoint_url("not a url", &["doa"], "Gagal mengambil doa").unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }));
    }

    #[test]
    fn decode_keeps_raw_body() {
        let err = decode::<Envelope<Vec<String>>>("<html>502</html>", "Gagal mengambil sumber doa")
            .unwrap_err();
        match err {
            ApiError::Decode { body, context, .. } => {
                assert_eq!(body, "<html>502</html>");
                assert_eq!(context, "Gagal mengambil sumber doa");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
