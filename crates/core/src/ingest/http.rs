use crate::ingest::error::{Upstream, UpstreamError};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_RETRIES: u32 = 3;

/// Timeout and attempt budget shared by the Naver clients.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub timeout: Duration,
    pub retries: u32,
}

impl TransportOptions {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("NAVER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("NAVER_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES)
            .max(1);

        Self {
            timeout: Duration::from_secs(timeout_secs),
            retries,
        }
    }

    pub fn build_client(&self, what: &str) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .with_context(|| format!("failed to build {what} http client"))
    }
}

/// Sends a request, retrying network errors, 429 and 5xx with exponential backoff.
/// `build` is called once per attempt so signed headers can be refreshed.
pub(crate) async fn send_with_retry<F>(api: Upstream, retries: u32, mut build: F) -> Result<String>
where
    F: FnMut() -> Result<reqwest::RequestBuilder>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let backoff = Duration::from_secs(1 << (attempt - 1).min(5));

        let res = match build()?.send().await {
            Ok(r) => r,
            Err(err) => {
                if attempt >= retries {
                    return Err(err).with_context(|| format!("{} request failed", api.name()));
                }
                tracing::warn!(attempt, ?backoff, api = api.name(), error = %err, "request failed; retrying");
                tokio::time::sleep(backoff).await;
                continue;
            }
        };

        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("failed to read {} response", api.name()))?;

        if status.is_success() {
            return Ok(text);
        }

        let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
        if retryable && attempt < retries {
            tracing::warn!(attempt, ?backoff, api = api.name(), http_status = %status, "HTTP error; retrying");
            tokio::time::sleep(backoff).await;
            continue;
        }
        return Err(UpstreamError::http(api, status.as_u16(), text).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers connection N with `responses[N]`, repeating the last one.
    async fn stub_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status} STUB\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{addr}/"), hits)
    }

    fn client() -> reqwest::Client {
        TransportOptions {
            timeout: Duration::from_secs(10),
            retries: 2,
        }
        .build_client("test")
        .unwrap()
    }

    #[tokio::test]
    async fn server_error_is_retried_until_success() {
        let (url, hits) = stub_server(vec![(503, "busy"), (200, "ok")]).await;
        let http = client();

        let text = send_with_retry(Upstream::DataLab, 2, || Ok(http.get(&url)))
            .await
            .unwrap();
        assert_eq!(text, "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn client_error_fails_without_retry() {
        let (url, hits) = stub_server(vec![(400, "bad hint"), (200, "ok")]).await;
        let http = client();

        let err = send_with_retry(Upstream::SearchAd, 2, || Ok(http.get(&url)))
            .await
            .unwrap_err();
        let upstream = err.downcast_ref::<UpstreamError>().unwrap();
        assert_eq!(upstream.api, Upstream::SearchAd);
        assert_eq!(upstream.status, Some(400));
        assert_eq!(upstream.body.as_deref(), Some("bad hint"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rate_limit_gives_up_after_the_attempt_budget() {
        let (url, hits) = stub_server(vec![(429, "slow down")]).await;
        let http = client();

        let err = send_with_retry(Upstream::BlogSearch, 2, || Ok(http.get(&url)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Search API error (429): slow down");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
