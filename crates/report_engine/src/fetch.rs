use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use report_logging::report_debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Response};

use crate::types::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// User-Agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; titles-extractor/1.0)";

/// Network limits and identification for the page fetch.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetches one page. The pipeline only ever needs a single GET.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// [`Fetcher`] over a per-request reqwest client.
///
/// The client is rebuilt per fetch because the redirect policy carries the
/// hop counter that ends up in [`FetchMetadata::redirect_count`].
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let redirects = Arc::new(AtomicUsize::new(0));
        let client = reqwest::Client::builder()
            .user_agent(&self.settings.user_agent)
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(counting_policy(
                self.settings.redirect_limit,
                redirects.clone(),
            ))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        report_debug!("fetching {url}");
        let response = client.get(parsed).send().await.map_err(classify)?;
        self.gate(&response)?;

        let final_url = response.url().to_string();
        let content_type = declared_content_type(&response);
        let bytes = self.read_capped(response).await?;
        report_debug!("downloaded {} bytes from {final_url}", bytes.len());

        let byte_len = bytes.len() as u64;
        Ok(FetchOutput {
            bytes,
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                redirect_count: redirects.load(Ordering::Relaxed),
                content_type,
                byte_len,
            },
        })
    }
}

impl ReqwestFetcher {
    /// Reject a response up front on status, declared size or media type.
    fn gate(&self, response: &Response) -> Result<(), FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(declared) = response.content_length() {
            if declared > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(declared),
                    },
                    "declared length over the cap",
                ));
            }
        }

        if let Some(ct) = declared_content_type(response) {
            let essence = ct.split(';').next().unwrap_or(ct.as_str()).trim();
            let allowed = self
                .settings
                .allowed_content_types
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(essence));
            if !allowed {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType { content_type: ct },
                    "unsupported content type",
                ));
            }
        }

        Ok(())
    }

    /// Stream the body so the byte cap holds even when Content-Length lies.
    async fn read_capped(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(classify)?;
            let total = bytes.len() as u64 + chunk.len() as u64;
            if total > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(total),
                    },
                    "body ran over the cap",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

/// Redirect policy that follows up to `limit` hops and records how many.
fn counting_policy(limit: usize, counter: Arc<AtomicUsize>) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        let hops = attempt.previous().len();
        counter.store(hops, Ordering::Relaxed);
        if hops >= limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    })
}

fn declared_content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::new(FailureKind::Timeout, err.to_string())
    } else if err.is_redirect() {
        FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string())
    } else {
        FetchError::new(FailureKind::Network, err.to_string())
    }
}
