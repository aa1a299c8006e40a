//! Retrying HTTP fetcher shared by every upstream source

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT},
    Client, Response,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Result, TrackerError};


pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_millis(1000);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Browser-like headers that reduce upstream bot blocking.
///
/// Accept-Encoding is left to reqwest so that it only advertises codecs it can decode.
pub fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    h.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    h.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    h
}

/// Timing knobs for the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Backoff before retry `n` is `n * backoff_unit`.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}

/// Per-call overrides.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Merged over [`browser_headers`]; entries here win.
    pub headers: HeaderMap,
    /// When set, the request is a POST carrying this JSON body.
    pub json_body: Option<Value>,
    pub max_attempts: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            json_body: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl FetchOptions {
    /// Options for JSON endpoints (`Accept: application/json`).
    pub fn json() -> Self {
        let mut opts = Self::default();
        opts.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        opts
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Suspends between attempts. Injected so tests can observe backoff.
#[async_trait]
pub trait Sleeper: Send + Sync + fmt::Debug {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded-retry HTTP client.
///
/// Never classifies failures: callers receive either the raw transport error or a
/// [`TrackerError::Status`] and decide what it means at their own boundary.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Fetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            policy,
            sleeper,
        })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Issue the request, retrying 5xx responses and transport errors.
    ///
    /// Performs at most `options.max_attempts` attempts (minimum one). A 4xx is
    /// returned as an error immediately; the first response below 400 is returned
    /// as-is.
    pub async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<Response> {
        let max_attempts = options.max_attempts.max(1);
        let mut headers = browser_headers();
        headers.extend(options.headers.clone());

        let mut attempt = 1;
        loop {
            let builder = match &options.json_body {
                Some(body) => self.client.post(url).json(body),
                None => self.client.get(url),
            };

            debug!(url, attempt, max_attempts, "fetching");
            let outcome = builder
                .headers(headers.clone())
                .timeout(self.policy.timeout)
                .send()
                .await;
            let remaining = attempt < max_attempts;

            match outcome {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if status < 400 {
                        return Ok(response);
                    }
                    let err = TrackerError::Status {
                        status,
                        url: url.to_string(),
                    };
                    if status < 500 || !remaining {
                        return Err(err);
                    }
                    warn!(url, attempt, status, "upstream server error, retrying");
                }
                Err(e) => {
                    if !remaining {
                        return Err(TrackerError::Http(e));
                    }
                    warn!(url, attempt, error = %e, "request failed, retrying");
                }
            }

            self.sleeper.sleep(self.policy.backoff_for(attempt)).await;
            attempt += 1;
        }
    }

    /// Fetch and read the body as text.
    pub async fn fetch_text(&self, url: &str, options: &FetchOptions) -> Result<String> {
        Ok(self.fetch(url, options).await?.text().await?)
    }

    /// Fetch and decode the body as JSON.
    pub async fn fetch_json(&self, url: &str, options: &FetchOptions) -> Result<Value> {
        let body = self.fetch_text(url, options).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
