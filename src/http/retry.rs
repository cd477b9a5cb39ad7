//! Caller-side retries.
//!
//! `CoinGeckoHttp` and every `MarketDataFetcher` issue exactly one request per
//! call. Hosts that want backoff wrap the call in [`with_retry`].

use crate::error::{HttpError, SdkError};
use std::future::Future;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Surface the first failure as-is.
    #[default]
    None,
    /// Retry on connect/timeout failures and 429/502/503/504 with exponential backoff.
    Idempotent,
    /// Caller-provided backoff.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add ±25% jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// The public API rate-limits aggressively, so 429 is retried with a longer base delay.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    /// How long to wait before retrying `err`, or `None` if it is not retryable.
    ///
    /// A rate limit waits for the longer of `Retry-After` and the backoff, capped at `max_delay`.
    pub fn retry_delay(&self, err: &SdkError, attempt: u32) -> Option<Duration> {
        let SdkError::Http(http) = err else {
            return None;
        };
        let backoff = self.delay_for_attempt(attempt);
        match http {
            HttpError::ServerError { status, .. } => {
                self.retryable_statuses.contains(status).then_some(backoff)
            }
            HttpError::RateLimited { retry_after_ms } => {
                if !self.retryable_statuses.contains(&429) {
                    return None;
                }
                let hinted = retry_after_ms.map(Duration::from_millis).unwrap_or_default();
                Some(hinted.max(backoff).min(self.max_delay))
            }
            HttpError::Timeout => Some(backoff),
            #[cfg(not(target_arch = "wasm32"))]
            HttpError::Reqwest(e) if e.is_connect() || e.is_timeout() => Some(backoff),
            #[cfg(target_arch = "wasm32")]
            HttpError::Reqwest(e) if e.is_timeout() || e.is_request() => Some(backoff),
            _ => None,
        }
    }
}

impl RetryPolicy {
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Run `op`, retrying retryable failures under `policy`.
///
/// Non-retryable errors come back unchanged. Once `max_retries` retries have
/// failed, the result is `HttpError::MaxRetriesExceeded` carrying the last error.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, SdkError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SdkError>>,
{
    let Some(config) = policy.config() else {
        return op().await;
    };

    let mut attempt = 0;
    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        let Some(delay) = config.retry_delay(&err, attempt) else {
            return Err(err);
        };
        if attempt >= config.max_retries {
            return Err(HttpError::MaxRetriesExceeded {
                attempts: attempt + 1,
                last_error: err.to_string(),
            }
            .into());
        }

        tracing::debug!(
            attempt = attempt + 1,
            max = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            "Retrying after: {}",
            err
        );
        futures_timer::Delay::new(delay).await;
        attempt += 1;
    }
}
