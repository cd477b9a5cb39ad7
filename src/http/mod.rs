//! HTTP client layer: `CoinGeckoHttp` plus caller-side retries.

pub mod client;
pub mod retry;

pub use client::CoinGeckoHttp;
pub use retry::{with_retry, RetryConfig, RetryPolicy};
