//! High-level client: `CoinscopeClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use crate::domain::coin::client::Coins;
use crate::domain::price_history::client::PriceHistoryClient;
use crate::error::SdkError;
use crate::http::CoinGeckoHttp;
use crate::network::{API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// The primary entry point for fetching market data.
///
/// Provides nested sub-client accessors for each domain:
/// `client.coins()`, `client.price_history()`.
#[derive(Clone)]
pub struct CoinscopeClient {
    pub(crate) http: CoinGeckoHttp,
}

impl CoinscopeClient {
    pub fn builder() -> CoinscopeClientBuilder {
        CoinscopeClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinscopeClientBuilder {
    base_url: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl Default for CoinscopeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

impl CoinscopeClientBuilder {
    /// Start from `COINSCOPE_API_URL` / `COINSCOPE_API_KEY` when set.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                builder.base_url = url;
            }
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                builder.api_key = Some(key);
            }
        }
        builder
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<CoinscopeClient, SdkError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "base url must be http(s): {}",
                self.base_url
            )));
        }

        Ok(CoinscopeClient {
            http: CoinGeckoHttp::new(base_url, self.timeout, self.api_key)?,
        })
    }
}
