//! Low-level HTTP client: `CoinGeckoHttp`.
//!
//! One method per API endpoint, one request per call. Returns wire types (conversion
//! to domain types happens at the sub-client boundary). Internal to the SDK:
//! `CoinscopeClient` wraps this. Retries belong to the caller, see `http::retry`.

use crate::domain::coin::wire::{CoinDetailResponse, CoinMarketResponse};
use crate::domain::price_history::wire::MarketChartResponse;
use crate::error::HttpError;
use crate::network::API_KEY_HEADER;
use crate::shared::{ChartRange, CoinId, CurrencyCode};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing;

/// Low-level HTTP client for the CoinGecko REST API.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
    /// Optional demo API key. NEVER exposed publicly.
    api_key: Option<String>,
}

impl CoinGeckoHttp {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        api_key: Option<String>,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// `GET /coins/markets` ranked by market cap, one page.
    pub async fn get_coin_markets(
        &self,
        vs_currency: &CurrencyCode,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false",
            self.base_url,
            urlencoding::encode(vs_currency.as_str()),
            per_page,
            page
        );
        self.get(&url).await
    }

    /// `GET /coins/{id}`.
    pub async fn get_coin(&self, id: &CoinId) -> Result<CoinDetailResponse, HttpError> {
        let url = format!(
            "{}/coins/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        self.get(&url).await
    }

    // ── Price History ────────────────────────────────────────────────────

    /// `GET /coins/{id}/market_chart`.
    pub async fn get_market_chart(
        &self,
        id: &CoinId,
        vs_currency: &CurrencyCode,
        range: ChartRange,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(id.as_str()),
            urlencoding::encode(vs_currency.as_str()),
            range.as_str()
        );
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let mut req = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(key) = self.api_key.as_ref() {
            req = req.header(API_KEY_HEADER, key);
        }

        tracing::debug!("GET {}", url);
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after_ms);
        let body_text = resp.text().await.unwrap_or_default();

        Err(classify_status(status_code, body_text, retry_after_ms))
    }
}

/// Map a non-2xx status onto an `HttpError`.
fn classify_status(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        408 => HttpError::Timeout,
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

/// `Retry-After` in delta-seconds form; HTTP-date values are ignored.
fn parse_retry_after_ms(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().map(|secs| secs * 1000)
}
