//! The async boundary view models fetch through.
//!
//! `CoinscopeClient` implements `MarketDataFetcher` against the live API;
//! hosts and tests can substitute any other implementation.

use crate::domain::coin::{CoinDetail, CoinSummary};
use crate::domain::price_history::PricePoint;
use crate::error::SdkError;
use crate::shared::{ChartRange, CoinId, CurrencyCode};
use async_trait::async_trait;
use std::sync::Arc;

/// How view models hold their fetcher.
#[cfg(not(target_arch = "wasm32"))]
pub type SharedFetcher = Arc<dyn MarketDataFetcher + Send + Sync>;

/// How view models hold their fetcher.
#[cfg(target_arch = "wasm32")]
pub type SharedFetcher = Arc<dyn MarketDataFetcher>;

/// Retrieves market data. Owns request issuance and error classification only:
/// implementations must not retry on their own.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait MarketDataFetcher {
    /// Ranked coin summaries quoted in `currency`. Incomplete rows are dropped.
    async fn fetch_list(&self, currency: &CurrencyCode) -> Result<Vec<CoinSummary>, SdkError>;

    /// One coin's full record. Fails fast on a missing required field.
    async fn fetch_detail(&self, id: &CoinId) -> Result<CoinDetail, SdkError>;

    /// Historical prices for the chart.
    async fn fetch_price_history(
        &self,
        id: &CoinId,
        currency: &CurrencyCode,
        range: ChartRange,
    ) -> Result<Vec<PricePoint>, SdkError>;
}

#[cfg(feature = "http")]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MarketDataFetcher for crate::client::CoinscopeClient {
    async fn fetch_list(&self, currency: &CurrencyCode) -> Result<Vec<CoinSummary>, SdkError> {
        self.coins().markets(currency).await
    }

    async fn fetch_detail(&self, id: &CoinId) -> Result<CoinDetail, SdkError> {
        self.coins().get(id).await
    }

    async fn fetch_price_history(
        &self,
        id: &CoinId,
        currency: &CurrencyCode,
        range: ChartRange,
    ) -> Result<Vec<PricePoint>, SdkError> {
        self.price_history().get(id, currency, range).await
    }
}
