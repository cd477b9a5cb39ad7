//! Price history sub-client: market chart queries.

use crate::client::CoinscopeClient;
use crate::domain::price_history::{price_points, PricePoint};
use crate::error::SdkError;
use crate::shared::{ChartRange, CoinId, CurrencyCode};

/// Sub-client for price history operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a CoinscopeClient,
}

impl<'a> PriceHistoryClient<'a> {
    pub async fn get(
        &self,
        id: &CoinId,
        currency: &CurrencyCode,
        range: ChartRange,
    ) -> Result<Vec<PricePoint>, SdkError> {
        if id.is_empty() {
            return Err(SdkError::Validation("coin id is empty".to_string()));
        }

        let resp = self
            .client
            .http
            .get_market_chart(id, currency, range)
            .await?;
        Ok(price_points(resp))
    }
}
