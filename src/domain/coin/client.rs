//! Coins sub-client: ranked list and per-coin detail.

use crate::client::CoinscopeClient;
use crate::domain::coin::{self, CoinDetail, CoinSummary, LIST_FETCH_SIZE};
use crate::error::SdkError;
use crate::shared::{CoinId, CurrencyCode};

/// Sub-client for coin operations.
pub struct Coins<'a> {
    pub(crate) client: &'a CoinscopeClient,
}

impl<'a> Coins<'a> {
    /// The top coins by market cap, quoted in `currency`.
    ///
    /// Rows missing a required field are dropped rather than failing the whole list.
    pub async fn markets(&self, currency: &CurrencyCode) -> Result<Vec<CoinSummary>, SdkError> {
        let rows = self
            .client
            .http
            .get_coin_markets(currency, LIST_FETCH_SIZE, 1)
            .await?;

        Ok(coin::summaries_from_rows(rows))
    }

    /// Full detail for one coin. Fails fast if a required field is missing.
    pub async fn get(&self, id: &CoinId) -> Result<CoinDetail, SdkError> {
        if id.is_empty() {
            return Err(SdkError::Validation("coin id is empty".to_string()));
        }

        let resp = self.client.http.get_coin(id).await?;
        resp.try_into()
            .map_err(|e: coin::ValidationError| SdkError::Validation(e.to_string()))
    }
}
