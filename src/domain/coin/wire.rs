//! Wire types for coin responses (REST).
//!
//! Every field the upstream API is known to null out is optional here;
//! required-ness is enforced in `convert.rs`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── /coins/markets ─────────────────────────────────────────────────────────

/// One row of the ranked markets list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
}

// ─── /coins/{id} ────────────────────────────────────────────────────────────

/// Image URLs; only the large size is shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageResponse {
    #[serde(default)]
    pub large: Option<String>,
}

/// Localized descriptions; only English is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DescriptionResponse {
    #[serde(default)]
    pub en: Option<String>,
}

/// Per-currency market figures. Values are null for currencies without a quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketDataResponse {
    #[serde(default)]
    pub current_price: HashMap<String, Option<Decimal>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<Decimal>>,
}

/// REST response for a single coin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinDetailResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<ImageResponse>,
    #[serde(default)]
    pub description: Option<DescriptionResponse>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: Option<MarketDataResponse>,
}
