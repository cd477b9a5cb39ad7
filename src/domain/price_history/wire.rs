//! Wire types for historical market charts (REST).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `[timestamp_ms, value]` pair. The value is null for gaps in the series.
pub type RawPoint = (f64, Option<Decimal>);

/// REST response for `/coins/{id}/market_chart`. Market cap and volume series are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<RawPoint>,
}
