//! Price history domain: chart points for a coin over a `ChartRange`.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price sample on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub price: Decimal,
}

impl PricePoint {
    /// Converts a raw `[ms, value]` pair; gaps and out-of-range timestamps yield `None`.
    pub fn from_raw((time_ms, value): wire::RawPoint) -> Option<Self> {
        if !time_ms.is_finite() {
            return None;
        }
        let time = DateTime::<Utc>::from_timestamp_millis(time_ms as i64)?;
        Some(Self {
            time,
            price: value?,
        })
    }
}

/// Price points in upstream order, skipping gaps.
pub fn price_points(resp: wire::MarketChartResponse) -> Vec<PricePoint> {
    resp.prices
        .into_iter()
        .filter_map(PricePoint::from_raw)
        .collect()
}
