//! Historical price series for one coin, one range at a time.

use super::load_state::{FailureReason, LoadState, RequestSequencer, RequestTicket};
use crate::domain::price_history::PricePoint;
use crate::error::SdkError;
use crate::fetch::SharedFetcher;
use crate::shared::{ChartRange, CoinId, CurrencyCode, CurrencyProvider};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// One labelled point, ready for a chart component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSample {
    pub label: String,
    pub price: Decimal,
}

/// Times of day for intraday ranges, calendar dates otherwise.
pub fn axis_label(point: &PricePoint, range: ChartRange) -> String {
    if range.is_intraday() {
        point.time.format("%-I:%M %p").to_string()
    } else {
        point.time.format("%-m/%-d/%Y").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub ticket: RequestTicket,
    pub coin_id: CoinId,
    pub currency: CurrencyCode,
    pub range: ChartRange,
}

pub struct ChartViewModel {
    fetcher: SharedFetcher,
    currency: Arc<dyn CurrencyProvider>,
    coin_id: CoinId,
    range: ChartRange,
    state: LoadState,
    points: Vec<PricePoint>,
    /// Currency of the latest issued request, whether or not it succeeded.
    requested_currency: Option<CurrencyCode>,
    requests: RequestSequencer,
}

impl ChartViewModel {
    pub fn new(
        fetcher: SharedFetcher,
        currency: Arc<dyn CurrencyProvider>,
        coin_id: CoinId,
    ) -> Self {
        Self {
            fetcher,
            currency,
            coin_id,
            range: ChartRange::default(),
            state: LoadState::Idle,
            points: Vec::new(),
            requested_currency: None,
            requests: RequestSequencer::new(),
        }
    }

    pub fn with_range(mut self, range: ChartRange) -> Self {
        self.range = range;
        self
    }

    pub async fn mount(&mut self) {
        let request = self.begin_fetch();
        let fetcher = Arc::clone(&self.fetcher);
        let result = fetcher
            .fetch_price_history(&request.coin_id, &request.currency, request.range)
            .await;
        self.complete_fetch(request, result);
    }

    pub fn begin_fetch(&mut self) -> ChartRequest {
        let ticket = self.requests.issue();
        let currency = self.currency.preference().code;
        self.state = LoadState::Loading;
        self.requested_currency = Some(currency.clone());
        ChartRequest {
            ticket,
            coin_id: self.coin_id.clone(),
            currency,
            range: self.range,
        }
    }

    /// Returns `false` when a newer request superseded this one.
    pub fn complete_fetch(
        &mut self,
        request: ChartRequest,
        result: Result<Vec<PricePoint>, SdkError>,
    ) -> bool {
        if !self.requests.is_current(request.ticket) {
            tracing::debug!(
                seq = request.ticket.seq(),
                coin = %request.coin_id,
                range = request.range.as_str(),
                "Discarding stale chart response"
            );
            return false;
        }

        match result {
            Ok(points) => {
                tracing::debug!(count = points.len(), range = request.range.as_str(), "Chart loaded");
                self.points = points;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                let reason = FailureReason::from_error(&err);
                tracing::warn!(kind = %reason.kind, coin = %request.coin_id, "Chart fetch failed: {}", reason.detail);
                self.points.clear();
                self.state = LoadState::Failed(reason);
            }
        }
        true
    }

    /// Switch range and refetch. Selecting the current range is a no-op unless
    /// the last fetch failed or never ran.
    pub async fn set_range(&mut self, range: ChartRange) {
        if range == self.range && matches!(self.state, LoadState::Loaded | LoadState::Loading) {
            return;
        }
        self.range = range;
        self.mount().await;
    }

    /// Refetch when the selected currency differs from the one last requested.
    pub async fn refresh_if_currency_changed(&mut self) -> bool {
        if !self.currency_drifted() {
            return false;
        }
        self.mount().await;
        true
    }

    pub fn currency_drifted(&self) -> bool {
        match &self.requested_currency {
            Some(code) => *code != self.currency.preference().code,
            None => false,
        }
    }

    pub fn series(&self) -> Vec<ChartSample> {
        self.points
            .iter()
            .map(|p| ChartSample {
                label: axis_label(p, self.range),
                price: p.price,
            })
            .collect()
    }

    pub fn range(&self) -> ChartRange {
        self.range
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn coin_id(&self) -> &CoinId {
        &self.coin_id
    }
}
