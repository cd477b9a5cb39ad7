//! Detail screen view model for a single coin id.

use super::load_state::{FailureReason, LoadState, RequestSequencer, RequestTicket};
use crate::domain::coin::CoinDetail;
use crate::error::SdkError;
use crate::fetch::SharedFetcher;
use crate::shared::fmt;
use crate::shared::{CoinId, CurrencyProvider};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Everything the detail screen renders.
///
/// `formatted_price` / `formatted_market_cap` are `None` when the detail has no
/// quote for the current currency; the rest of the view still renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub is_loading: bool,
    pub error: Option<FailureReason>,
    pub detail: Option<CoinDetail>,
    /// `"$ 65,000.5"`
    pub formatted_price: Option<String>,
    /// `"$ 1,280,000 M"`
    pub formatted_market_cap: Option<String>,
}

/// An issued detail fetch, handed back to `complete_fetch` when it resolves.
#[derive(Debug, Clone)]
pub struct DetailRequest {
    pub ticket: RequestTicket,
    pub coin_id: CoinId,
}

pub struct DetailViewModel {
    fetcher: SharedFetcher,
    currency: Arc<dyn CurrencyProvider>,
    coin_id: CoinId,
    state: LoadState,
    detail: Option<CoinDetail>,
    requests: RequestSequencer,
}

impl DetailViewModel {
    pub fn new(
        fetcher: SharedFetcher,
        currency: Arc<dyn CurrencyProvider>,
        coin_id: CoinId,
    ) -> Self {
        Self {
            fetcher,
            currency,
            coin_id,
            state: LoadState::Idle,
            detail: None,
            requests: RequestSequencer::new(),
        }
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────────

    pub async fn mount(&mut self) {
        let request = self.begin_fetch();
        let fetcher = Arc::clone(&self.fetcher);
        let result = fetcher.fetch_detail(&request.coin_id).await;
        self.complete_fetch(request, result);
    }

    pub fn begin_fetch(&mut self) -> DetailRequest {
        let ticket = self.requests.issue();
        self.state = LoadState::Loading;
        DetailRequest {
            ticket,
            coin_id: self.coin_id.clone(),
        }
    }

    /// Apply a fetch result. Returns `false` when the request was superseded.
    pub fn complete_fetch(
        &mut self,
        request: DetailRequest,
        result: Result<CoinDetail, SdkError>,
    ) -> bool {
        if !self.requests.is_current(request.ticket) {
            tracing::debug!(
                seq = request.ticket.seq(),
                coin = %request.coin_id,
                "Discarding stale detail response"
            );
            return false;
        }

        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                let reason = FailureReason::from_error(&err);
                tracing::warn!(
                    kind = %reason.kind,
                    coin = %request.coin_id,
                    "Detail fetch failed: {}",
                    reason.detail
                );
                self.detail = None;
                self.state = LoadState::Failed(reason);
            }
        }
        true
    }

    /// Route moved to another coin: drop the current record and fetch the new one.
    pub async fn navigate(&mut self, coin_id: CoinId) {
        self.unmount();
        self.coin_id = coin_id;
        self.mount().await;
    }

    /// Navigated away: discard the record and ignore any response still in flight.
    pub fn unmount(&mut self) {
        self.requests.invalidate();
        self.detail = None;
        self.state = LoadState::Idle;
    }

    pub fn fetcher(&self) -> SharedFetcher {
        Arc::clone(&self.fetcher)
    }

    // ── Derived fields ───────────────────────────────────────────────────

    /// Price in the current currency.
    pub fn display_price(&self) -> Option<Decimal> {
        let detail = self.detail.as_ref()?;
        let code = self.currency.preference().code;
        let price = detail.price_in(&code);
        if price.is_none() {
            tracing::debug!(coin = %detail.id, currency = %code, "No price quote");
        }
        price
    }

    /// Market cap in the current currency, truncated to whole millions.
    pub fn display_market_cap_millions(&self) -> Option<String> {
        let detail = self.detail.as_ref()?;
        let code = self.currency.preference().code;
        match detail.market_cap_in(&code) {
            Some(cap) => Some(fmt::millions(cap)),
            None => {
                tracing::debug!(coin = %detail.id, currency = %code, "No market cap quote");
                None
            }
        }
    }

    pub fn formatted_price(&self) -> Option<String> {
        let price = self.display_price()?;
        let symbol = self.currency.preference().symbol;
        Some(format!("{} {}", symbol, fmt::group_thousands(price.normalize())))
    }

    pub fn formatted_market_cap(&self) -> Option<String> {
        let millions = self.display_market_cap_millions()?;
        let symbol = self.currency.preference().symbol;
        Some(format!("{} {} M", symbol, millions))
    }

    pub fn view(&self) -> DetailView {
        DetailView {
            is_loading: self.state.is_loading(),
            error: self.state.error().cloned(),
            detail: self.detail.clone(),
            formatted_price: self.formatted_price(),
            formatted_market_cap: self.formatted_market_cap(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn coin_id(&self) -> &CoinId {
        &self.coin_id
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn detail(&self) -> Option<&CoinDetail> {
        self.detail.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::CoinSummary;
    use crate::domain::price_history::PricePoint;
    use crate::error::{ErrorKind, HttpError};
    use crate::fetch::MarketDataFetcher;
    use crate::shared::{ChartRange, CurrencyCode, CurrencyPreference};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::{Mutex, RwLock};

    fn detail(id: &str) -> CoinDetail {
        CoinDetail {
            id: CoinId::from(id),
            name: "Bitcoin".into(),
            symbol: "btc".into(),
            image: "https://assets.example.com/btc-large.png".into(),
            description_short: "Bitcoin is digital money".into(),
            market_cap_rank: 1,
            prices_by_currency: HashMap::from([
                ("usd".to_string(), Decimal::from_str("65000.50").unwrap()),
                ("eur".to_string(), Decimal::from_str("60123.4").unwrap()),
            ]),
            market_caps_by_currency: HashMap::from([
                ("usd".to_string(), Decimal::from(1_234_567_890u64)),
                ("eur".to_string(), Decimal::from(1_100_000_000u64)),
                ("jpy".to_string(), Decimal::from(190_000_000_000_000u64)),
            ]),
        }
    }

    /// Serves details keyed by coin id and records every request.
    struct StubFetcher {
        details: HashMap<String, CoinDetail>,
        calls: Mutex<Vec<CoinId>>,
    }

    impl StubFetcher {
        fn with(ids: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                details: ids.iter().map(|id| (id.to_string(), detail(id))).collect(),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MarketDataFetcher for StubFetcher {
        async fn fetch_list(&self, _currency: &CurrencyCode) -> Result<Vec<CoinSummary>, SdkError> {
            Ok(Vec::new())
        }

        async fn fetch_detail(&self, id: &CoinId) -> Result<CoinDetail, SdkError> {
            self.calls.lock().unwrap().push(id.clone());
            self.details
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| HttpError::NotFound(id.to_string()).into())
        }

        async fn fetch_price_history(
            &self,
            _id: &CoinId,
            _currency: &CurrencyCode,
            _range: ChartRange,
        ) -> Result<Vec<PricePoint>, SdkError> {
            Ok(Vec::new())
        }
    }

    fn currency(code: &str, symbol: &str) -> Arc<dyn CurrencyProvider> {
        Arc::new(CurrencyPreference::new(CurrencyCode::parse(code).unwrap(), symbol))
    }

    #[test]
    fn test_mount_loads_and_formats() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&["bitcoin"]),
            currency("usd", "$"),
            CoinId::from("bitcoin"),
        );
        tokio_test::block_on(vm.mount());

        let view = vm.view();
        assert!(!view.is_loading);
        assert!(view.error.is_none());
        assert_eq!(view.detail.as_ref().map(|d| d.market_cap_rank), Some(1));
        assert_eq!(view.formatted_price.as_deref(), Some("$ 65,000.5"));
        assert_eq!(view.formatted_market_cap.as_deref(), Some("$ 1,234 M"));
    }

    #[test]
    fn test_market_cap_truncates_not_rounds() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&["bitcoin"]),
            currency("usd", "$"),
            CoinId::from("bitcoin"),
        );
        tokio_test::block_on(vm.mount());
        // 1,234,567,890 → 1234, never 1235
        assert_eq!(vm.display_market_cap_millions().as_deref(), Some("1,234"));
    }

    #[test]
    fn test_missing_price_quote_degrades_single_field() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&["bitcoin"]),
            currency("jpy", "¥"),
            CoinId::from("bitcoin"),
        );
        tokio_test::block_on(vm.mount());

        let view = vm.view();
        assert!(view.error.is_none());
        assert!(view.formatted_price.is_none());
        assert_eq!(view.formatted_market_cap.as_deref(), Some("¥ 190,000,000 M"));
        assert_eq!(view.detail.map(|d| d.name), Some("Bitcoin".to_string()));
    }

    #[test]
    fn test_currency_change_rederives_fields() {
        let store = Arc::new(RwLock::new(CurrencyPreference::default()));
        let fetcher = StubFetcher::with(&["bitcoin"]);
        let mut vm = DetailViewModel::new(fetcher.clone(), store.clone(), CoinId::from("bitcoin"));
        tokio_test::block_on(vm.mount());

        *store.write().unwrap() =
            CurrencyPreference::new(CurrencyCode::parse("EUR").unwrap(), "€");
        assert_eq!(vm.formatted_price().as_deref(), Some("€ 60,123.4"));
        assert_eq!(vm.formatted_market_cap().as_deref(), Some("€ 1,100 M"));
        assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_coin_fails_not_found() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&["bitcoin"]),
            currency("usd", "$"),
            CoinId::from("not-a-coin"),
        );
        tokio_test::block_on(vm.mount());

        let view = vm.view();
        assert_eq!(view.error.map(|e| e.kind), Some(ErrorKind::NotFound));
        assert!(view.detail.is_none());
        assert!(view.formatted_price.is_none());
        assert!(view.formatted_market_cap.is_none());
    }

    #[test]
    fn test_stale_response_for_previous_coin_is_discarded() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&[]),
            currency("usd", "$"),
            CoinId::from("bitcoin"),
        );
        let old = vm.begin_fetch();
        vm.unmount();
        vm.coin_id = CoinId::from("ethereum");
        let new = vm.begin_fetch();

        assert!(vm.complete_fetch(new, Ok(detail("ethereum"))));
        assert!(!vm.complete_fetch(old, Ok(detail("bitcoin"))));
        assert_eq!(vm.detail().map(|d| d.id.as_str()), Some("ethereum"));
    }

    #[test]
    fn test_two_requests_only_latest_lands() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&[]),
            currency("usd", "$"),
            CoinId::from("bitcoin"),
        );
        let first = vm.begin_fetch();
        let second = vm.begin_fetch();
        assert!(!vm.complete_fetch(first, Ok(detail("first"))));
        assert!(vm.state().is_loading());
        assert!(vm.complete_fetch(second, Ok(detail("second"))));
        assert_eq!(vm.detail().map(|d| d.id.as_str()), Some("second"));
    }

    #[test]
    fn test_navigate_replaces_detail() {
        let fetcher = StubFetcher::with(&["bitcoin", "ethereum"]);
        let mut vm = DetailViewModel::new(fetcher.clone(), currency("usd", "$"), CoinId::from("bitcoin"));
        tokio_test::block_on(vm.mount());
        tokio_test::block_on(vm.navigate(CoinId::from("ethereum")));

        assert_eq!(vm.coin_id().as_str(), "ethereum");
        assert_eq!(vm.detail().map(|d| d.id.as_str()), Some("ethereum"));
        assert_eq!(fetcher.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unmount_discards_detail() {
        let mut vm = DetailViewModel::new(
            StubFetcher::with(&["bitcoin"]),
            currency("usd", "$"),
            CoinId::from("bitcoin"),
        );
        tokio_test::block_on(vm.mount());
        vm.unmount();
        assert!(vm.detail().is_none());
        assert_eq!(vm.state(), &LoadState::Idle);
    }
}
