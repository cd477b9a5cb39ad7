//! List screen view model: one fetch of the top coins, then local search and paging.
//!
//! Search is global: a non-empty predicate scans the whole fetched set and bypasses
//! paging. Paging only ever windows the unfiltered set.

use super::load_state::{FailureReason, LoadState, RequestSequencer, RequestTicket};
use super::pagination::{compute_page_window, PageWindow};
use crate::domain::coin::CoinSummary;
use crate::error::SdkError;
use crate::fetch::SharedFetcher;
use crate::shared::fmt;
use crate::shared::{CoinId, CurrencyCode, CurrencyPreference, CurrencyProvider};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Rows per page on the list screen.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

// ─── SearchPredicate ─────────────────────────────────────────────────────────

/// Lower-cased substring matched against a coin's name or symbol.
///
/// Blank input is the empty predicate, which matches everything and means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPredicate(String);

impl SearchPredicate {
    pub fn new(input: &str) -> Self {
        Self(input.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, coin: &CoinSummary) -> bool {
        self.is_empty()
            || coin.name.to_lowercase().contains(&self.0)
            || coin.symbol.to_lowercase().contains(&self.0)
    }
}

/// The rows to render for `source` under `predicate`, or the page window when
/// the predicate is empty. Always a fresh sequence; `source` is never touched.
pub fn derive_visible_rows(
    source: &[CoinSummary],
    predicate: &SearchPredicate,
    window: &PageWindow,
    page_size: NonZeroUsize,
) -> Vec<CoinSummary> {
    if !predicate.is_empty() {
        return source
            .iter()
            .filter(|coin| predicate.matches(coin))
            .cloned()
            .collect();
    }
    source[window.item_range(source.len(), page_size)].to_vec()
}

// ─── Render-boundary types ───────────────────────────────────────────────────

/// One list row with every figure already formatted for the current currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedCoinRow {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image: String,
    /// `"$ 65,000.50"`
    pub price: String,
    /// `"+1.23%"`
    pub change_24h: String,
    pub is_gain: bool,
    /// `"$ 1,280,000 M"`
    pub market_cap: String,
}

impl FormattedCoinRow {
    pub fn new(coin: &CoinSummary, currency: &CurrencyPreference) -> Self {
        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.clone(),
            image: coin.image.clone(),
            price: format!("{} {}", currency.symbol, fmt::fixed(&coin.current_price, 2)),
            change_24h: fmt::percent_change(&coin.price_change_percent_24h),
            is_gain: fmt::is_gain(&coin.price_change_percent_24h),
            market_cap: format!("{} {} M", currency.symbol, fmt::millions(coin.market_cap)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<usize>,
}

/// Everything the list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub is_loading: bool,
    pub error: Option<FailureReason>,
    pub visible_rows: Vec<CoinSummary>,
    pub rows: Vec<FormattedCoinRow>,
    pub pagination: Pagination,
}

/// An issued list fetch, handed back to `complete_fetch` when it resolves.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub ticket: RequestTicket,
    pub currency: CurrencyCode,
}

// ─── ListViewModel ───────────────────────────────────────────────────────────

pub struct ListViewModel {
    fetcher: SharedFetcher,
    currency: Arc<dyn CurrencyProvider>,
    state: LoadState,
    coins: Arc<[CoinSummary]>,
    fetched_currency: Option<CurrencyCode>,
    page_size: NonZeroUsize,
    requested_page: i64,
    search: SearchPredicate,
    visible: Vec<CoinSummary>,
    requests: RequestSequencer,
}

impl ListViewModel {
    pub fn new(fetcher: SharedFetcher, currency: Arc<dyn CurrencyProvider>) -> Self {
        Self {
            fetcher,
            currency,
            state: LoadState::Idle,
            coins: Arc::from(Vec::new()),
            fetched_currency: None,
            page_size: DEFAULT_PAGE_SIZE,
            requested_page: 1,
            search: SearchPredicate::default(),
            visible: Vec::new(),
            requests: RequestSequencer::new(),
        }
    }

    /// Fixed for the life of the view.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self.refresh_visible();
        self
    }

    /// Page requested by the route; clamped once the list is known.
    pub fn with_initial_page(mut self, page: i64) -> Self {
        self.requested_page = page;
        self.refresh_visible();
        self
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────────

    /// Fetch on mount: issue a request, await it, and apply the result.
    pub async fn mount(&mut self) {
        let request = self.begin_fetch();
        let fetcher = Arc::clone(&self.fetcher);
        let result = fetcher.fetch_list(&request.currency).await;
        self.complete_fetch(request, result);
    }

    /// Enter `Loading` and issue a ticket that supersedes any in-flight request.
    ///
    /// For hosts that drive the fetch future themselves; pair with `complete_fetch`.
    pub fn begin_fetch(&mut self) -> ListRequest {
        let ticket = self.requests.issue();
        self.state = LoadState::Loading;
        ListRequest {
            ticket,
            currency: self.currency.preference().code,
        }
    }

    /// Apply a fetch result. Returns `false` when the request was superseded
    /// and the result was discarded.
    pub fn complete_fetch(
        &mut self,
        request: ListRequest,
        result: Result<Vec<CoinSummary>, SdkError>,
    ) -> bool {
        if !self.requests.is_current(request.ticket) {
            tracing::debug!(seq = request.ticket.seq(), "Discarding stale list response");
            return false;
        }

        match result {
            Ok(coins) => {
                tracing::debug!(count = coins.len(), currency = %request.currency, "List loaded");
                self.coins = Arc::from(coins);
                self.fetched_currency = Some(request.currency);
                self.state = LoadState::Loaded;
                self.requested_page = self.page_window().effective_page as i64;
            }
            Err(err) => {
                let reason = FailureReason::from_error(&err);
                tracing::warn!(kind = %reason.kind, "List fetch failed: {}", reason.detail);
                self.coins = Arc::from(Vec::new());
                self.state = LoadState::Failed(reason);
            }
        }
        self.refresh_visible();
        true
    }

    pub fn fetcher(&self) -> SharedFetcher {
        Arc::clone(&self.fetcher)
    }

    // ── Input events ─────────────────────────────────────────────────────

    /// Search box changed. Clearing it restores the page window at the current page.
    pub fn set_search(&mut self, input: &str) {
        self.search = SearchPredicate::new(input);
        self.refresh_visible();
    }

    /// Page button clicked. While a search is active the filtered rows stay
    /// on screen; the new page shows once the search is cleared.
    pub fn set_page(&mut self, page: i64) {
        self.requested_page = page;
        if self.state.is_loaded() {
            self.requested_page = self.page_window().effective_page as i64;
        }
        self.refresh_visible();
    }

    // ── Derived view ─────────────────────────────────────────────────────

    pub fn page_window(&self) -> PageWindow {
        compute_page_window(self.coins.len(), self.page_size, self.requested_page)
    }

    pub fn current_page(&self) -> usize {
        self.page_window().effective_page
    }

    pub fn visible_rows(&self) -> &[CoinSummary] {
        &self.visible
    }

    /// Visible rows formatted with the currency symbol in effect right now.
    pub fn formatted_rows(&self) -> Vec<FormattedCoinRow> {
        let currency = self.currency.preference();
        self.visible
            .iter()
            .map(|coin| FormattedCoinRow::new(coin, &currency))
            .collect()
    }

    pub fn view(&self) -> ListView {
        let window = self.page_window();
        ListView {
            is_loading: self.state.is_loading(),
            error: self.state.error().cloned(),
            visible_rows: self.visible.clone(),
            rows: self.formatted_rows(),
            pagination: Pagination {
                current_page: window.effective_page,
                total_pages: window.total_pages,
                page_numbers: window.page_numbers,
            },
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The full fetched set, unfiltered.
    pub fn coins(&self) -> &[CoinSummary] {
        &self.coins
    }

    pub fn search(&self) -> &SearchPredicate {
        &self.search
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Currency the loaded prices are quoted in.
    pub fn fetched_currency(&self) -> Option<&CurrencyCode> {
        self.fetched_currency.as_ref()
    }

    /// The preference moved since the list was fetched. The list does not
    /// refetch on its own; only formatting follows the new currency.
    pub fn currency_drifted(&self) -> bool {
        match &self.fetched_currency {
            Some(code) => *code != self.currency.preference().code,
            None => false,
        }
    }

    fn refresh_visible(&mut self) {
        let window = self.page_window();
        self.visible = derive_visible_rows(&self.coins, &self.search, &window, self.page_size);
    }
}
