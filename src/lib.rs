//! # Coinscope
//!
//! Client-side market-data view models for a cryptocurrency price browser,
//! backed by the CoinGecko public API. Native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Newtypes, number formatting, domain models (always available, WASM-safe)
//! 2. **HTTP API**: `CoinGeckoHttp`, one request per call, with caller-side retries
//! 3. **High-Level Client**: `CoinscopeClient` with nested sub-clients
//! 4. **Fetch seam**: `MarketDataFetcher`, implemented by the client and by test doubles
//! 5. **View models**: list, detail and chart state with stale-response guards
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinscope::prelude::*;
//! use std::sync::Arc;
//!
//! let client = CoinscopeClient::builder().build()?;
//! let currency = Arc::new(CurrencyPreference::default());
//!
//! let mut list = ListViewModel::new(Arc::new(client), currency)
//!     .with_initial_page(parse_page_param(Some("2")));
//! list.mount().await;
//! list.set_search("bit");
//! let view = list.view();
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and number formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Error types and the `ErrorKind` taxonomy.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CoinscopeClient`: the primary entry point for live data.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Fetch seam ──────────────────────────────────────────────────────

/// The async boundary view models fetch through.
pub mod fetch;

// ── Layer 5: View models ─────────────────────────────────────────────────────

/// List, detail and chart view models.
pub mod view;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{
        ChartRange, CoinId, CurrencyCode, CurrencyPreference, CurrencyProvider,
    };

    // Formatting
    pub use crate::shared::fmt::{
        fixed, group_thousands, is_gain, millions, percent_change, to_millions_truncated,
    };

    // Domain types
    pub use crate::domain::coin::{CoinDetail, CoinSummary, LIST_FETCH_SIZE};
    pub use crate::domain::price_history::PricePoint;

    // Errors
    pub use crate::error::{ErrorKind, HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        CoinsClient, CoinscopeClient, CoinscopeClientBuilder, PriceHistorySubClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{with_retry, RetryConfig, RetryPolicy};

    // Fetch seam
    pub use crate::fetch::{MarketDataFetcher, SharedFetcher};

    // View models
    pub use crate::view::{
        compute_page_window, parse_page_param, ChartViewModel, DetailView, DetailViewModel,
        FormattedCoinRow, ListView, ListViewModel, LoadState, PageWindow, DEFAULT_PAGE_SIZE,
        USER_ERROR_MESSAGE,
    };
}
