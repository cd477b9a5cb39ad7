//! View models: the state a screen renders, derived from fetched data plus
//! local inputs (search text, page, currency, chart range).
//!
//! Each view model owns a [`RequestSequencer`] and applies a response only if
//! its ticket is still the latest one issued.

pub mod chart;
pub mod detail;
pub mod list;
pub mod load_state;
pub mod pagination;

pub use chart::{ChartRequest, ChartSample, ChartViewModel};
pub use detail::{DetailRequest, DetailView, DetailViewModel};
pub use list::{
    FormattedCoinRow, ListRequest, ListView, ListViewModel, Pagination, SearchPredicate,
    DEFAULT_PAGE_SIZE,
};
pub use load_state::{
    FailureReason, LoadState, RequestSequencer, RequestTicket, USER_ERROR_MESSAGE,
};
pub use pagination::{compute_page_window, parse_page_param, PageWindow};
