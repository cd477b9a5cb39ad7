//! Coin domain: ranked summaries, per-currency detail records, validation.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{CoinId, CurrencyCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How many ranked coins the list screen pulls in one request.
pub const LIST_FETCH_SIZE: u32 = 100;

// ─── CoinSummary ─────────────────────────────────────────────────────────────

/// One ranked row of the markets list, quoted in the currency it was fetched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: Decimal,
    pub price_change_percent_24h: Decimal,
    pub market_cap: Decimal,
}

// ─── CoinDetail ──────────────────────────────────────────────────────────────

/// Full record for one coin, with prices and market caps for every quoted currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image: String,
    /// First sentence of the English description.
    pub description_short: String,
    pub market_cap_rank: u32,
    pub prices_by_currency: HashMap<String, Decimal>,
    pub market_caps_by_currency: HashMap<String, Decimal>,
}

impl CoinDetail {
    pub fn price_in(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.prices_by_currency.get(currency.as_str()).copied()
    }

    pub fn market_cap_in(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.market_caps_by_currency.get(currency.as_str()).copied()
    }
}

/// Converts a markets page, dropping rows that miss a required field. Order is kept.
pub fn summaries_from_rows(rows: Vec<wire::CoinMarketResponse>) -> Vec<CoinSummary> {
    let total = rows.len();
    let coins: Vec<CoinSummary> = rows
        .into_iter()
        .filter_map(|row| match CoinSummary::try_from(row) {
            Ok(coin) => Some(coin),
            Err(err) => {
                tracing::warn!("Dropping coin row: {}", err);
                None
            }
        })
        .collect();

    if coins.len() < total {
        tracing::debug!(kept = coins.len(), total, "Dropped incomplete coin rows");
    }
    coins
}

/// Text before the first `". "`, or the whole text when there is none.
pub fn first_sentence(text: &str) -> &str {
    match text.split_once(". ") {
        Some((head, _)) => head,
        None => text,
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingName,
    MissingSymbol,
    MissingImage,
    MissingPrice,
    MissingPriceChange,
    MissingMarketCap,
    MissingMarketCapRank,
    MissingMarketData,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Coin validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingName => write!(f, "Missing name"),
            ValidationError::MissingSymbol => write!(f, "Missing symbol"),
            ValidationError::MissingImage => write!(f, "Missing image"),
            ValidationError::MissingPrice => write!(f, "Missing current price"),
            ValidationError::MissingPriceChange => write!(f, "Missing 24h price change"),
            ValidationError::MissingMarketCap => write!(f, "Missing market cap"),
            ValidationError::MissingMarketCapRank => write!(f, "Missing market cap rank"),
            ValidationError::MissingMarketData => write!(f, "Missing market data"),
        }
    }
}

impl std::error::Error for ValidationError {}
