//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;

use crate::error::SdkError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::sync::RwLock;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for upstream catalog identifiers (e.g. `"bitcoin"`, `"wrapped-steth"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── CurrencyCode ────────────────────────────────────────────────────────────

/// A lowercase ISO-like currency code (`"usd"`, `"eur"`, `"btc"`).
///
/// Input is lower-cased on parse; empty or non-alphanumeric codes are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(s: &str) -> Result<Self, SdkError> {
        let code = s.trim().to_lowercase();
        if code.is_empty() {
            return Err(SdkError::Validation("currency code is empty".to_string()));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SdkError::Validation(format!("invalid currency code: {s}")));
        }
        Ok(Self(code))
    }

    pub fn usd() -> Self {
        Self("usd".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CurrencyCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── CurrencyPreference ──────────────────────────────────────────────────────

/// The display currency selected by the user: a code plus the symbol to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPreference {
    pub code: CurrencyCode,
    pub symbol: String,
}

impl CurrencyPreference {
    pub fn new(code: CurrencyCode, symbol: impl Into<String>) -> Self {
        Self {
            code,
            symbol: symbol.into(),
        }
    }
}

impl Default for CurrencyPreference {
    fn default() -> Self {
        Self::new(CurrencyCode::usd(), "$")
    }
}

/// Read-only access to the externally owned currency preference.
///
/// View models take one of these in their constructor and only ever read from it.
pub trait CurrencyProvider: Send + Sync {
    fn preference(&self) -> CurrencyPreference;
}

impl CurrencyProvider for CurrencyPreference {
    fn preference(&self) -> CurrencyPreference {
        self.clone()
    }
}

impl CurrencyProvider for RwLock<CurrencyPreference> {
    fn preference(&self) -> CurrencyPreference {
        match self.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

// ─── ChartRange ──────────────────────────────────────────────────────────────

/// Time span covered by a historical price chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[default]
    #[serde(rename = "1")]
    Day1,
    #[serde(rename = "7")]
    Week1,
    #[serde(rename = "30")]
    Month1,
    #[serde(rename = "365")]
    Year1,
}

impl ChartRange {
    /// Value of the upstream `days` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1",
            Self::Week1 => "7",
            Self::Month1 => "30",
            Self::Year1 => "365",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Week1 => 7,
            Self::Month1 => 30,
            Self::Year1 => 365,
        }
    }

    /// Short button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day1 => "24 Hours",
            Self::Week1 => "7 Days",
            Self::Month1 => "30 Days",
            Self::Year1 => "1 Year",
        }
    }

    /// Day-range charts show times of day, longer ranges show dates.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Self::Day1)
    }

    pub fn all() -> [ChartRange; 4] {
        [Self::Day1, Self::Week1, Self::Month1, Self::Year1]
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
