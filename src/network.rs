//! Network URL constants for the Coinscope SDK.

/// Default REST API base URL (public CoinGecko v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the optional CoinGecko demo API key.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "COINSCOPE_API_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "COINSCOPE_API_KEY";
