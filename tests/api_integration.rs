//! Integration tests for CoinGecko response decoding and the view models built on it.
//!
//! These run offline: payloads below are trimmed copies of real API responses.
//! Live requests are exercised in `live_integration.rs`.

use coinscope::domain::coin::wire::{CoinDetailResponse, CoinMarketResponse};
use coinscope::domain::coin::{summaries_from_rows, CoinDetail, CoinSummary};
use coinscope::domain::price_history::{price_points, wire::MarketChartResponse};
use coinscope::shared::{CoinId, CurrencyCode};
use rust_decimal::Decimal;
use std::str::FromStr;

// =============================================================================
// /coins/markets
// =============================================================================

mod market_rows {
    use super::*;

    const MARKETS_JSON: &str = r#"[
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://coin-images.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 67187.33,
            "market_cap": 1317802988326,
            "market_cap_rank": 1,
            "total_volume": 31260929299,
            "price_change_percentage_24h": -1.2453,
            "last_updated": "2024-04-07T16:49:31.736Z"
        },
        {
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "image": "https://coin-images.coingecko.com/coins/images/279/large/ethereum.png",
            "current_price": 3379.26,
            "market_cap": 405826574185,
            "market_cap_rank": 2,
            "price_change_percentage_24h": 2.71
        },
        {
            "id": "ghost-token",
            "symbol": "ghst",
            "name": "Ghost",
            "image": "https://coin-images.coingecko.com/coins/images/0/large/ghost.png",
            "current_price": null,
            "market_cap": 0,
            "market_cap_rank": null,
            "price_change_percentage_24h": null
        }
    ]"#;

    fn rows() -> Vec<CoinMarketResponse> {
        serde_json::from_str(MARKETS_JSON).unwrap()
    }

    #[test]
    fn test_markets_deserialize_ignores_unknown_fields() {
        let rows = rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id.as_deref(), Some("bitcoin"));
        assert_eq!(rows[0].market_cap_rank, Some(1));
        assert_eq!(rows[2].current_price, None);
    }

    #[test]
    fn test_incomplete_rows_fail_validation() {
        let summaries: Vec<Result<CoinSummary, _>> =
            rows().into_iter().map(CoinSummary::try_from).collect();
        assert!(summaries[0].is_ok());
        assert!(summaries[1].is_ok());

        let err = summaries[2].as_ref().unwrap_err().to_string();
        assert!(err.contains("ghost-token"));
        assert!(err.contains("Missing current price"));
        assert!(err.contains("Missing 24h price change"));
    }

    #[test]
    fn test_list_keeps_complete_rows_in_rank_order() {
        let coins = summaries_from_rows(rows());
        let ids: Vec<&str> = coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum"]);
    }

    #[test]
    fn test_summary_keeps_decimal_precision() {
        let btc = CoinSummary::try_from(rows().remove(0)).unwrap();
        assert_eq!(btc.id, CoinId::from("bitcoin"));
        assert_eq!(btc.current_price, Decimal::from_str("67187.33").unwrap());
        assert_eq!(btc.market_cap, Decimal::from(1_317_802_988_326u64));
        assert_eq!(
            btc.price_change_percent_24h,
            Decimal::from_str("-1.2453").unwrap()
        );
    }
}

// =============================================================================
// /coins/{id}
// =============================================================================

mod coin_detail {
    use super::*;

    const DETAIL_JSON: &str = r#"{
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "image": {
            "thumb": "https://coin-images.coingecko.com/coins/images/1/thumb/bitcoin.png",
            "small": "https://coin-images.coingecko.com/coins/images/1/small/bitcoin.png",
            "large": "https://coin-images.coingecko.com/coins/images/1/large/bitcoin.png"
        },
        "description": {
            "en": "Bitcoin is the first successful internet money based on peer-to-peer technology. No central bank issues it."
        },
        "market_cap_rank": 1,
        "market_data": {
            "current_price": { "usd": 67187, "eur": 62010.5, "jpy": 10180512, "vef": null },
            "market_cap": { "usd": 1317802988326, "eur": 1216219330541, "jpy": null }
        }
    }"#;

    fn detail() -> CoinDetail {
        let resp: CoinDetailResponse = serde_json::from_str(DETAIL_JSON).unwrap();
        CoinDetail::try_from(resp).unwrap()
    }

    #[test]
    fn test_detail_uses_large_image_and_first_sentence() {
        let detail = detail();
        assert_eq!(detail.name, "Bitcoin");
        assert!(detail.image.ends_with("/large/bitcoin.png"));
        assert_eq!(
            detail.description_short,
            "Bitcoin is the first successful internet money based on peer-to-peer technology"
        );
        assert_eq!(detail.market_cap_rank, 1);
    }

    #[test]
    fn test_null_quotes_are_absent() {
        let detail = detail();
        let jpy = CurrencyCode::parse("jpy").unwrap();
        assert_eq!(detail.price_in(&jpy), Some(Decimal::from(10_180_512)));
        assert_eq!(detail.market_cap_in(&jpy), None);
        assert!(!detail.prices_by_currency.contains_key("vef"));
    }

    #[test]
    fn test_detail_without_market_data_is_rejected() {
        let resp: CoinDetailResponse = serde_json::from_str(
            r#"{"id": "bitcoin", "name": "Bitcoin", "image": {"large": "x.png"}, "market_cap_rank": 1}"#,
        )
        .unwrap();
        let err = CoinDetail::try_from(resp).unwrap_err().to_string();
        assert!(err.contains("Missing market data"));
    }
}

// =============================================================================
// /coins/{id}/market_chart
// =============================================================================

mod market_chart {
    use super::*;

    #[test]
    fn test_market_chart_prices() {
        let resp: MarketChartResponse = serde_json::from_str(
            r#"{
                "prices": [[1711929600000, 71246.95], [1711933200000, 70912.1]],
                "market_caps": [[1711929600000, 1401766876543]],
                "total_volumes": [[1711929600000, 20190223131]]
            }"#,
        )
        .unwrap();
        let points = price_points(resp);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, Decimal::from_str("71246.95").unwrap());
        assert_eq!(points[1].time.timestamp_millis(), 1_711_933_200_000);
    }
}

// =============================================================================
// View models over a local fetcher
// =============================================================================

mod view_models {
    use super::*;
    use async_trait::async_trait;
    use coinscope::domain::price_history::PricePoint;
    use coinscope::error::{HttpError, SdkError};
    use coinscope::fetch::MarketDataFetcher;
    use coinscope::shared::{ChartRange, CurrencyPreference};
    use coinscope::view::{DetailViewModel, ListViewModel, USER_ERROR_MESSAGE};
    use std::sync::Arc;

    /// Serves the markets fixture; every detail lookup is a 404.
    struct FixtureFetcher;

    #[async_trait]
    impl MarketDataFetcher for FixtureFetcher {
        async fn fetch_list(&self, _currency: &CurrencyCode) -> Result<Vec<CoinSummary>, SdkError> {
            let rows: Vec<CoinMarketResponse> = serde_json::from_str(market_rows_json())?;
            Ok(summaries_from_rows(rows))
        }

        async fn fetch_detail(&self, id: &CoinId) -> Result<CoinDetail, SdkError> {
            Err(HttpError::NotFound(format!("coin {id}")).into())
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

    fn market_rows_json() -> &'static str {
        r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "image": "b.png",
             "current_price": 67187.33, "market_cap": 1317802988326, "price_change_percentage_24h": -1.25},
            {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "image": "e.png",
             "current_price": 3379.26, "market_cap": 405826574185, "price_change_percentage_24h": 2.71},
            {"id": "broken", "symbol": "brk", "name": "Broken", "image": "x.png"}
        ]"#
    }

    #[tokio::test]
    async fn test_list_renders_formatted_rows() {
        let mut vm = ListViewModel::new(
            Arc::new(FixtureFetcher),
            Arc::new(CurrencyPreference::default()),
        );
        vm.mount().await;

        let view = vm.view();
        assert!(!view.is_loading);
        assert_eq!(view.visible_rows.len(), 2);
        assert_eq!(view.pagination.total_pages, 1);

        let rows = vm.formatted_rows();
        assert_eq!(rows[0].price, "$ 67,187.33");
        assert_eq!(rows[0].change_24h, "-1.25%");
        assert!(!rows[0].is_gain);
        assert_eq!(rows[0].market_cap, "$ 1,317,802 M");
        assert_eq!(rows[1].change_24h, "+2.71%");
    }

    #[tokio::test]
    async fn test_detail_not_found_shows_generic_error() {
        let mut vm = DetailViewModel::new(
            Arc::new(FixtureFetcher),
            Arc::new(CurrencyPreference::default()),
            CoinId::from("no-such-coin"),
        );
        vm.mount().await;

        let view = vm.view();
        let reason = view.error.expect("detail should fail");
        assert_eq!(reason.kind, coinscope::error::ErrorKind::NotFound);
        assert_eq!(reason.user_message(), USER_ERROR_MESSAGE);
        assert!(view.detail.is_none());
    }
}
