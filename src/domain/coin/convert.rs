//! Conversion: wire responses → `CoinSummary` / `CoinDetail` (TryFrom + validation).

use super::wire;
use super::{first_sentence, CoinDetail, CoinSummary, ValidationError};
use crate::shared::CoinId;
use rust_decimal::Decimal;
use std::collections::HashMap;

fn required<T>(
    value: Option<T>,
    missing: ValidationError,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    if value.is_none() {
        errors.push(missing);
    }
    value
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Drops currencies quoted as null.
fn quoted(map: HashMap<String, Option<Decimal>>) -> HashMap<String, Decimal> {
    map.into_iter()
        .filter_map(|(code, value)| value.map(|v| (code.to_lowercase(), v)))
        .collect()
}

impl TryFrom<wire::CoinMarketResponse> for CoinSummary {
    type Error = ValidationError;

    fn try_from(source: wire::CoinMarketResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let label = source
            .id
            .clone()
            .or_else(|| source.name.clone())
            .unwrap_or_else(|| "<unknown>".to_string());

        let id = required(non_blank(source.id), ValidationError::MissingId, &mut errors);
        let name = required(non_blank(source.name), ValidationError::MissingName, &mut errors);
        let symbol = required(
            non_blank(source.symbol),
            ValidationError::MissingSymbol,
            &mut errors,
        );
        let image = required(
            non_blank(source.image),
            ValidationError::MissingImage,
            &mut errors,
        );
        let current_price = required(
            source.current_price,
            ValidationError::MissingPrice,
            &mut errors,
        );
        let price_change_percent_24h = required(
            source.price_change_percentage_24h,
            ValidationError::MissingPriceChange,
            &mut errors,
        );
        let market_cap = required(
            source.market_cap,
            ValidationError::MissingMarketCap,
            &mut errors,
        );

        match (
            id,
            name,
            symbol,
            image,
            current_price,
            price_change_percent_24h,
            market_cap,
        ) {
            (
                Some(id),
                Some(name),
                Some(symbol),
                Some(image),
                Some(current_price),
                Some(price_change_percent_24h),
                Some(market_cap),
            ) => Ok(CoinSummary {
                id: CoinId::from(id),
                name,
                symbol,
                image,
                current_price,
                price_change_percent_24h,
                market_cap,
            }),
            _ => Err(ValidationError::Multiple(label, errors)),
        }
    }
}

impl TryFrom<wire::CoinDetailResponse> for CoinDetail {
    type Error = ValidationError;

    fn try_from(source: wire::CoinDetailResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let label = source
            .id
            .clone()
            .unwrap_or_else(|| "<unknown>".to_string());

        let id = required(non_blank(source.id), ValidationError::MissingId, &mut errors);
        let name = required(non_blank(source.name), ValidationError::MissingName, &mut errors);
        let image = required(
            non_blank(source.image.and_then(|i| i.large)),
            ValidationError::MissingImage,
            &mut errors,
        );
        let market_cap_rank = required(
            source.market_cap_rank,
            ValidationError::MissingMarketCapRank,
            &mut errors,
        );
        let market_data = required(
            source.market_data,
            ValidationError::MissingMarketData,
            &mut errors,
        );

        let description_short = source
            .description
            .and_then(|d| d.en)
            .map(|en| first_sentence(en.trim()).to_string())
            .unwrap_or_default();

        match (id, name, image, market_cap_rank, market_data) {
            (Some(id), Some(name), Some(image), Some(market_cap_rank), Some(market_data)) => {
                Ok(CoinDetail {
                    id: CoinId::from(id),
                    name,
                    symbol: source.symbol.unwrap_or_default(),
                    image,
                    description_short,
                    market_cap_rank,
                    prices_by_currency: quoted(market_data.current_price),
                    market_caps_by_currency: quoted(market_data.market_cap),
                })
            }
            _ => Err(ValidationError::Multiple(label, errors)),
        }
    }
}
