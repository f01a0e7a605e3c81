//! Yahoo Finance API client

use crate::error::{MarketError, Result};
use crate::market::{PricePoint, PriceSeries};
use chrono::{DateTime, Utc};
use yahoo_finance_api as yahoo;

/// Ranges accepted by [`YahooFinanceClient::get_price_series`]
pub const SUPPORTED_RANGES: &[&str] = &["1mo", "3mo", "6mo", "1y", "2y", "5y"];

/// Yahoo Finance API client
#[derive(Debug, Default, Clone)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get daily closes for `symbol` over `range` (e.g. "1y")
    pub async fn get_price_series(&self, symbol: &str, range: &str) -> Result<PriceSeries> {
        if !SUPPORTED_RANGES.contains(&range) {
            return Err(MarketError::ConfigError(format!("Invalid range: {range}")));
        }

        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::unavailable(format!("Yahoo Finance error: {e}")))?;

        let response = provider
            .get_quote_range(symbol, "1d", range)
            .await
            .map_err(|e| MarketError::unavailable(format!("Yahoo Finance error: {e}")))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::unavailable(format!("Yahoo Finance error: {e}")))?;

        let points = quotes
            .iter()
            .filter_map(|q| to_point(q.timestamp as i64, q.close))
            .collect::<Vec<_>>();

        tracing::debug!(
            symbol,
            range,
            received = quotes.len(),
            kept = points.len(),
            "fetched Yahoo price history"
        );

        Ok(PriceSeries::new(symbol, points))
    }
}

/// Daily point from a quote, skipping closes that cannot be used for returns
fn to_point(timestamp: i64, close: f64) -> Option<PricePoint> {
    if !close.is_finite() || close <= 0.0 {
        return None;
    }
    let date = DateTime::<Utc>::from_timestamp(timestamp, 0)?.date_naive();
    Some(PricePoint { date, close })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_point_filters_bad_closes() {
        assert!(to_point(1_700_000_000, f64::NAN).is_none());
        assert!(to_point(1_700_000_000, 0.0).is_none());
        assert!(to_point(1_700_000_000, -3.0).is_none());

        let point = to_point(1_700_000_000, 4500.25).unwrap();
        assert_eq!(point.date, NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
        assert_eq!(point.close, 4500.25);
    }

    #[tokio::test]
    async fn test_rejects_unknown_range() {
        let client = YahooFinanceClient::new();
        let err = client.get_price_series("^GSPC", "7y").await.unwrap_err();
        assert!(matches!(err, MarketError::ConfigError(_)));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_price_series() {
        let client = YahooFinanceClient::new();
        let series = client.get_price_series("^GSPC", "1y").await.unwrap();
        assert!(series.len() > 200);
        assert!(series.latest().unwrap().close > 0.0);
    }
}
