//! Price-history backed market data provider

use crate::api::YahooFinanceClient;
use crate::config::MfeaConfig;
use crate::error::Result;
use crate::market::MarketSnapshot;
use crate::source::MarketDataProvider;
use async_trait::async_trait;

/// Snapshot provider reading daily closes from Yahoo Finance
#[derive(Debug, Clone)]
pub struct YahooMarketData {
    client: YahooFinanceClient,
    symbol: String,
    range: String,
}

impl YahooMarketData {
    pub fn new(symbol: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            client: YahooFinanceClient::new(),
            symbol: symbol.into(),
            range: range.into(),
        }
    }

    pub fn from_config(config: &MfeaConfig) -> Self {
        Self::new(&config.symbol, &config.history_range)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        let series = self
            .client
            .get_price_series(&self.symbol, &self.range)
            .await
            .map_err(|e| e.into_unavailable())?;
        MarketSnapshot::from_series(&series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = MfeaConfig::default();
        let provider = YahooMarketData::from_config(&config);
        assert_eq!(provider.symbol(), "^GSPC");
        assert_eq!(provider.range, "1y");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_snapshot_live() {
        let provider = YahooMarketData::new("^GSPC", "1y");
        let snapshot = provider.fetch_snapshot().await.unwrap();
        assert!(snapshot.last_close > 0.0);
        assert!(snapshot.sma_220 > 0.0);
        assert!(snapshot.volatility_pct >= 0.0);
    }
}
