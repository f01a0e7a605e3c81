//! Treasury rate sources

use crate::api::{CnbcQuoteClient, FredClient, fred_series};
use crate::config::{MfeaConfig, RateProviderKind};
use crate::error::{MarketError, Result};
use crate::market::{TreasuryRate, round2};
use crate::source::RateSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Rate scraped from a CNBC quote page
#[derive(Debug, Clone)]
pub struct CnbcRateSource {
    client: CnbcQuoteClient,
    url: String,
}

impl CnbcRateSource {
    pub fn new(client: CnbcQuoteClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for CnbcRateSource {
    fn name(&self) -> &'static str {
        "cnbc"
    }

    async fn fetch_rate(&self) -> Result<TreasuryRate> {
        let rate = self.client.get_rate(&self.url).await?;
        Ok(TreasuryRate::new(rate))
    }
}

/// Rate read from the FRED `DTB3` series
#[derive(Debug, Clone)]
pub struct FredRateSource {
    client: FredClient,
}

impl FredRateSource {
    pub fn new(client: FredClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RateSource for FredRateSource {
    fn name(&self) -> &'static str {
        "fred"
    }

    async fn fetch_rate(&self) -> Result<TreasuryRate> {
        let obs = self.client.get_latest(fred_series::TREASURY_3M).await?;
        tracing::debug!(date = %obs.date, value = obs.value, "FRED treasury observation");
        Ok(TreasuryRate::new(round2(obs.value)))
    }
}

/// Build the rate source selected by `config.rate_provider`
pub fn build_rate_source(config: &MfeaConfig) -> Result<Arc<dyn RateSource>> {
    match config.rate_provider {
        RateProviderKind::Cnbc => {
            let client = CnbcQuoteClient::new(config.request_timeout)?;
            Ok(Arc::new(CnbcRateSource::new(client, &config.rate_url)))
        }
        RateProviderKind::Fred => {
            let key = config.fred_api_key.as_deref().ok_or_else(|| {
                MarketError::ConfigError("FRED_API_KEY environment variable not set".to_string())
            })?;
            let client = FredClient::new(key, None, config.request_timeout)?;
            Ok(Arc::new(FredRateSource::new(client)))
        }
    }
}
