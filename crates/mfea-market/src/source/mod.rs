//! Data acquisition capabilities
//!
//! The evaluator only sees these traits, so a scraped source can be swapped
//! for an API-backed one without touching the decision engine.

pub mod market;
pub mod rate;

use crate::error::Result;
use crate::market::{MarketSnapshot, TreasuryRate};
use async_trait::async_trait;

pub use market::YahooMarketData;
pub use rate::{CnbcRateSource, FredRateSource, build_rate_source};

/// Produces the price-derived inputs of the rule
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch history and derive last close, SMA 220 and volatility
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot>;
}

/// Produces the current 3-month treasury yield
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Fetch the current rate in percent
    async fn fetch_rate(&self) -> Result<TreasuryRate>;
}
