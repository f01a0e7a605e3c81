//! Market data model
//!
//! Request-scoped values: a [`PriceSeries`] is fetched, reduced to a
//! [`MarketSnapshot`], and discarded.

pub mod series;
pub mod snapshot;

pub use series::{PricePoint, PriceSeries};
pub use snapshot::{
    MarketSnapshot, SMA_WINDOW, TRADING_DAYS_PER_YEAR, TreasuryRate, VOLATILITY_WINDOW, round2,
};
