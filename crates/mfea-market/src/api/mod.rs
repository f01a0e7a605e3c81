//! API clients for market and rate data providers

pub mod cnbc;
pub mod fred;
pub mod yahoo;

pub use cnbc::{CnbcQuoteClient, extract_last_price, parse_rate_text};
pub use fred::{FredClient, ParsedObservation, series as fred_series};
pub use yahoo::YahooFinanceClient;
