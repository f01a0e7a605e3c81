//! Market Financial Evaluation Assistant (MFEA)
//!
//! Reads the S&P 500 trend and volatility plus the 3-month treasury yield and
//! maps them to one of four leveraged-allocation tiers:
//!
//! - Above the 220-day SMA with volatility under 14%: Risk ON (3x)
//! - Above the SMA with volatility under 24%: Risk MID (2x)
//! - Otherwise a 3-month yield under 4% selects Risk ALT (leverage plus bonds)
//! - Everything else is Risk OFF (1x)
//!
//! # Architecture
//!
//! - [`api`]: HTTP clients for Yahoo Finance, the CNBC quote page and FRED
//! - [`source`]: acquisition traits (`MarketDataProvider`, `RateSource`) and their
//!   live implementations
//! - [`market`]: price series and the derived snapshot (SMA 220, volatility)
//! - [`engine`]: the pure decision rule and the evaluator that feeds it
//! - [`interface`] and [`bot`]: formatting, commands and the chat bot
//!
//! # Example
//!
//! ```rust,ignore
//! use mfea_market::{MarketEvaluator, MfeaConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MfeaConfig::from_env()?;
//!     let evaluator = MarketEvaluator::from_config(&config)?;
//!
//!     let evaluation = evaluator.evaluate().await?;
//!     println!("{}", evaluation.recommendation.level);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod market;
pub mod source;

// Re-export main types for convenience
pub use config::{MfeaConfig, RatePolicy, RateProviderKind};
pub use engine::{Evaluation, MarketEvaluator, RateStatus, Recommendation, RiskLevel, recommend};
pub use error::{MarketError, Result};
pub use interface::RecommendationReport;
pub use market::{MarketSnapshot, PriceSeries, TreasuryRate};
pub use source::{MarketDataProvider, RateSource};
