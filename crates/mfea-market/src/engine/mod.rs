//! MFEA decision engine
//!
//! [`recommend`] is the pure rule; [`MarketEvaluator`] acquires its inputs and
//! applies timeouts and the rate policy around it.

pub mod evaluator;
pub mod recommendation;

pub use evaluator::{Evaluation, MarketEvaluator, RateStatus};
pub use recommendation::{
    RATE_THRESHOLD_PCT, Recommendation, RiskLevel, VOLATILITY_HIGH_PCT, VOLATILITY_LOW_PCT,
    recommend,
};
