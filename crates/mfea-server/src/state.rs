//! Application state

use mfea_market::MarketEvaluator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Runs the market check
    pub evaluator: Arc<MarketEvaluator>,

    /// Target of the links endpoint
    pub link_url: Arc<str>,
}

impl AppState {
    pub fn new(evaluator: MarketEvaluator, link_url: impl Into<Arc<str>>) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            link_url: link_url.into(),
        }
    }
}
