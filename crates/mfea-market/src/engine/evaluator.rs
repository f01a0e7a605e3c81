//! Market evaluator: acquire inputs, apply the rule

use crate::config::{MfeaConfig, RatePolicy};
use crate::engine::recommendation::{Recommendation, recommend};
use crate::error::{MarketError, Result};
use crate::market::{MarketSnapshot, TreasuryRate};
use crate::source::{MarketDataProvider, RateSource, YahooMarketData, build_rate_source};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether the rate made it into the evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RateStatus {
    Available,
    /// The rate could not be fetched; carries the reason
    Unavailable(String),
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub recommendation: Recommendation,
    pub rate_status: RateStatus,
}

impl Evaluation {
    /// Reason the rate is missing, if it is
    pub fn rate_warning(&self) -> Option<&str> {
        match &self.rate_status {
            RateStatus::Available => None,
            RateStatus::Unavailable(reason) => Some(reason),
        }
    }
}

/// Runs the full acquisition and decision sequence
#[derive(Clone)]
pub struct MarketEvaluator {
    market: Arc<dyn MarketDataProvider>,
    rates: Arc<dyn RateSource>,
    timeout: Duration,
    rate_policy: RatePolicy,
}

impl std::fmt::Debug for MarketEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketEvaluator")
            .field("rate_source", &self.rates.name())
            .field("timeout", &self.timeout)
            .field("rate_policy", &self.rate_policy)
            .finish_non_exhaustive()
    }
}

impl MarketEvaluator {
    pub fn new(market: Arc<dyn MarketDataProvider>, rates: Arc<dyn RateSource>) -> Self {
        Self {
            market,
            rates,
            timeout: DEFAULT_TIMEOUT,
            rate_policy: RatePolicy::default(),
        }
    }

    /// Build Yahoo and rate sources from configuration
    pub fn from_config(config: &MfeaConfig) -> Result<Self> {
        let market = Arc::new(YahooMarketData::from_config(config));
        let rates = build_rate_source(config)?;
        Ok(Self::new(market, rates)
            .with_timeout(config.request_timeout)
            .with_rate_policy(config.rate_policy))
    }

    /// Upper bound on each acquisition
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = policy;
        self
    }

    pub fn rate_policy(&self) -> RatePolicy {
        self.rate_policy
    }

    /// Price-derived inputs only
    pub async fn snapshot(&self) -> Result<MarketSnapshot> {
        bounded("market data", self.timeout, self.market.fetch_snapshot()).await
    }

    /// Treasury rate only
    pub async fn rate(&self) -> Result<TreasuryRate> {
        bounded("treasury rate", self.timeout, self.rates.fetch_rate()).await
    }

    /// Fetch both inputs concurrently and apply the rule.
    ///
    /// A market data failure always aborts. A rate failure aborts under
    /// [`RatePolicy::Required`]; otherwise the rule runs without a rate and the
    /// failure is recorded in [`Evaluation::rate_status`].
    #[instrument(skip(self), fields(rate_source = self.rates.name()))]
    pub async fn evaluate(&self) -> Result<Evaluation> {
        let (snapshot, rate) = tokio::join!(self.snapshot(), self.rate());
        let snapshot = snapshot?;

        let (rate, rate_status) = match rate {
            Ok(rate) => (Some(rate), RateStatus::Available),
            Err(e) if self.rate_policy == RatePolicy::Optional => {
                warn!(error = %e, "treasury rate unavailable, continuing without it");
                (None, RateStatus::Unavailable(e.to_string()))
            }
            Err(e) => return Err(e),
        };

        let recommendation = recommend(snapshot, rate);
        info!(
            level = recommendation.level.label(),
            last_close = recommendation.last_close,
            sma_220 = recommendation.sma_220,
            volatility = recommendation.volatility_pct,
            rate = ?recommendation.rate_pct,
            "evaluation complete"
        );

        Ok(Evaluation {
            recommendation,
            rate_status,
        })
    }
}

/// Apply the acquisition timeout and collapse failures into `DataUnavailable`
async fn bounded<T>(
    what: &str,
    limit: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(MarketError::into_unavailable),
        Err(_) => Err(MarketError::unavailable(format!(
            "{what} request timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RiskLevel;
    use crate::source::{MockMarketDataProvider, MockRateSource};
    use async_trait::async_trait;

    fn market_ok(snapshot: MarketSnapshot) -> Arc<dyn MarketDataProvider> {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_fetch_snapshot()
            .times(1)
            .returning(move || Ok(snapshot));
        Arc::new(mock)
    }

    fn market_err(reason: &'static str) -> Arc<dyn MarketDataProvider> {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_fetch_snapshot()
            .returning(move || Err(MarketError::unavailable(reason)));
        Arc::new(mock)
    }

    fn rate_ok(rate: f64) -> Arc<dyn RateSource> {
        let mut mock = MockRateSource::new();
        mock.expect_name().return_const("mock");
        mock.expect_fetch_rate()
            .returning(move || Ok(TreasuryRate::new(rate)));
        Arc::new(mock)
    }

    fn rate_err(reason: &'static str) -> Arc<dyn RateSource> {
        let mut mock = MockRateSource::new();
        mock.expect_name().return_const("mock");
        mock.expect_fetch_rate()
            .returning(move || Err(MarketError::unavailable(reason)));
        Arc::new(mock)
    }

    struct SlowMarket;

    #[async_trait]
    impl MarketDataProvider for SlowMarket {
        async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(MarketSnapshot::new(1.0, 1.0, 1.0))
        }
    }

    #[tokio::test]
    async fn test_evaluate_with_rate() {
        let evaluator = MarketEvaluator::new(
            market_ok(MarketSnapshot::new(90.0, 100.0, 30.0)),
            rate_ok(3.5),
        );

        let evaluation = evaluator.evaluate().await.unwrap();
        assert_eq!(evaluation.recommendation.level, RiskLevel::Alt);
        assert_eq!(evaluation.recommendation.rate_pct, Some(3.5));
        assert_eq!(evaluation.rate_status, RateStatus::Available);
        assert!(evaluation.rate_warning().is_none());
    }

    #[tokio::test]
    async fn test_market_failure_aborts() {
        let evaluator = MarketEvaluator::new(market_err("insufficient history"), rate_ok(3.5));

        let err = evaluator.evaluate().await.unwrap_err();
        assert!(err.is_data_unavailable());
        assert_eq!(err.to_string(), "insufficient history");
    }

    #[tokio::test]
    async fn test_optional_rate_degrades_to_off() {
        let evaluator = MarketEvaluator::new(
            market_ok(MarketSnapshot::new(90.0, 100.0, 10.0)),
            rate_err("treasury rate element missing"),
        );

        let evaluation = evaluator.evaluate().await.unwrap();
        assert_eq!(evaluation.recommendation.level, RiskLevel::Off);
        assert_eq!(evaluation.recommendation.rate_pct, None);
        assert_eq!(
            evaluation.rate_warning(),
            Some("treasury rate element missing")
        );
    }

    #[tokio::test]
    async fn test_optional_rate_does_not_affect_low_volatility() {
        let evaluator = MarketEvaluator::new(
            market_ok(MarketSnapshot::new(110.0, 100.0, 12.0)),
            rate_err("down"),
        );

        let evaluation = evaluator.evaluate().await.unwrap();
        assert_eq!(evaluation.recommendation.level, RiskLevel::On);
    }

    #[tokio::test]
    async fn test_required_rate_aborts() {
        let evaluator = MarketEvaluator::new(
            market_ok(MarketSnapshot::new(110.0, 100.0, 12.0)),
            rate_err("down"),
        )
        .with_rate_policy(RatePolicy::Required);

        let err = evaluator.evaluate().await.unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[tokio::test]
    async fn test_timeout_is_data_unavailable() {
        let evaluator = MarketEvaluator::new(Arc::new(SlowMarket), rate_ok(4.0))
            .with_timeout(Duration::from_millis(50));

        let err = evaluator.snapshot().await.unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_evaluation_serializes_rate_status() {
        let evaluation = Evaluation {
            recommendation: recommend(MarketSnapshot::new(1.0, 2.0, 3.0), None),
            rate_status: RateStatus::Unavailable("down".to_string()),
        };
        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json["rate_status"]["status"], "unavailable");
        assert_eq!(json["rate_status"]["reason"], "down");
        assert_eq!(json["recommendation"]["level"], "off");
    }

    #[test]
    fn test_evaluate_blocking() {
        let evaluator = MarketEvaluator::new(
            market_ok(MarketSnapshot::new(100.0, 90.0, 20.0)),
            rate_ok(5.0),
        );
        let evaluation = tokio_test::block_on(evaluator.evaluate()).unwrap();
        assert_eq!(evaluation.recommendation.level, RiskLevel::Mid);
    }
}
