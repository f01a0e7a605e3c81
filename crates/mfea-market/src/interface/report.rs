//! Machine-readable evaluation report

use crate::engine::{Evaluation, RiskLevel};
use serde::{Deserialize, Serialize};

/// JSON form of an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub last_close: f64,
    pub sma_220: f64,
    pub volatility: f64,
    /// `null` when the rate could not be acquired
    pub treasury_rate: Option<f64>,
    pub recommendation: String,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_warning: Option<String>,
}

impl From<&Evaluation> for RecommendationReport {
    fn from(evaluation: &Evaluation) -> Self {
        let rec = &evaluation.recommendation;
        Self {
            last_close: rec.last_close,
            sma_220: rec.sma_220,
            volatility: rec.volatility_pct,
            treasury_rate: rec.rate_pct,
            recommendation: rec.level.to_string(),
            risk_level: rec.level,
            rate_warning: evaluation.rate_warning().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RateStatus, recommend};
    use crate::market::{MarketSnapshot, TreasuryRate};
    use serde_json::json;

    #[test]
    fn test_report_fields() {
        let evaluation = Evaluation {
            recommendation: recommend(
                MarketSnapshot::new(5200.12, 5010.5, 12.34),
                Some(TreasuryRate::new(4.21)),
            ),
            rate_status: RateStatus::Available,
        };

        let value = serde_json::to_value(RecommendationReport::from(&evaluation)).unwrap();
        assert_eq!(
            value,
            json!({
                "last_close": 5200.12,
                "sma_220": 5010.5,
                "volatility": 12.34,
                "treasury_rate": 4.21,
                "recommendation": "Risk ON - 100% UPRO or 3x (100% SPY)",
                "risk_level": "on",
            })
        );
    }

    #[test]
    fn test_report_without_rate() {
        let evaluation = Evaluation {
            recommendation: recommend(MarketSnapshot::new(90.0, 100.0, 30.0), None),
            rate_status: RateStatus::Unavailable("treasury rate source returned HTTP 503".into()),
        };

        let value = serde_json::to_value(RecommendationReport::from(&evaluation)).unwrap();
        assert!(value["treasury_rate"].is_null());
        assert_eq!(value["risk_level"], "off");
        assert_eq!(
            value["rate_warning"],
            "treasury rate source returned HTTP 503"
        );
    }
}
