//! Risk-tier decision tree

use crate::market::{MarketSnapshot, TreasuryRate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this annualized volatility an above-trend market is Risk ON
pub const VOLATILITY_LOW_PCT: f64 = 14.0;
/// Below this annualized volatility an above-trend market is Risk MID
pub const VOLATILITY_HIGH_PCT: f64 = 24.0;
/// Below this 3-month yield the bond blend (Risk ALT) is preferred over cash-like 1x
pub const RATE_THRESHOLD_PCT: f64 = 4.0;

/// Recommendation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 3x leveraged equity
    On,
    /// 2x leveraged equity
    Mid,
    /// Leveraged equity blended with long-duration bonds
    Alt,
    /// Unleveraged equity
    Off,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::On, Self::Mid, Self::Alt, Self::Off];

    /// Short tier name, e.g. "Risk ON"
    pub fn label(&self) -> &'static str {
        match self {
            Self::On => "Risk ON",
            Self::Mid => "Risk MID",
            Self::Alt => "Risk ALT",
            Self::Off => "Risk OFF",
        }
    }

    /// Target allocation for the tier
    pub fn allocation(&self) -> &'static str {
        match self {
            Self::On => "100% UPRO or 3x (100% SPY)",
            Self::Mid => "100% SSO or 2x (100% SPY)",
            Self::Alt => "25% UPRO + 75% ZROZ or 1.5x (50% SPY + 50% ZROZ)",
            Self::Off => "100% SPY or 1x (100% SPY)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.allocation())
    }
}

/// Engine output: the tier plus the inputs it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub level: RiskLevel,
    pub last_close: f64,
    pub sma_220: f64,
    pub volatility_pct: f64,
    pub rate_pct: Option<f64>,
}

/// Map market inputs to a risk tier.
///
/// Thresholds are exclusive upper bounds on the riskier branch, so boundary
/// values land on the more conservative tier. A missing rate never selects
/// Risk ALT.
pub fn recommend(snapshot: MarketSnapshot, rate: Option<TreasuryRate>) -> Recommendation {
    let rate_pct = rate.map(|r| r.rate_pct);
    let low_rate = rate_pct.is_some_and(|r| r < RATE_THRESHOLD_PCT);
    let defensive = if low_rate { RiskLevel::Alt } else { RiskLevel::Off };

    let level = if snapshot.is_above_trend() {
        if snapshot.volatility_pct < VOLATILITY_LOW_PCT {
            RiskLevel::On
        } else if snapshot.volatility_pct < VOLATILITY_HIGH_PCT {
            RiskLevel::Mid
        } else {
            defensive
        }
    } else {
        defensive
    };

    Recommendation {
        level,
        last_close: snapshot.last_close,
        sma_220: snapshot.sma_220,
        volatility_pct: snapshot.volatility_pct,
        rate_pct,
    }
}
