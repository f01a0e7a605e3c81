//! Snapshot derivation: last close, 220-day SMA, 30-day annualized volatility

use crate::error::{MarketError, Result};
use crate::market::series::PriceSeries;
use serde::{Deserialize, Serialize};
use ta::{Next, indicators::SimpleMovingAverage};

/// Trend window in trading days
pub const SMA_WINDOW: usize = 220;
/// Closes used for the volatility estimate (29 daily returns)
pub const VOLATILITY_WINDOW: usize = 30;
/// Annualization factor for daily returns
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Round to two decimal places, halves to even (3.125 -> 3.12)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Inputs to the recommendation rule derived from one price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub last_close: f64,
    pub sma_220: f64,
    pub volatility_pct: f64,
}

impl MarketSnapshot {
    pub fn new(last_close: f64, sma_220: f64, volatility_pct: f64) -> Self {
        Self {
            last_close,
            sma_220,
            volatility_pct,
        }
    }

    /// Derive the snapshot from a daily series.
    ///
    /// Fails with `DataUnavailable` when the series is empty, shorter than the
    /// SMA window, or lacks the recent closes needed for volatility.
    pub fn from_series(series: &PriceSeries) -> Result<Self> {
        let Some(latest) = series.latest() else {
            return Err(MarketError::unavailable("empty series"));
        };

        if series.len() < SMA_WINDOW {
            return Err(MarketError::unavailable("insufficient history"));
        }

        let trend_window: Vec<f64> = series
            .last_closes(SMA_WINDOW)
            .iter()
            .map(|p| p.close)
            .collect();
        let sma = simple_moving_average(&trend_window, SMA_WINDOW)?;

        let recent: Vec<f64> = series
            .last_closes(VOLATILITY_WINDOW)
            .iter()
            .map(|p| p.close)
            .collect();
        if recent.len() < VOLATILITY_WINDOW {
            return Err(MarketError::unavailable("insufficient recent history"));
        }
        let volatility = annualized_volatility_pct(&recent)
            .ok_or_else(|| MarketError::unavailable("invalid price data"))?;

        tracing::debug!(
            symbol = series.symbol(),
            points = series.len(),
            last_close = latest.close,
            sma,
            volatility,
            "derived market snapshot"
        );

        Ok(Self {
            last_close: round2(latest.close),
            sma_220: round2(sma),
            volatility_pct: round2(volatility),
        })
    }

    /// Strictly above the 220-day trend
    pub fn is_above_trend(&self) -> bool {
        self.last_close > self.sma_220
    }
}

/// 3-month treasury yield in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreasuryRate {
    pub rate_pct: f64,
}

impl TreasuryRate {
    pub fn new(rate_pct: f64) -> Self {
        Self { rate_pct }
    }
}

/// Last value of a `period` SMA over `closes`
fn simple_moving_average(closes: &[f64], period: usize) -> Result<f64> {
    let mut sma =
        SimpleMovingAverage::new(period).map_err(|e| MarketError::Other(format!("{e:?}")))?;
    let mut current = 0.0;
    for &close in closes {
        current = sma.next(close);
    }
    Ok(current)
}

/// Sample standard deviation of daily returns, annualized, in percent.
///
/// Returns `None` for fewer than two returns or non-finite input.
fn annualized_volatility_pct(closes: &[f64]) -> Option<f64> {
    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let std_dev = sample_std_dev(&returns)?;
    let annualized = std_dev * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;
    annualized.is_finite().then_some(annualized)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}
