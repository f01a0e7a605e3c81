//! Daily closing-price series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices for one instrument, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by date and keeping the last close seen for a duplicated date
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    /// Build a series from closes only, dated on consecutive days starting at `start`.
    pub fn from_closes(symbol: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Self {
        let points = start
            .iter_days()
            .zip(closes)
            .map(|(date, &close)| PricePoint { date, close })
            .collect();
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All closes, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// The `n` most recent closes (fewer if the series is shorter), oldest first
    pub fn last_closes(&self, n: usize) -> &[PricePoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_new_sorts_and_dedupes() {
        let series = PriceSeries::new(
            "^GSPC",
            vec![
                PricePoint { date: day(3), close: 3.0 },
                PricePoint { date: day(1), close: 1.0 },
                PricePoint { date: day(3), close: 3.5 },
                PricePoint { date: day(2), close: 2.0 },
            ],
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.5]);
        assert_eq!(series.latest().map(|p| p.date), Some(day(3)));
    }

    #[test]
    fn test_last_closes_window() {
        let series = PriceSeries::from_closes("X", day(1), &[1.0, 2.0, 3.0, 4.0]);
        let tail: Vec<f64> = series.last_closes(2).iter().map(|p| p.close).collect();
        assert_eq!(tail, vec![3.0, 4.0]);
        assert_eq!(series.last_closes(10).len(), 4);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("X", Vec::new());
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }
}
