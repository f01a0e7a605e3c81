//! Federal Reserve Economic Data (FRED) API client
//!
//! FRED is a database maintained by the Federal Reserve Bank of St. Louis.
//! It publishes the 3-month T-bill secondary market rate as a stable,
//! documented series, which makes it the drop-in replacement for scraping.
//!
//! API Key: Free registration at https://fred.stlouisfed.org/docs/api/api_key.html
//! Rate Limit: 120 requests per minute

use crate::error::{MarketError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred";
const DEFAULT_RATE_LIMIT: NonZeroU32 = NonZeroU32::new(120).unwrap();
/// Observations requested per lookup; FRED marks holidays with "."
const LOOKBACK_OBSERVATIONS: u32 = 10;

/// FRED series IDs used by MFEA
pub mod series {
    /// 3-Month Treasury Bill Secondary Market Rate
    pub const TREASURY_3M: &str = "DTB3";
}

/// Observation data from FRED series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Date of observation (YYYY-MM-DD)
    pub date: String,
    /// Value (can be "." for missing data)
    pub value: String,
}

/// Parsed observation with numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedObservation {
    pub date: String,
    pub value: f64,
}

/// FRED observations response
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

/// FRED API client
#[derive(Clone)]
pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

impl std::fmt::Debug for FredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FredClient {
    /// Create a new FRED client
    ///
    /// # Arguments
    /// * `api_key` - FRED API key
    /// * `rate_limit` - Requests per minute (default 120)
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        rate_limit: Option<u32>,
        timeout: Duration,
    ) -> Result<Self> {
        let per_minute = rate_limit
            .and_then(NonZeroU32::new)
            .unwrap_or(DEFAULT_RATE_LIMIT);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: FRED_BASE_URL.to_string(),
            rate_limiter,
        })
    }

    /// Point the client at another host (used for proxies and tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get recent observations for a series, newest first
    pub async fn get_observations(&self, series_id: &str, limit: u32) -> Result<Vec<Observation>> {
        self.rate_limiter.until_ready().await;

        let limit = limit.to_string();
        let params = [
            ("series_id", series_id),
            ("api_key", self.api_key.as_str()),
            ("file_type", "json"),
            ("sort_order", "desc"),
            ("limit", limit.as_str()),
        ];

        let url = format!("{}/series/observations", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| MarketError::unavailable(format!("FRED request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MarketError::unavailable(format!(
                "FRED API error: {}",
                response.status()
            )));
        }

        let data: ObservationsResponse = response.json().await.map_err(|e| {
            MarketError::unavailable(format!("Failed to parse FRED response: {e}"))
        })?;

        Ok(data.observations)
    }

    /// Get the most recent numeric value for a series
    pub async fn get_latest(&self, series_id: &str) -> Result<ParsedObservation> {
        let observations = self
            .get_observations(series_id, LOOKBACK_OBSERVATIONS)
            .await?;

        latest_numeric(observations).ok_or_else(|| {
            MarketError::unavailable(format!("No numeric observations for {series_id}"))
        })
    }
}

/// First observation whose value parses; FRED uses "." for missing days
fn latest_numeric(observations: Vec<Observation>) -> Option<ParsedObservation> {
    observations.into_iter().find_map(|obs| {
        let value = obs.value.trim().parse::<f64>().ok()?;
        Some(ParsedObservation {
            date: obs.date,
            value,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, value: &str) -> Observation {
        Observation {
            date: date.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_series_constants() {
        assert_eq!(series::TREASURY_3M, "DTB3");
    }

    #[test]
    fn test_client_creation() {
        let client = FredClient::new("test_key", None, Duration::from_secs(5)).unwrap();
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.base_url, FRED_BASE_URL);

        // Zero falls back to the default quota instead of panicking.
        assert!(FredClient::new("k", Some(0), Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_latest_numeric_skips_missing() {
        let parsed = latest_numeric(vec![
            obs("2025-07-04", "."),
            obs("2025-07-03", "4.25"),
            obs("2025-07-02", "4.27"),
        ])
        .unwrap();

        assert_eq!(parsed.date, "2025-07-03");
        assert_eq!(parsed.value, 4.25);
    }

    #[test]
    fn test_latest_numeric_all_missing() {
        assert!(latest_numeric(vec![obs("2025-07-04", ".")]).is_none());
        assert!(latest_numeric(Vec::new()).is_none());
    }

    #[test]
    fn test_parse_observations_payload() {
        let payload = r#"{"observations":[{"date":"2025-07-03","value":"4.25"}]}"#;
        let parsed: ObservationsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.observations.len(), 1);
        assert_eq!(parsed.observations[0].value, "4.25");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_data_unavailable() {
        let client = FredClient::new("k", None, Duration::from_millis(200))
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let err = client.get_latest(series::TREASURY_3M).await.unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn test_get_latest() {
        let key = std::env::var("FRED_API_KEY").unwrap();
        let client = FredClient::new(key, None, Duration::from_secs(10)).unwrap();
        let obs = client.get_latest(series::TREASURY_3M).await.unwrap();
        assert!(!obs.date.is_empty());
        assert!(obs.value >= 0.0);
    }
}
