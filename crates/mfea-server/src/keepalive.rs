//! Periodic self-ping for hosts that idle out quiet services

use anyhow::Context;
use mfea_utils::config::{EnvLookup, duration_secs_var};
use std::time::Duration;
use tokio::task::JoinHandle;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAliveConfig {
    pub url: String,
    pub interval: Duration,
}

impl KeepAliveConfig {
    /// `MFEA_KEEPALIVE_URL` enables the task; `MFEA_KEEPALIVE_INTERVAL_SECS`
    /// overrides the ten-minute default.
    pub fn from_lookup(lookup: EnvLookup<'_>) -> anyhow::Result<Option<Self>> {
        let Some(url) = lookup("MFEA_KEEPALIVE_URL") else {
            return Ok(None);
        };

        let interval = match lookup("MFEA_KEEPALIVE_INTERVAL_SECS") {
            None => DEFAULT_INTERVAL,
            Some(raw) => duration_secs_var(lookup, "MFEA_KEEPALIVE_INTERVAL_SECS")
                .filter(|d| !d.is_zero())
                .with_context(|| format!("invalid MFEA_KEEPALIVE_INTERVAL_SECS: {raw}"))?,
        };

        Ok(Some(Self { url, interval }))
    }
}

/// Ping `config.url` every `config.interval` until the runtime shuts down
pub fn spawn(config: KeepAliveConfig, client: reqwest::Client) -> JoinHandle<()> {
    tracing::info!(url = %config.url, interval_secs = config.interval.as_secs(), "keep-alive enabled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.interval);
        // First tick completes immediately; the server has only just started.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            ping(&client, &config.url).await;
        }
    })
}

async fn ping(client: &reqwest::Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            tracing::debug!(url, status = %response.status(), "keep-alive ok");
            true
        }
        Ok(response) => {
            tracing::warn!(url, status = %response.status(), "keep-alive got non-success status");
            false
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "keep-alive request failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_disabled_without_url() {
        let lookup = lookup_from(&[("MFEA_KEEPALIVE_INTERVAL_SECS", "60")]);
        assert!(KeepAliveConfig::from_lookup(&lookup).unwrap().is_none());
    }

    #[test]
    fn test_default_interval() {
        let lookup = lookup_from(&[("MFEA_KEEPALIVE_URL", "https://mfea.example/")]);
        let config = KeepAliveConfig::from_lookup(&lookup).unwrap().unwrap();
        assert_eq!(config.url, "https://mfea.example/");
        assert_eq!(config.interval, Duration::from_secs(600));
    }

    #[test]
    fn test_interval_override_and_validation() {
        let lookup = lookup_from(&[
            ("MFEA_KEEPALIVE_URL", "https://mfea.example/"),
            ("MFEA_KEEPALIVE_INTERVAL_SECS", "30"),
        ]);
        let config = KeepAliveConfig::from_lookup(&lookup).unwrap().unwrap();
        assert_eq!(config.interval, Duration::from_secs(30));

        for bad in ["0", "soon"] {
            let lookup = lookup_from(&[
                ("MFEA_KEEPALIVE_URL", "https://mfea.example/"),
                ("MFEA_KEEPALIVE_INTERVAL_SECS", bad),
            ]);
            assert!(KeepAliveConfig::from_lookup(&lookup).is_err(), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_ping_unreachable_reports_failure() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        assert!(!ping(&client, "http://127.0.0.1:9/").await);
    }
}
