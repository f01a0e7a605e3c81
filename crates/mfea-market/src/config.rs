//! Configuration for market evaluation

use crate::error::{MarketError, Result};
use mfea_utils::config::{EnvLookup, duration_secs_var, env_lookup};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference index evaluated by the rule
pub const DEFAULT_SYMBOL: &str = "^GSPC";
/// History window requested from the price provider
pub const DEFAULT_HISTORY_RANGE: &str = "1y";
/// Quote page holding the 3-month treasury yield
pub const DEFAULT_RATE_URL: &str = "https://www.cnbc.com/quotes/US3M";
/// Link shown by the "Links" command
pub const DEFAULT_LINK_URL: &str = "https://testfol.io";

/// Where the treasury rate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateProviderKind {
    /// Scrape the CNBC quote page (default, no API key required)
    #[default]
    Cnbc,
    /// FRED `DTB3` series (requires API key)
    Fred,
}

impl RateProviderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "cnbc" => Ok(Self::Cnbc),
            "fred" => Ok(Self::Fred),
            other => Err(MarketError::ConfigError(format!(
                "Unknown rate provider: {other} (expected cnbc or fred)"
            ))),
        }
    }
}

/// What to do when the treasury rate cannot be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatePolicy {
    /// Continue without a rate; the ALT tier is never selected
    #[default]
    Optional,
    /// Abort the whole request
    Required,
}

impl RatePolicy {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "optional" => Ok(Self::Optional),
            "required" => Ok(Self::Required),
            other => Err(MarketError::ConfigError(format!(
                "Unknown rate policy: {other} (expected optional or required)"
            ))),
        }
    }
}

/// Configuration for market evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfeaConfig {
    /// Index symbol to evaluate
    pub symbol: String,

    /// Yahoo range string for the price history
    pub history_range: String,

    /// Timeout applied to each external call
    pub request_timeout: Duration,

    /// Rate source selection
    pub rate_provider: RateProviderKind,

    /// Quote page used by the CNBC rate source
    pub rate_url: String,

    /// Behaviour when the rate is missing
    pub rate_policy: RatePolicy,

    /// FRED API key (optional)
    pub fred_api_key: Option<String>,

    /// External link for the "Links" command
    pub link_url: String,
}

impl Default for MfeaConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            history_range: DEFAULT_HISTORY_RANGE.to_string(),
            request_timeout: Duration::from_secs(5),
            rate_provider: RateProviderKind::Cnbc,
            rate_url: DEFAULT_RATE_URL.to_string(),
            rate_policy: RatePolicy::Optional,
            fred_api_key: None,
            link_url: DEFAULT_LINK_URL.to_string(),
        }
    }
}

impl MfeaConfig {
    /// Create a new configuration builder
    pub fn builder() -> MfeaConfigBuilder {
        MfeaConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_lookup(&env_lookup)?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(MarketError::ConfigError("symbol must not be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(MarketError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.rate_provider == RateProviderKind::Fred && self.fred_api_key.is_none() {
            return Err(MarketError::ConfigError(
                "FRED API key required when using the fred rate provider".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MfeaConfig
#[derive(Debug, Default)]
pub struct MfeaConfigBuilder {
    symbol: Option<String>,
    history_range: Option<String>,
    request_timeout: Option<Duration>,
    rate_provider: Option<RateProviderKind>,
    rate_url: Option<String>,
    rate_policy: Option<RatePolicy>,
    fred_api_key: Option<String>,
    link_url: Option<String>,
}

impl MfeaConfigBuilder {
    /// Set the index symbol
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the history range
    pub fn history_range(mut self, range: impl Into<String>) -> Self {
        self.history_range = Some(range.into());
        self
    }

    /// Set the per-call timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the rate provider
    pub fn rate_provider(mut self, kind: RateProviderKind) -> Self {
        self.rate_provider = Some(kind);
        self
    }

    /// Set the quote page scraped for the rate
    pub fn rate_url(mut self, url: impl Into<String>) -> Self {
        self.rate_url = Some(url.into());
        self
    }

    /// Set the rate policy
    pub fn rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = Some(policy);
        self
    }

    /// Set the FRED API key
    pub fn fred_api_key(mut self, key: impl Into<String>) -> Self {
        self.fred_api_key = Some(key.into());
        self
    }

    /// Set the external link
    pub fn link_url(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }

    /// Fill any field present in the environment.
    ///
    /// Recognised variables: `MFEA_SYMBOL`, `MFEA_HISTORY_RANGE`,
    /// `MFEA_REQUEST_TIMEOUT_SECS`, `MFEA_RATE_PROVIDER`, `MFEA_RATE_URL`,
    /// `MFEA_RATE_POLICY`, `FRED_API_KEY`, `MFEA_LINK_URL`.
    pub fn with_lookup(mut self, lookup: EnvLookup<'_>) -> Result<Self> {
        if let Some(symbol) = lookup("MFEA_SYMBOL") {
            self.symbol = Some(symbol);
        }
        if let Some(range) = lookup("MFEA_HISTORY_RANGE") {
            self.history_range = Some(range);
        }
        if let Some(raw) = lookup("MFEA_REQUEST_TIMEOUT_SECS") {
            let timeout = duration_secs_var(lookup, "MFEA_REQUEST_TIMEOUT_SECS").ok_or_else(|| {
                MarketError::ConfigError(format!("Invalid MFEA_REQUEST_TIMEOUT_SECS: {raw}"))
            })?;
            self.request_timeout = Some(timeout);
        }
        if let Some(kind) = lookup("MFEA_RATE_PROVIDER") {
            self.rate_provider = Some(RateProviderKind::parse(&kind)?);
        }
        if let Some(url) = lookup("MFEA_RATE_URL") {
            self.rate_url = Some(url);
        }
        if let Some(policy) = lookup("MFEA_RATE_POLICY") {
            self.rate_policy = Some(RatePolicy::parse(&policy)?);
        }
        if let Some(key) = lookup("FRED_API_KEY") {
            self.fred_api_key = Some(key);
        }
        if let Some(url) = lookup("MFEA_LINK_URL") {
            self.link_url = Some(url);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<MfeaConfig> {
        let defaults = MfeaConfig::default();

        let config = MfeaConfig {
            symbol: self.symbol.unwrap_or(defaults.symbol),
            history_range: self.history_range.unwrap_or(defaults.history_range),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_provider: self.rate_provider.unwrap_or(defaults.rate_provider),
            rate_url: self.rate_url.unwrap_or(defaults.rate_url),
            rate_policy: self.rate_policy.unwrap_or(defaults.rate_policy),
            fred_api_key: self.fred_api_key,
            link_url: self.link_url.unwrap_or(defaults.link_url),
        };

        config.validate()?;
        Ok(config)
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
    fn test_default_config() {
        let config = MfeaConfig::default();
        assert_eq!(config.symbol, "^GSPC");
        assert_eq!(config.history_range, "1y");
        assert_eq!(config.rate_provider, RateProviderKind::Cnbc);
        assert_eq!(config.rate_policy, RatePolicy::Optional);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = MfeaConfig::builder()
            .symbol("^SPX")
            .request_timeout(Duration::from_secs(3))
            .rate_policy(RatePolicy::Required)
            .build()
            .unwrap();

        assert_eq!(config.symbol, "^SPX");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.rate_policy, RatePolicy::Required);
    }

    #[test]
    fn test_validation_fred_without_key() {
        let result = MfeaConfig::builder()
            .rate_provider(RateProviderKind::Fred)
            .build();
        assert!(matches!(result, Err(MarketError::ConfigError(_))));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = MfeaConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let lookup = lookup_from(&[
            ("MFEA_RATE_PROVIDER", "FRED"),
            ("FRED_API_KEY", "test_key"),
            ("MFEA_RATE_POLICY", "required"),
            ("MFEA_REQUEST_TIMEOUT_SECS", "8"),
        ]);
        let config = MfeaConfig::builder()
            .with_lookup(&lookup)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.rate_provider, RateProviderKind::Fred);
        assert_eq!(config.fred_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.rate_policy, RatePolicy::Required);
        assert_eq!(config.request_timeout, Duration::from_secs(8));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let lookup = lookup_from(&[("MFEA_RATE_POLICY", "sometimes")]);
        assert!(MfeaConfig::builder().with_lookup(&lookup).is_err());

        let lookup = lookup_from(&[("MFEA_REQUEST_TIMEOUT_SECS", "soon")]);
        assert!(MfeaConfig::builder().with_lookup(&lookup).is_err());
    }
}
