//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Source of environment values.
///
/// Production code passes [`env_lookup`]; tests pass a closure over a map so
/// nothing touches the process environment.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable from the process environment, treating blank values as unset
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Look up `key` and parse it, returning `None` when unset or unparseable
pub fn parse_var<T: FromStr>(lookup: EnvLookup<'_>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse::<T>().ok())
}

/// Look up `key` as a number of whole seconds
pub fn duration_secs_var(lookup: EnvLookup<'_>, key: &str) -> Option<Duration> {
    parse_var::<u64>(lookup, key).map(Duration::from_secs)
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "mfea".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load from `MFEA_APP_NAME` and `MFEA_ENV`, keeping defaults for anything unset
    pub fn from_lookup(lookup: EnvLookup<'_>) -> Self {
        let defaults = Self::default();
        Self {
            app_name: lookup("MFEA_APP_NAME").unwrap_or(defaults.app_name),
            environment: lookup("MFEA_ENV").unwrap_or(defaults.environment),
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "prod" | "production")
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
    fn test_config_defaults() {
        let lookup = lookup_from(&[]);
        let config = Config::from_lookup(&lookup);
        assert_eq!(config.app_name, "mfea");
        assert!(!config.is_production());
    }

    #[test]
    fn test_config_from_lookup() {
        let lookup = lookup_from(&[("MFEA_APP_NAME", "mfea-bot"), ("MFEA_ENV", "prod")]);
        let config = Config::from_lookup(&lookup);
        assert_eq!(config.app_name, "mfea-bot");
        assert!(config.is_production());
    }

    #[test]
    fn test_parse_helpers() {
        let lookup = lookup_from(&[("PORT", " 9090 "), ("BAD", "abc"), ("TIMEOUT", "7")]);
        assert_eq!(parse_var::<u16>(&lookup, "PORT"), Some(9090));
        assert_eq!(parse_var::<u16>(&lookup, "BAD"), None);
        assert_eq!(parse_var::<u16>(&lookup, "MISSING"), None);
        assert_eq!(
            duration_secs_var(&lookup, "TIMEOUT"),
            Some(Duration::from_secs(7))
        );
    }
}
