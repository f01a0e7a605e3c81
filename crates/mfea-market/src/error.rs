//! Error types for market evaluation operations

use thiserror::Error;

/// Market evaluation errors
///
/// Every acquisition failure (price history, treasury rate, timeouts) is
/// reported as [`MarketError::DataUnavailable`] so callers only have one kind
/// to surface to the end user.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Required market or rate data could not be acquired
    #[error("{0}")]
    DataUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Command could not be parsed or dispatched
    #[error("Command error: {0}")]
    CommandError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl MarketError {
    /// Shorthand for a [`MarketError::DataUnavailable`] with the given reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable(reason.into())
    }

    /// Whether this error is an acquisition failure
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable(_))
    }

    /// Collapse transport-level failures into `DataUnavailable`, keeping the message.
    ///
    /// Acquisition code calls this at its boundary so that HTTP and JSON errors
    /// from the clients reach the caller as the single acquisition kind.
    pub fn into_unavailable(self) -> Self {
        match self {
            Self::NetworkError(e) => Self::DataUnavailable(format!("request failed: {e}")),
            Self::JsonError(e) => Self::DataUnavailable(format!("malformed response: {e}")),
            other => other,
        }
    }
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Convert anyhow::Error to MarketError
impl From<anyhow::Error> for MarketError {
    fn from(err: anyhow::Error) -> Self {
        MarketError::Other(err.to_string())
    }
}
