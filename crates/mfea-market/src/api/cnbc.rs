//! CNBC quote page client
//!
//! CNBC has no public quote API; the last price is read out of the quote
//! strip markup. Any layout change on the page is reported as
//! `DataUnavailable`, never as a default value.

use crate::error::{MarketError, Result};
use crate::market::round2;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

/// Class marking the last traded value on a CNBC quote page
pub const LAST_PRICE_CLASS: &str = "QuoteStrip-lastPrice";

static LAST_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<span\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?QuoteStrip-lastPrice(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
    )
    .expect("last-price pattern is valid")
});

/// Client for CNBC quote pages
#[derive(Debug, Clone)]
pub struct CnbcQuoteClient {
    client: Client,
}

impl CnbcQuoteClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mfea/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url` and return the trimmed last-price text
    pub async fn get_quote_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketError::from(e).into_unavailable())?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::unavailable(format!(
                "treasury rate source returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketError::from(e).into_unavailable())?;

        extract_last_price(&body).ok_or_else(|| {
            MarketError::unavailable(format!(
                "treasury rate element `{LAST_PRICE_CLASS}` not found on {url}"
            ))
        })
    }

    /// Fetch `url` and parse the last price as a percentage
    pub async fn get_rate(&self, url: &str) -> Result<f64> {
        let text = self.get_quote_text(url).await?;
        parse_rate_text(&text)
    }
}

/// Text of the first last-price span, trimmed. `None` if absent or blank.
pub fn extract_last_price(html: &str) -> Option<String> {
    let captures = LAST_PRICE_RE.captures(html)?;
    let inner = captures.get(1)?.as_str();
    let text = strip_tags(inner).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Parse "4.12%" or "4.12" into 4.12, rounded to two decimals
pub fn parse_rate_text(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: f64 = number.parse().map_err(|_| {
        MarketError::unavailable(format!("treasury rate text is not a number: {trimmed:?}"))
    })?;
    if !value.is_finite() {
        return Err(MarketError::unavailable(format!(
            "treasury rate text is not a number: {trimmed:?}"
        )));
    }
    Ok(round2(value))
}

/// Drop nested markup so `<span>4.1<!-- -->%</span>` style output reads as text
fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
