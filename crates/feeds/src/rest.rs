//! REST client for the upstream rate feed.
//!
//! The feed exposes a single read-only listing of `{name, value}` entries.
//! Pair resolution happens locally: exact orientation first, then the
//! reciprocal of the opposite orientation.

use crate::{FeedError, RateSource};
use async_trait::async_trait;
use ratewatch_core::{CurrencyPair, PairQuote};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// One listed pair in the feed response.
#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    /// Listing name, e.g. "USD/BDT".
    pub name: String,
    /// Listed rate.
    pub value: f64,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    data: Vec<RateEntry>,
}

/// Resolve a pair against a feed listing.
///
/// The exact `BASE/COUNTER` entry wins; otherwise `COUNTER/BASE` is
/// reciprocated and flagged inverted. A zero value in the opposite
/// orientation has no reciprocal and is rejected as invalid feed data.
pub fn resolve_pair(entries: &[RateEntry], pair: &CurrencyPair) -> Result<PairQuote, FeedError> {
    let direct = pair.name();
    if let Some(entry) = entries.iter().find(|e| e.name == direct) {
        return Ok(PairQuote {
            rate: entry.value,
            source_pair: entry.name.as_str().into(),
            inverted: false,
        });
    }

    let opposite = pair.inverse().name();
    if let Some(entry) = entries.iter().find(|e| e.name == opposite) {
        if entry.value == 0.0 {
            return Err(FeedError::ZeroRate(entry.name.clone()));
        }
        return Ok(PairQuote {
            rate: 1.0 / entry.value,
            source_pair: entry.name.as_str().into(),
            inverted: true,
        });
    }

    Err(FeedError::PairNotFound(pair.to_string()))
}

/// Rate source backed by the feed's REST listing endpoint.
pub struct RestRateSource {
    client: reqwest::Client,
    url: String,
}

impl RestRateSource {
    /// Bounded timeout for listing fetches.
    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client for the given listing URL.
    pub fn new(url: impl Into<String>) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch the full listing.
    async fn fetch_listing(&self) -> Result<Vec<RateEntry>, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Upstream(format!("HTTP {}", response.status())));
        }
        let parsed: RatesResponse = response.json().await?;
        debug!(entries = parsed.data.len(), "fetched feed listing");
        Ok(parsed.data)
    }
}

#[async_trait]
impl RateSource for RestRateSource {
    async fn quote(&self, pair: &CurrencyPair) -> Result<PairQuote, FeedError> {
        let entries = self.fetch_listing().await?;
        resolve_pair(&entries, pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(pairs: &[(&str, f64)]) -> Vec<RateEntry> {
        pairs
            .iter()
            .map(|(name, value)| RateEntry {
                name: name.to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_resolve_direct_orientation() {
        let entries = listing(&[("USD/BDT", 110.5)]);
        let quote = resolve_pair(&entries, &CurrencyPair::new("USD", "BDT")).unwrap();
        assert_eq!(quote.rate, 110.5);
        assert_eq!(quote.source_pair, "USD/BDT");
        assert!(!quote.inverted);
    }

    #[test]
    fn test_resolve_inverse_orientation() {
        let entries = listing(&[("BDT/USD", 0.00905)]);
        let quote = resolve_pair(&entries, &CurrencyPair::new("USD", "BDT")).unwrap();
        assert_eq!(quote.rate, 1.0 / 0.00905);
        assert_eq!(quote.source_pair, "BDT/USD");
        assert!(quote.inverted);
    }

    #[test]
    fn test_resolve_prefers_direct_over_inverse() {
        let entries = listing(&[("BDT/USD", 0.00905), ("USD/BDT", 110.5)]);
        let quote = resolve_pair(&entries, &CurrencyPair::new("USD", "BDT")).unwrap();
        assert_eq!(quote.rate, 110.5);
        assert!(!quote.inverted);
    }

    #[test]
    fn test_resolve_zero_inverse_is_invalid() {
        let entries = listing(&[("BDT/USD", 0.0)]);
        let err = resolve_pair(&entries, &CurrencyPair::new("USD", "BDT")).unwrap_err();
        assert!(matches!(err, FeedError::ZeroRate(_)));
    }

    #[test]
    fn test_resolve_missing_pair() {
        let entries = listing(&[("USD/TRY", 32.4)]);
        let err = resolve_pair(&entries, &CurrencyPair::new("USD", "BDT")).unwrap_err();
        assert!(matches!(err, FeedError::PairNotFound(_)));
    }

    #[test]
    fn test_resolve_normalized_lowercase_request() {
        let entries = listing(&[("USD/BDT", 110.5)]);
        let quote = resolve_pair(&entries, &CurrencyPair::new("usd", "bdt")).unwrap();
        assert_eq!(quote.rate, 110.5);
    }

    #[test]
    fn test_listing_decodes_with_extra_fields() {
        let raw = r#"{"data":[{"name":"USD/BDT","value":110.5,"change":0.2}],"meta":{}}"#;
        let parsed: RatesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].name, "USD/BDT");
        assert_eq!(parsed.data[0].value, 110.5);
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_upstream_error() {
        let source = RestRateSource::new("http://127.0.0.1:9/rates").unwrap();
        let err = source
            .quote(&CurrencyPair::new("USD", "BDT"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Upstream(_)));
    }
}
