//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while quoting a pair.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Neither orientation of the pair is listed by the feed.
    #[error("pair {0} not found in feed listing")]
    PairNotFound(String),

    /// The opposite orientation is listed with a zero value, so the
    /// reciprocal is undefined. Invalid feed data, not a zero quote.
    #[error("zero rate listed for {0}")]
    ZeroRate(String),

    /// Transport failure talking to the feed.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The feed responded with something we could not decode.
    #[error("failed to parse feed response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::Parse(err.to_string())
        } else {
            FeedError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}
