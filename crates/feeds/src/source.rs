//! The quoting seam between the bot and the upstream feed.

use crate::FeedError;
use async_trait::async_trait;
use ratewatch_core::{CurrencyPair, PairQuote};

/// Source of current pair rates.
///
/// A failed quote is skipped at its own cadence; implementations must not
/// retry internally.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Resolve the current rate for a pair, direct or inverted.
    async fn quote(&self, pair: &CurrencyPair) -> Result<PairQuote, FeedError>;
}
