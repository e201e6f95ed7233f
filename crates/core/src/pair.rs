//! Currency pair and quote definitions.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered currency pair such as USD/BDT.
///
/// Codes are normalized to uppercase at construction, so lookups against the
/// feed listing are case-insensitive for callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base currency code (e.g., "USD" in USD/BDT)
    pub base: CompactString,
    /// Counter currency code (e.g., "BDT" in USD/BDT)
    pub counter: CompactString,
}

impl CurrencyPair {
    /// Create a pair, trimming and uppercasing both codes.
    pub fn new(base: &str, counter: &str) -> Self {
        Self {
            base: CompactString::new(base.trim().to_uppercase()),
            counter: CompactString::new(counter.trim().to_uppercase()),
        }
    }

    /// The opposite orientation (COUNTER/BASE).
    pub fn inverse(&self) -> Self {
        Self {
            base: self.counter.clone(),
            counter: self.base.clone(),
        }
    }

    /// Feed listing name, "BASE/COUNTER".
    pub fn name(&self) -> String {
        format!("{}/{}", self.base, self.counter)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

/// A resolved rate for one pair, computed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairQuote {
    /// Units of counter currency per one unit of base currency.
    pub rate: f64,
    /// The feed listing the rate came from (may be the opposite orientation).
    pub source_pair: CompactString,
    /// True when the rate is the reciprocal of the listed value.
    pub inverted: bool,
}
