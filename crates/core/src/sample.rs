//! Rate history samples and 24h window statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed rate for the reference pair. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSample {
    /// When the rate was observed.
    pub ts: DateTime<Utc>,
    /// Observed rate, positive.
    pub rate: f64,
}

impl RateSample {
    /// Create a sample.
    pub fn new(ts: DateTime<Utc>, rate: f64) -> Self {
        Self { ts, rate }
    }
}

/// High/low extremes over a history window, each with its own timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Maximum-rate sample in the window.
    pub high: RateSample,
    /// Minimum-rate sample in the window.
    pub low: RateSample,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_serde_field_names() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let json = serde_json::to_string(&RateSample::new(ts, 110.5)).unwrap();
        assert!(json.contains("\"ts\""));
        assert!(json.contains("\"rate\""));

        let back: RateSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RateSample::new(ts, 110.5));
    }
}
