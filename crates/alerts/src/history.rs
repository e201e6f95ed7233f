//! Rolling 24h rate history for the reference pair.

use crate::store::JsonDocument;
use chrono::{DateTime, Duration, Utc};
use ratewatch_core::{RateSample, WindowStats};
use std::path::PathBuf;
use tracing::warn;

/// How far back samples are retained, in hours.
const WINDOW_HOURS: i64 = 24;

/// Rolling window of reference-pair samples, persisted as one JSON document
/// in chronological append order. `record` is the sole mutation path.
pub struct HistoryStore {
    doc: JsonDocument<Vec<RateSample>>,
}

impl HistoryStore {
    /// Bind to a history document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            doc: JsonDocument::new(path.into()),
        }
    }

    /// Append a sample, drop everything older than 24h, persist, and return
    /// the resulting window. A persist failure is logged; the in-memory
    /// window still serves the current tick.
    pub fn record(&mut self, rate: f64, now: DateTime<Utc>) -> Vec<RateSample> {
        let mut window = self.doc.load();
        window.push(RateSample::new(now, rate));

        let cutoff = now - Duration::hours(WINDOW_HOURS);
        window.retain(|sample| sample.ts >= cutoff);

        if let Err(err) = self.doc.save(&window) {
            warn!(error = %err, "failed to persist rate history");
        }
        window
    }
}

/// High/low over a window with their timestamps; `None` when the window is
/// empty. Ties resolve to the chronologically first sample.
pub fn stats_last_24h(window: &[RateSample]) -> Option<WindowStats> {
    let first = window.first()?;
    let mut high = *first;
    let mut low = *first;
    for sample in &window[1..] {
        if sample.rate > high.rate {
            high = *sample;
        }
        if sample.rate < low.rate {
            low = *sample;
        }
    }
    Some(WindowStats { high, low })
}
