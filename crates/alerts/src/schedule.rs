//! Wall-clock slot scheduling.
//!
//! Wake times are anchored to fixed intra-hour minute offsets rather than
//! elapsed-time sleeps, so the cadence never drifts over long uptimes.

use chrono::{DateTime, Duration, Timelike, Utc};
use tokio::time::sleep;
use tracing::info;

/// Fixed per-hour wake offsets, second 0.
pub const SLOT_MINUTES: [u32; 4] = [1, 16, 31, 46];

/// Earliest slot still ahead of `now`.
///
/// A slot at the current minute counts as ahead only while the second hand
/// is still on 0; from :01 it has passed. With no slot left in the current
/// hour, the first slot of the next hour is used.
pub fn next_slot(now: DateTime<Utc>) -> DateTime<Utc> {
    for &minute in &SLOT_MINUTES {
        if now.minute() < minute || (now.minute() == minute && now.second() == 0) {
            return at_minute(now, minute);
        }
    }
    at_minute(now + Duration::hours(1), SLOT_MINUTES[0])
}

/// The instant `minute`:00 within the hour containing `t`.
fn at_minute(t: DateTime<Utc>, minute: u32) -> DateTime<Utc> {
    let into_hour = Duration::minutes(t.minute() as i64)
        + Duration::seconds(t.second() as i64)
        + Duration::nanoseconds(t.nanosecond() as i64);
    t - into_hour + Duration::minutes(minute as i64)
}

/// Sleep until the next slot and return the instant that was waited for.
/// A sub-second overshoot on a :00 boundary clamps to an immediate wake.
pub async fn sleep_until_next_slot() -> DateTime<Utc> {
    let now = Utc::now();
    let target = next_slot(now);
    let wait = (target - now).to_std().unwrap_or_default();
    info!(target = %target, wait_secs = wait.as_secs(), "sleeping until next slot");
    sleep(wait).await;
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, hour, minute, second).unwrap()
    }

    #[test]
    fn test_mid_slot_advances_to_next_offset() {
        assert_eq!(next_slot(at(9, 5, 30)), at(9, 16, 0));
    }

    #[test]
    fn test_before_first_offset() {
        assert_eq!(next_slot(at(9, 0, 30)), at(9, 1, 0));
    }

    #[test]
    fn test_slot_boundary_at_second_zero_still_counts() {
        assert_eq!(next_slot(at(9, 46, 0)), at(9, 46, 0));
    }

    #[test]
    fn test_slot_boundary_with_subsecond_fraction_still_counts() {
        let now = at(9, 46, 0) + Duration::milliseconds(500);
        assert_eq!(next_slot(now), at(9, 46, 0));
    }

    #[test]
    fn test_one_second_past_last_offset_rolls_to_next_hour() {
        assert_eq!(next_slot(at(9, 46, 1)), at(10, 1, 0));
    }

    #[test]
    fn test_end_of_hour_rolls_to_next_hour() {
        assert_eq!(next_slot(at(9, 59, 59)), at(10, 1, 0));
    }

    #[test]
    fn test_rollover_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 23, 50, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 3, 0, 1, 0).unwrap();
        assert_eq!(next_slot(now), expected);
    }

    #[test]
    fn test_every_offset_is_reachable() {
        assert_eq!(next_slot(at(9, 1, 30)), at(9, 16, 0));
        assert_eq!(next_slot(at(9, 16, 30)), at(9, 31, 0));
        assert_eq!(next_slot(at(9, 31, 30)), at(9, 46, 0));
    }
}
