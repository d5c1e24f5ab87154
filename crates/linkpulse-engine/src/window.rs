//! Poll-window arithmetic for the comment change detector.
//!
//! A cycle's watermark is recomputed from scratch every time: nothing is
//! persisted across cycles, so delivery near the window boundary is
//! at-least-once, with the watermark suppressing obviously-old comments.

use chrono::{DateTime, TimeDelta, Utc};

/// The time window for one comment-detection cycle.
///
/// Built by the host from the scheduler's next execution instant (when one
/// is known) and the configured poll interval.
#[derive(Debug, Clone, Copy)]
pub struct PollWindow {
    next_execution: Option<DateTime<Utc>>,
    interval_secs: u64,
}

impl PollWindow {
    /// Window for an unscheduled run: the watermark counts back from now.
    #[must_use]
    pub fn starting_now(interval_secs: u64) -> Self {
        Self {
            next_execution: None,
            interval_secs,
        }
    }

    /// Window anchored to a scheduler-supplied next execution instant.
    #[must_use]
    pub fn scheduled(next_execution: DateTime<Utc>, interval_secs: u64) -> Self {
        Self {
            next_execution: Some(next_execution),
            interval_secs,
        }
    }

    /// The cutoff instant: comments created at or before it are treated as
    /// already seen.
    ///
    /// Computed as `next_execution - interval` when an execution instant is
    /// known, else `now - interval`. An interval too large to subtract
    /// saturates to the minimum representable instant, which admits
    /// everything.
    #[must_use]
    pub fn watermark(&self) -> DateTime<Utc> {
        let reference = self.next_execution.unwrap_or_else(Utc::now);
        i64::try_from(self.interval_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| reference.checked_sub_signed(delta))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Converts provider epoch milliseconds into a UTC instant.
///
/// Returns `None` for values outside the representable range.
#[must_use]
pub fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watermark_counts_back_from_the_scheduled_instant() {
        let next = datetime_from_millis(1_700_001_800_000).unwrap();
        let window = PollWindow::scheduled(next, 1800);
        assert_eq!(
            window.watermark(),
            datetime_from_millis(1_700_000_000_000).unwrap()
        );
    }

    #[test]
    fn watermark_falls_back_to_now_minus_interval() {
        let before = Utc::now();
        let watermark = PollWindow::starting_now(60).watermark();
        let after = Utc::now();
        assert!(watermark >= before - TimeDelta::seconds(61));
        assert!(watermark <= after - TimeDelta::seconds(59));
    }

    #[test]
    fn oversized_interval_saturates_to_minimum() {
        let window = PollWindow::starting_now(u64::MAX);
        assert_eq!(window.watermark(), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn datetime_from_millis_known_value() {
        let dt = datetime_from_millis(1_700_000_000_000).unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn datetime_from_millis_out_of_range_is_none() {
        assert!(datetime_from_millis(i64::MAX).is_none());
    }
}
