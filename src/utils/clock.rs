//! Deterministic clock for tests and any code that needs to reason about
//! elapsed time without touching the system clock.

use std::time::Duration;

/// A manually-advanced clock, tracking a Unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockClock {
    now: i64,
}

impl MockClock {
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self { now }
    }

    #[must_use]
    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn advance_secs(&mut self, secs: u64) {
        self.now += secs as i64;
    }

    /// Returns `true` if at least `duration` has passed since `start`
    /// according to this clock's current time.
    #[must_use]
    pub fn has_elapsed(&self, start: i64, duration: Duration) -> bool {
        let elapsed = self.now.saturating_sub(start);
        elapsed >= duration.as_secs() as i64
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Human-readable timestamp formatting for logs and diagnostics.
pub mod time_utils {
    use chrono::{DateTime, Utc};

    /// Formats a Unix timestamp (seconds) as an RFC 3339 string in UTC.
    #[must_use]
    pub fn format_timestamp(unix_secs: i64) -> String {
        DateTime::<Utc>::from_timestamp(unix_secs, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| unix_secs.to_string())
    }
}
