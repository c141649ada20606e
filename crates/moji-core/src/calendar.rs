//! Calendar and clock provider
//!
//! Days are local calendar days. Puzzle numbers count whole days since the
//! first puzzle, starting at 1.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Format of persisted calendar days
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current local date and time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Milliseconds since the Unix epoch, used as a per-play seed
    fn timestamp_millis(&self) -> u64 {
        self.now().and_utc().timestamp_millis().max(0) as u64
    }
}

/// The machine's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp_millis(&self) -> u64 {
        Local::now().timestamp_millis().max(0) as u64
    }
}

/// A clock pinned to a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Noon on the given day
    pub fn on(day: NaiveDate) -> Self {
        Self::new(day.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Puzzle number of `day`; days before the first puzzle map to puzzle 1
pub fn puzzle_number(first_puzzle: NaiveDate, day: NaiveDate) -> u32 {
    let days = (day - first_puzzle).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX - 1) + 1
}

/// The day before `day`
pub fn yesterday(day: NaiveDate) -> NaiveDate {
    day.pred_opt().unwrap_or(day)
}

/// Persisted form of a calendar day
pub fn day_string(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Time left until the next local midnight, when the next puzzle unlocks
pub fn time_until_next_puzzle(now: NaiveDateTime) -> Duration {
    let midnight = now
        .date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(now);
    midnight - now
}

/// Format a countdown as HH:MM:SS
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
