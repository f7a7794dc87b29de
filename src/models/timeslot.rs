//! Minute-of-day time windows.
//!
//! Tasks carry wall-clock times as `HH:mm` strings (the upstream wire
//! representation). Rules never compare strings: they parse into half-open
//! minute intervals and work on those.
//!
//! # Half-day Model
//! The AM half of a day is `[0, 720)` minutes, the PM half `[720, 1440)`.
//! An all-day window spans `[0, 1440)` and therefore belongs to neither
//! half exclusively.

use serde::{Deserialize, Serialize};

/// Minutes in a full day.
pub const MINUTES_PER_DAY: i64 = 1_440;

/// Minute-of-day where the AM half ends and the PM half begins (12:00).
pub const NOON_MIN: i64 = 720;

/// A time interval [start_min, end_min) in minutes since midnight.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteWindow {
    /// Interval start (minutes since midnight, inclusive).
    pub start_min: i64,
    /// Interval end (minutes since midnight, exclusive).
    pub end_min: i64,
}

impl MinuteWindow {
    /// Creates a new window.
    pub fn new(start_min: i64, end_min: i64) -> Self {
        Self { start_min, end_min }
    }

    /// The full-day window [0, 1440).
    pub fn all_day() -> Self {
        Self::new(0, MINUTES_PER_DAY)
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Whether two windows overlap.
    ///
    /// Touching windows ([9:00, 10:00) and [10:00, 11:00)) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Whether this window falls entirely within the AM half of the day.
    #[inline]
    pub fn within_am(&self) -> bool {
        self.end_min <= NOON_MIN
    }

    /// Whether this window falls entirely within the PM half of the day.
    #[inline]
    pub fn within_pm(&self) -> bool {
        self.start_min >= NOON_MIN
    }
}

impl std::fmt::Display for MinuteWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_hhmm(self.start_min),
            format_hhmm(self.end_min)
        )
    }
}

/// Parses an `HH:mm` string into minutes since midnight.
///
/// Returns `None` for anything that is not a well-formed time of day,
/// leaving the malformed-record policy (skip, don't guess) to the caller.
pub fn parse_hhmm(value: &str) -> Option<i64> {
    let (hh, mm) = value.split_once(':')?;
    if hh.len() != 2 || mm.len() != 2 {
        return None;
    }
    let hours: i64 = hh.parse().ok()?;
    let minutes: i64 = mm.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight as `HH:mm`.
pub fn format_hhmm(minute: i64) -> String {
    let clamped = minute.clamp(0, MINUTES_PER_DAY);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}
