//! Task model.
//!
//! A task is a dated work item needing a headcount: a match to umpire,
//! a shift to staff. Times are optional `HH:mm` strings; a task without
//! them is all-day.

use serde::{Deserialize, Serialize};

use super::timeslot::{parse_hhmm, MinuteWindow, MINUTES_PER_DAY};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Planned to take place as dated.
    #[default]
    Scheduled,
    /// Will not take place; exempt from conflict detection.
    Cancelled,
    /// Will take place at a later, not-yet-known date.
    Postponed,
}

/// A schedulable work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// ISO date (`YYYY-MM-DD`) the task takes place.
    pub date: String,
    /// Start time (`HH:mm`). `None` together with `end_time` = all-day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// End time (`HH:mm`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Human-readable title.
    pub title: String,
    /// Venue name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Headcount needed.
    pub required: u32,
    /// Role the assigned persons should fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expected duration when no end time is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Lifecycle state. Missing in older documents → `scheduled`.
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Creates a new all-day task on the given date.
    pub fn new(id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            start_time: None,
            end_time: None,
            title: String::new(),
            venue: None,
            required: 1,
            role: None,
            duration_minutes: None,
            status: TaskStatus::Scheduled,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets start and end times (`HH:mm`).
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    /// Sets the start time only (open-ended).
    pub fn with_start_time(mut self, start: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Sets the required headcount.
    pub fn with_required(mut self, required: u32) -> Self {
        self.required = required;
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the expected duration for open-ended tasks.
    pub fn with_duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this task is cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.status == TaskStatus::Cancelled
    }

    /// Resolves the task's occupied window within its day.
    ///
    /// - No times at all → the full day.
    /// - Start only → start plus `duration_minutes`, falling back to
    ///   `default_duration_min`, clipped to end of day.
    /// - End only → from start of day to the end time.
    /// - Returns `None` for malformed times or an empty/inverted interval;
    ///   callers skip such records rather than guessing.
    pub fn window(&self, default_duration_min: i64) -> Option<MinuteWindow> {
        let start = match &self.start_time {
            Some(s) => Some(parse_hhmm(s)?),
            None => None,
        };
        let end = match &self.end_time {
            Some(s) => Some(parse_hhmm(s)?),
            None => None,
        };

        let window = match (start, end) {
            (None, None) => MinuteWindow::all_day(),
            (Some(s), Some(e)) => MinuteWindow::new(s, e),
            (Some(s), None) => {
                let duration = self.duration_minutes.unwrap_or(default_duration_min);
                MinuteWindow::new(s, (s + duration).min(MINUTES_PER_DAY))
            }
            (None, Some(e)) => MinuteWindow::new(0, e),
        };

        if window.duration_min() > 0 {
            Some(window)
        } else {
            None
        }
    }
}
