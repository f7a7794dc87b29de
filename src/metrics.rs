//! Workload distribution metrics.
//!
//! Pure aggregation over a snapshot: per-person assignment counts (and
//! hours, where task times allow) within an inclusive date window. Used by
//! the fairness rule and by operator-facing workload summaries. Recomputed
//! on demand, never cached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::DomainSnapshot;

/// Tunables for distribution counting.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionConfig {
    /// Assumed duration (minutes) for tasks with a start time but no end time.
    pub default_duration_min: i64,
    /// Whether assignments on cancelled tasks still count toward workload.
    pub count_cancelled: bool,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            default_duration_min: 120,
            count_cancelled: false,
        }
    }
}

impl DistributionConfig {
    /// Sets the default duration for open-ended tasks.
    pub fn with_default_duration_min(mut self, minutes: i64) -> Self {
        self.default_duration_min = minutes;
        self
    }

    /// Sets whether cancelled tasks count toward workload.
    pub fn with_count_cancelled(mut self, count: bool) -> Self {
        self.count_cancelled = count;
        self
    }
}

/// Per-person workload aggregate over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionMetric {
    /// Person this aggregate belongs to.
    pub person_id: String,
    /// Period start (ISO date, inclusive).
    pub period_start: String,
    /// Period end (ISO date, inclusive).
    pub period_end: String,
    /// Number of counted assignments in the period.
    pub total_assignments: u32,
    /// Summed task hours, when at least one counted task carries times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
}

/// Computes per-person workload metrics over `[period_start, period_end]`.
///
/// Counts every assignment whose task falls in the window, excluding
/// cancelled tasks unless configured otherwise. Assignments referencing a
/// task absent from the snapshot are skipped. Hours are summed only from
/// tasks with an explicit start time; all-day tasks contribute a count but
/// no hours. Output is sorted by person id.
pub fn calculate(
    snapshot: &DomainSnapshot,
    period_start: &str,
    period_end: &str,
    config: &DistributionConfig,
) -> Vec<DistributionMetric> {
    struct Tally {
        assignments: u32,
        minutes: i64,
        timed: bool,
    }

    let idx = snapshot.index();
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for assignment in &snapshot.assignments {
        let Some(task) = idx.task(&assignment.task_id) else {
            continue;
        };
        if task.is_cancelled() && !config.count_cancelled {
            continue;
        }
        let date = task.date.as_str();
        if date < period_start || date > period_end {
            continue;
        }

        let tally = tallies
            .entry(assignment.person_id.as_str())
            .or_insert(Tally {
                assignments: 0,
                minutes: 0,
                timed: false,
            });
        tally.assignments += 1;

        if task.start_time.is_some() {
            if let Some(window) = task.window(config.default_duration_min) {
                tally.minutes += window.duration_min();
                tally.timed = true;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(person_id, tally)| DistributionMetric {
            person_id: person_id.to_string(),
            period_start: period_start.to_string(),
            period_end: period_end.to_string(),
            total_assignments: tally.assignments,
            total_hours: tally.timed.then(|| tally.minutes as f64 / 60.0),
        })
        .collect()
}
