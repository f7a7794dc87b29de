//! Built-in constraint rules.
//!
//! # Rules
//!
//! - **Double-booking** (hard): one person, two overlapping tasks.
//! - **Availability mismatch** (hard): assignment against a declared
//!   `NONE`/`AM`/`PM` slot.
//! - **Distribution fairness** (soft): statistical workload-imbalance
//!   advisory.
//!
//! All rules skip records they cannot interpret (dangling task references,
//! malformed times) instead of guessing; data-integrity reporting belongs
//! to the storage layer, not here.

use std::collections::{BTreeMap, BTreeSet};

use crate::metrics::{self, DistributionConfig};
use crate::models::{
    Assignment, AvailabilitySlot, ConstraintLevel, MinuteWindow, RuleViolation, Task, TaskStatus,
};
use crate::snapshot::DomainSnapshot;

use super::{Constraint, ConstraintError, RuleContext};

fn exempt_from_conflicts(task: &Task, exempt_postponed: bool) -> bool {
    match task.status {
        TaskStatus::Cancelled => true,
        TaskStatus::Postponed => exempt_postponed,
        TaskStatus::Scheduled => false,
    }
}

// ======================== Double-booking ========================

/// Detects one person assigned to two tasks with overlapping windows on
/// the same date.
///
/// Two assignments of the same person to the *same* task are a
/// duplicate-assignment data error, not a double-booking, and are ignored
/// here. Cancelled tasks never conflict; postponed tasks are exempt by
/// default and configurable via [`with_exempt_postponed`](Self::with_exempt_postponed).
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleBooking {
    /// Assumed duration (minutes) for tasks with a start time but no end time.
    pub default_duration_min: i64,
    /// Whether postponed tasks are exempt from conflict detection.
    pub exempt_postponed: bool,
}

impl Default for DoubleBooking {
    fn default() -> Self {
        Self {
            default_duration_min: 120,
            exempt_postponed: true,
        }
    }
}

impl DoubleBooking {
    /// Sets the default duration for open-ended tasks.
    pub fn with_default_duration_min(mut self, minutes: i64) -> Self {
        self.default_duration_min = minutes;
        self
    }

    /// Sets whether postponed tasks are exempt.
    pub fn with_exempt_postponed(mut self, exempt: bool) -> Self {
        self.exempt_postponed = exempt;
        self
    }
}

impl Constraint for DoubleBooking {
    fn id(&self) -> &str {
        "double-booking"
    }

    fn level(&self) -> ConstraintLevel {
        ConstraintLevel::Hard
    }

    fn description(&self) -> &str {
        "one person assigned to two tasks with overlapping time windows"
    }

    fn evaluate(
        &self,
        context: &RuleContext,
        snapshot: &DomainSnapshot,
    ) -> Result<Vec<RuleViolation>, ConstraintError> {
        let idx = snapshot.index();

        // Per-person list of (assignment, task, resolved window).
        let mut by_person: BTreeMap<&str, Vec<(&Assignment, &Task, MinuteWindow)>> =
            BTreeMap::new();
        for assignment in &snapshot.assignments {
            let Some(task) = idx.task(&assignment.task_id) else {
                continue;
            };
            if exempt_from_conflicts(task, self.exempt_postponed) {
                continue;
            }
            let Some(window) = task.window(self.default_duration_min) else {
                continue;
            };
            by_person
                .entry(assignment.person_id.as_str())
                .or_default()
                .push((assignment, task, window));
        }

        type SortKey = (String, String, String, String);
        let mut found: Vec<(SortKey, RuleViolation)> = Vec::new();

        for (person_id, mut entries) in by_person {
            // Canonical pair order: earlier date/start/task first, so the
            // same conflict yields the same violation regardless of
            // snapshot insertion order.
            entries.sort_by(|(aa, at, aw), (ba, bt, bw)| {
                at.date
                    .cmp(&bt.date)
                    .then(aw.start_min.cmp(&bw.start_min))
                    .then(at.id.cmp(&bt.id))
                    .then(aa.id.cmp(&ba.id))
            });

            for i in 0..entries.len() {
                let (a1, t1, w1) = entries[i];
                for (a2, t2, w2) in &entries[i + 1..] {
                    if t2.date != t1.date {
                        break; // sorted by date; no later entry can coincide
                    }
                    if t2.id == t1.id {
                        continue;
                    }
                    if !w1.overlaps(w2) {
                        continue;
                    }
                    let label = idx.person_label(person_id);
                    let message = format!(
                        "{label} is double-booked on {}: task {} ({w1}) overlaps task {} ({w2})",
                        t1.date, t1.id, t2.id,
                    );
                    let violation = RuleViolation::hard(
                        message,
                        vec![a1.id.clone(), a2.id.clone()],
                        context.timestamp.clone(),
                    );
                    let key = (
                        t1.date.clone(),
                        person_id.to_string(),
                        t1.id.clone(),
                        t2.id.clone(),
                    );
                    found.push((key, violation));
                }
            }
        }

        found.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(found.into_iter().map(|(_, v)| v).collect())
    }
}

// ======================== Availability mismatch ========================

/// Flags assignments that contradict the person's declared availability.
///
/// A `NONE` slot always conflicts. `AM`/`PM` slots conflict only when the
/// task window falls entirely within the opposite half of the day. No
/// record for the date means "unknown", which is permissive.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityMismatch {
    /// Assumed duration (minutes) for tasks with a start time but no end time.
    pub default_duration_min: i64,
    /// Whether postponed tasks are exempt from conflict detection.
    pub exempt_postponed: bool,
}

impl Default for AvailabilityMismatch {
    fn default() -> Self {
        Self {
            default_duration_min: 120,
            exempt_postponed: true,
        }
    }
}

impl AvailabilityMismatch {
    /// Sets the default duration for open-ended tasks.
    pub fn with_default_duration_min(mut self, minutes: i64) -> Self {
        self.default_duration_min = minutes;
        self
    }

    /// Sets whether postponed tasks are exempt.
    pub fn with_exempt_postponed(mut self, exempt: bool) -> Self {
        self.exempt_postponed = exempt;
        self
    }
}

impl Constraint for AvailabilityMismatch {
    fn id(&self) -> &str {
        "availability-mismatch"
    }

    fn level(&self) -> ConstraintLevel {
        ConstraintLevel::Hard
    }

    fn description(&self) -> &str {
        "assignment contradicts the person's declared availability slot"
    }

    fn evaluate(
        &self,
        context: &RuleContext,
        snapshot: &DomainSnapshot,
    ) -> Result<Vec<RuleViolation>, ConstraintError> {
        let idx = snapshot.index();

        type SortKey = (String, String, String, String);
        let mut found: Vec<(SortKey, RuleViolation)> = Vec::new();

        for assignment in &snapshot.assignments {
            let Some(task) = idx.task(&assignment.task_id) else {
                continue;
            };
            if exempt_from_conflicts(task, self.exempt_postponed) {
                continue;
            }
            let Some(record) = idx.availability(&assignment.person_id, &task.date) else {
                continue; // absence is not denial
            };

            let label = idx.person_label(&assignment.person_id);
            let message = match record.slot {
                AvailabilitySlot::Full => continue,
                AvailabilitySlot::None => format!(
                    "{label} is marked NONE on {} but is assigned to task {}",
                    task.date, task.id,
                ),
                AvailabilitySlot::Am | AvailabilitySlot::Pm => {
                    let Some(window) = task.window(self.default_duration_min) else {
                        continue;
                    };
                    if record.slot.permits(&window) {
                        continue;
                    }
                    format!(
                        "{label} is only available {} on {} but task {} runs {window}",
                        record.slot, task.date, task.id,
                    )
                }
            };

            let violation = RuleViolation::hard(
                message,
                vec![assignment.id.clone()],
                context.timestamp.clone(),
            );
            let key = (
                task.date.clone(),
                assignment.person_id.clone(),
                task.id.clone(),
                assignment.id.clone(),
            );
            found.push((key, violation));
        }

        found.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(found.into_iter().map(|(_, v)| v).collect())
    }
}

// ======================== Distribution fairness ========================

/// Advisory rule flagging persons whose assignment count sits far above
/// the population mean.
///
/// The fairness population is every person with at least one availability
/// record in the window implied by the snapshot's task date range; people
/// who never signed up are not penalized for a count of zero. A person is
/// flagged when their count exceeds `mean + k * stddev` and differs from
/// the mean by at least `min_gap` assignments (the gap floor keeps tiny
/// datasets from producing noise).
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionFairness {
    /// Standard-deviation multiplier for the outlier threshold.
    pub k: f64,
    /// Minimum absolute distance from the mean before flagging.
    pub min_gap: f64,
    /// Counting policy shared with the metric calculator.
    pub distribution: DistributionConfig,
}

impl Default for DistributionFairness {
    fn default() -> Self {
        Self {
            k: 1.5,
            min_gap: 3.0,
            distribution: DistributionConfig::default(),
        }
    }
}

impl DistributionFairness {
    /// Sets the standard-deviation multiplier.
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Sets the minimum absolute gap from the mean.
    pub fn with_min_gap(mut self, min_gap: f64) -> Self {
        self.min_gap = min_gap;
        self
    }

    /// Sets the counting policy.
    pub fn with_distribution(mut self, distribution: DistributionConfig) -> Self {
        self.distribution = distribution;
        self
    }

    fn is_counted(&self, task: &Task) -> bool {
        !task.is_cancelled() || self.distribution.count_cancelled
    }
}

impl Constraint for DistributionFairness {
    fn id(&self) -> &str {
        "distribution-fairness"
    }

    fn level(&self) -> ConstraintLevel {
        ConstraintLevel::Soft
    }

    fn description(&self) -> &str {
        "workload concentrated on few persons relative to the population"
    }

    fn evaluate(
        &self,
        context: &RuleContext,
        snapshot: &DomainSnapshot,
    ) -> Result<Vec<RuleViolation>, ConstraintError> {
        let Some((start, end)) = snapshot.task_date_range() else {
            return Ok(Vec::new());
        };

        let computed = metrics::calculate(snapshot, start, end, &self.distribution);
        let counts: BTreeMap<&str, u32> = computed
            .iter()
            .map(|m| (m.person_id.as_str(), m.total_assignments))
            .collect();

        let population: BTreeSet<&str> = snapshot
            .availability
            .iter()
            .filter(|record| record.date.as_str() >= start && record.date.as_str() <= end)
            .map(|record| record.person_id.as_str())
            .collect();
        if population.is_empty() {
            return Ok(Vec::new());
        }

        let n = population.len() as f64;
        let mean = population
            .iter()
            .map(|p| f64::from(counts.get(p).copied().unwrap_or(0)))
            .sum::<f64>()
            / n;
        let variance = population
            .iter()
            .map(|p| {
                let count = f64::from(counts.get(p).copied().unwrap_or(0));
                (count - mean) * (count - mean)
            })
            .sum::<f64>()
            / n;
        let threshold = mean + self.k * variance.sqrt();

        let idx = snapshot.index();
        let mut violations = Vec::new();
        for person_id in population {
            let count = counts.get(person_id).copied().unwrap_or(0);
            let count_f = f64::from(count);
            if count_f <= threshold || count_f - mean < self.min_gap {
                continue;
            }

            // The person's counted assignments in the window, for the
            // caller to highlight.
            let affected: Vec<String> = snapshot
                .assignments
                .iter()
                .filter(|a| a.person_id == person_id)
                .filter(|a| {
                    idx.task(&a.task_id).is_some_and(|task| {
                        self.is_counted(task)
                            && task.date.as_str() >= start
                            && task.date.as_str() <= end
                    })
                })
                .map(|a| a.id.clone())
                .collect();

            let label = idx.person_label(person_id);
            violations.push(RuleViolation::soft(
                format!(
                    "{label} has {count} assignments between {start} and {end} \
                     (population mean {mean:.1})"
                ),
                affected,
                context.timestamp.clone(),
            ));
        }

        Ok(violations)
    }
}
