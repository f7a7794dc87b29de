//! Evaluation engine.
//!
//! Runs every registered constraint against one snapshot, merges the
//! results, deduplicates exact duplicates, and orders the output
//! deterministically: hard before soft, then by detection timestamp, then
//! by the first affected assignment id.
//!
//! A failing constraint never aborts the call: its failure is replaced by
//! a single synthetic soft violation so that advisory tooling keeps
//! working when one rule misbehaves.
//!
//! With the `parallel` feature enabled, constraints run across a rayon
//! thread pool. Constraints have no data dependency on one another, and
//! the merge step sorts on a total order, so the output bytes are
//! identical either way.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::metrics::{self, DistributionConfig, DistributionMetric};
use crate::models::RuleViolation;
use crate::snapshot::DomainSnapshot;

use super::{Constraint, ConstraintRegistry, RuleContext};

/// Violations plus the distribution metrics for the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Merged, ordered violations from all constraints.
    pub violations: Vec<RuleViolation>,
    /// Per-person workload metrics over the snapshot's task date range.
    pub metrics: Vec<DistributionMetric>,
}

/// Evaluates every registered constraint against one snapshot.
///
/// Always returns a list (possibly empty); isolated rule failures surface
/// as synthetic soft violations, never as an error to the caller.
pub fn evaluate(
    registry: &ConstraintRegistry,
    context: &RuleContext,
    snapshot: &DomainSnapshot,
) -> Vec<RuleViolation> {
    let mut violations = run_constraints(registry, context, snapshot);

    // Exact duplicates (same level, message, and affected set) can arise
    // from overlapping rule coverage; keep the first.
    let mut seen = BTreeSet::new();
    violations.retain(|v| {
        seen.insert((v.level, v.message.clone(), v.affected_assignments.clone()))
    });

    violations.sort_by(compare_violations);
    violations
}

/// Evaluates constraints and computes distribution metrics in one pass.
///
/// The metric window is the snapshot's task date range; a snapshot without
/// tasks yields no metrics.
pub fn evaluate_report(
    registry: &ConstraintRegistry,
    context: &RuleContext,
    snapshot: &DomainSnapshot,
    config: &DistributionConfig,
) -> EvaluationReport {
    let violations = evaluate(registry, context, snapshot);
    let metrics = match snapshot.task_date_range() {
        Some((start, end)) => metrics::calculate(snapshot, start, end, config),
        None => Vec::new(),
    };
    EvaluationReport {
        violations,
        metrics,
    }
}

fn compare_violations(a: &RuleViolation, b: &RuleViolation) -> Ordering {
    a.level
        .cmp(&b.level)
        .then_with(|| a.detected_at.cmp(&b.detected_at))
        .then_with(|| a.first_affected().cmp(&b.first_affected()))
        .then_with(|| a.affected_assignments.cmp(&b.affected_assignments))
        .then_with(|| a.message.cmp(&b.message))
}

fn run_one(
    constraint: &Arc<dyn Constraint>,
    context: &RuleContext,
    snapshot: &DomainSnapshot,
) -> Vec<RuleViolation> {
    match constraint.evaluate(context, snapshot) {
        Ok(violations) => violations,
        Err(err) => vec![RuleViolation::soft(
            format!("constraint {} failed to evaluate: {err}", constraint.id()),
            Vec::new(),
            context.timestamp.clone(),
        )],
    }
}

#[cfg(not(feature = "parallel"))]
fn run_constraints(
    registry: &ConstraintRegistry,
    context: &RuleContext,
    snapshot: &DomainSnapshot,
) -> Vec<RuleViolation> {
    registry
        .iter()
        .flat_map(|constraint| run_one(constraint, context, snapshot))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_constraints(
    registry: &ConstraintRegistry,
    context: &RuleContext,
    snapshot: &DomainSnapshot,
) -> Vec<RuleViolation> {
    use rayon::prelude::*;

    let constraints: Vec<&Arc<dyn Constraint>> = registry.iter().collect();
    constraints
        .par_iter()
        .map(|constraint| run_one(constraint, context, snapshot))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintError;
    use crate::models::{
        Assignment, Availability, AvailabilitySlot, ConstraintLevel, Person, Task,
    };

    fn ctx() -> RuleContext {
        RuleContext::new("tenant-a", "admin", "2025-08-10T08:00:00Z")
    }

    /// Snapshot with one double-booking and one availability conflict.
    fn conflicted_snapshot() -> DomainSnapshot {
        DomainSnapshot::new(
            vec![
                Task::new("ta", "2025-08-10").with_times("09:00", "10:30"),
                Task::new("tb", "2025-08-10").with_times("10:00", "11:30"),
                Task::new("tc", "2025-08-11").with_times("09:00", "11:00"),
            ],
            vec![
                Assignment::new("a1", "ta", "ken"),
                Assignment::new("a2", "tb", "ken"),
                Assignment::new("a3", "tc", "ume").confirmed(),
            ],
            vec![
                Person::new("ken").with_display_name("Ken"),
                Person::new("ume").with_display_name("Ume"),
            ],
            vec![Availability::new("av1", "ume", "2025-08-11", AvailabilitySlot::None)],
        )
    }

    #[derive(Debug)]
    struct AlwaysFails;

    impl Constraint for AlwaysFails {
        fn id(&self) -> &str {
            "always-fails"
        }
        fn level(&self) -> ConstraintLevel {
            ConstraintLevel::Hard
        }
        fn evaluate(
            &self,
            _context: &RuleContext,
            _snapshot: &DomainSnapshot,
        ) -> Result<Vec<RuleViolation>, ConstraintError> {
            Err(ConstraintError::new("deliberately broken"))
        }
    }

    /// Emits the same violation as the double-booking rule would, to
    /// exercise deduplication of overlapping rule coverage.
    #[derive(Debug)]
    struct Echo(RuleViolation);

    impl Constraint for Echo {
        fn id(&self) -> &str {
            "echo"
        }
        fn level(&self) -> ConstraintLevel {
            self.0.level
        }
        fn evaluate(
            &self,
            _context: &RuleContext,
            _snapshot: &DomainSnapshot,
        ) -> Result<Vec<RuleViolation>, ConstraintError> {
            Ok(vec![self.0.clone()])
        }
    }

    #[test]
    fn test_empty_registry_and_snapshot() {
        let registry = ConstraintRegistry::new();
        assert!(evaluate(&registry, &ctx(), &DomainSnapshot::default()).is_empty());

        let builtin = ConstraintRegistry::builtin();
        assert!(evaluate(&builtin, &ctx(), &DomainSnapshot::default()).is_empty());
    }

    #[test]
    fn test_builtin_conflicts_detected() {
        let registry = ConstraintRegistry::builtin();
        let violations = evaluate(&registry, &ctx(), &conflicted_snapshot());

        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.level == ConstraintLevel::Hard));
        // Ordered by first affected assignment id: the double-booking
        // (a1, a2) before the availability mismatch (a3).
        assert_eq!(violations[0].affected_assignments, vec!["a1", "a2"]);
        assert_eq!(violations[1].affected_assignments, vec!["a3"]);
        // Every violation carries the evaluation timestamp.
        assert!(violations
            .iter()
            .all(|v| v.detected_at == "2025-08-10T08:00:00Z"));
    }

    #[test]
    fn test_determinism_repeated_calls() {
        let registry = ConstraintRegistry::builtin();
        let snapshot = conflicted_snapshot();
        let first = evaluate(&registry, &ctx(), &snapshot);
        let second = evaluate(&registry, &ctx(), &snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_determinism_input_order_independent() {
        let registry = ConstraintRegistry::builtin();
        let snapshot = conflicted_snapshot();

        let mut reversed = snapshot.clone();
        reversed.tasks.reverse();
        reversed.assignments.reverse();
        reversed.persons.reverse();
        reversed.availability.reverse();

        assert_eq!(
            evaluate(&registry, &ctx(), &snapshot),
            evaluate(&registry, &ctx(), &reversed)
        );
    }

    #[test]
    fn test_fail_soft_isolation() {
        let registry = ConstraintRegistry::builtin()
            .with_constraint(AlwaysFails)
            .unwrap();
        let violations = evaluate(&registry, &ctx(), &conflicted_snapshot());

        // Both built-in hard violations survive the broken constraint.
        let hard: Vec<_> = violations
            .iter()
            .filter(|v| v.level == ConstraintLevel::Hard)
            .collect();
        assert_eq!(hard.len(), 2);

        // Exactly one synthetic soft violation, sorted after the hard ones.
        let soft: Vec<_> = violations
            .iter()
            .filter(|v| v.level == ConstraintLevel::Soft)
            .collect();
        assert_eq!(soft.len(), 1);
        assert!(soft[0]
            .message
            .contains("constraint always-fails failed to evaluate"));
        assert!(soft[0].affected_assignments.is_empty());
        assert_eq!(violations.last().map(|v| v.level), Some(ConstraintLevel::Soft));
    }

    #[test]
    fn test_exact_duplicates_merged() {
        let registry = ConstraintRegistry::builtin();
        let base = evaluate(&registry, &ctx(), &conflicted_snapshot());
        let duplicate = base[0].clone();

        let with_echo = ConstraintRegistry::builtin()
            .with_constraint(Echo(duplicate))
            .unwrap();
        let violations = evaluate(&with_echo, &ctx(), &conflicted_snapshot());
        assert_eq!(violations, base);
    }

    #[test]
    fn test_report_includes_metrics() {
        let registry = ConstraintRegistry::builtin();
        let report = evaluate_report(
            &registry,
            &ctx(),
            &conflicted_snapshot(),
            &DistributionConfig::default(),
        );

        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.metrics.len(), 2); // ken and ume
        assert_eq!(report.metrics[0].person_id, "ken");
        assert_eq!(report.metrics[0].total_assignments, 2);
        assert_eq!(report.metrics[0].period_start, "2025-08-10");
        assert_eq!(report.metrics[0].period_end, "2025-08-11");
    }

    #[test]
    fn test_report_empty_snapshot_has_no_metrics() {
        let registry = ConstraintRegistry::builtin();
        let report = evaluate_report(
            &registry,
            &ctx(),
            &DomainSnapshot::default(),
            &DistributionConfig::default(),
        );
        assert!(report.violations.is_empty());
        assert!(report.metrics.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_date() -> impl Strategy<Value = String> {
            (10u8..=13).prop_map(|d| format!("2025-08-{d:02}"))
        }

        fn arb_time_pair() -> impl Strategy<Value = (Option<String>, Option<String>)> {
            prop_oneof![
                Just((None, None)),
                (8u8..=11, 12u8..=15).prop_map(|(s, e)| {
                    (Some(format!("{s:02}:00")), Some(format!("{e:02}:00")))
                }),
                (8u8..=15).prop_map(|s| (Some(format!("{s:02}:00")), None)),
            ]
        }

        /// Ids are assigned by position so a generated snapshot never
        /// contains duplicate task ids or duplicate (person, date)
        /// availability records; those would make first-wins indexing
        /// depend on input order by construction.
        fn arb_snapshot() -> impl Strategy<Value = DomainSnapshot> {
            let tasks = prop::collection::vec((arb_date(), arb_time_pair()), 0..6).prop_map(
                |entries| {
                    entries
                        .into_iter()
                        .enumerate()
                        .map(|(i, (date, (start, end)))| {
                            let mut t = Task::new(format!("t{i}"), date);
                            t.start_time = start;
                            t.end_time = end;
                            t
                        })
                        .collect::<Vec<_>>()
                },
            );
            let assignments = prop::collection::vec((0u8..8, 0u8..5), 0..12).prop_map(|entries| {
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, (t, p))| {
                        Assignment::new(format!("a{i}"), format!("t{t}"), format!("p{p}"))
                    })
                    .collect::<Vec<_>>()
            });
            let availability =
                prop::collection::btree_map((0u8..5, arb_date()), 0u8..4, 0..8).prop_map(|map| {
                    map.into_iter()
                        .map(|((p, date), slot)| {
                            let slot = match slot {
                                0 => AvailabilitySlot::None,
                                1 => AvailabilitySlot::Am,
                                2 => AvailabilitySlot::Pm,
                                _ => AvailabilitySlot::Full,
                            };
                            Availability::new(
                                format!("av{p}-{date}"),
                                format!("p{p}"),
                                date,
                                slot,
                            )
                        })
                        .collect::<Vec<_>>()
                });

            (tasks, assignments, availability).prop_map(
                |(tasks, assignments, availability)| {
                    DomainSnapshot::new(tasks, assignments, Vec::new(), availability)
                },
            )
        }

        proptest! {
            #[test]
            fn evaluate_is_deterministic(snapshot in arb_snapshot()) {
                let registry = ConstraintRegistry::builtin();
                let context = ctx();
                prop_assert_eq!(
                    evaluate(&registry, &context, &snapshot),
                    evaluate(&registry, &context, &snapshot)
                );
            }

            #[test]
            fn evaluate_ignores_input_order(snapshot in arb_snapshot()) {
                let registry = ConstraintRegistry::builtin();
                let context = ctx();
                let mut reversed = snapshot.clone();
                reversed.tasks.reverse();
                reversed.assignments.reverse();
                reversed.availability.reverse();
                prop_assert_eq!(
                    evaluate(&registry, &context, &snapshot),
                    evaluate(&registry, &context, &reversed)
                );
            }

            #[test]
            fn hard_violations_precede_soft(snapshot in arb_snapshot()) {
                let registry = ConstraintRegistry::builtin();
                let violations = evaluate(&registry, &ctx(), &snapshot);
                let levels: Vec<_> = violations.iter().map(|v| v.level).collect();
                let mut sorted = levels.clone();
                sorted.sort();
                prop_assert_eq!(levels, sorted);
            }
        }
    }
}
