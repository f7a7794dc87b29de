//! Constraint/validation engine for cooperative assignment scheduling.
//!
//! Detects scheduling conflicts (double-booking, availability mismatches)
//! and workload-imbalance signals across a set of tasks and assignments.
//! The engine only *validates* an existing assignment set for human
//! decision-making; it never solves or fills assignments itself.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Person`, `Availability`, `Task`,
//!   `Assignment`, `RuleViolation`, `MinuteWindow`
//! - **`snapshot`**: `DomainSnapshot`, the immutable per-evaluation view
//!   supplied by the storage collaborator
//! - **`constraints`**: the `Constraint` trait, `ConstraintRegistry`,
//!   built-in rules, and the evaluation engine
//! - **`metrics`**: per-person workload distribution aggregates
//! - **`validation`**: opt-in snapshot integrity diagnostics
//!
//! # Architecture
//!
//! Evaluation is a pure, synchronous computation: the caller obtains a
//! snapshot from storage, builds a `RuleContext` (tenant, actor,
//! timestamp), and receives a merged, deterministically ordered list of
//! violations. Hard violations should block confirmation in the
//! surrounding workflow; soft violations are advisory. A failing rule is
//! isolated and replaced by a synthetic soft violation, so callers always
//! get a list, never an engine failure.
//!
//! ```
//! use coop_assign::constraints::{engine, ConstraintRegistry, RuleContext};
//! use coop_assign::models::{Assignment, Task};
//! use coop_assign::snapshot::DomainSnapshot;
//!
//! let snapshot = DomainSnapshot::new(
//!     vec![
//!         Task::new("t1", "2025-08-10").with_times("09:00", "10:30"),
//!         Task::new("t2", "2025-08-10").with_times("10:00", "11:30"),
//!     ],
//!     vec![
//!         Assignment::new("a1", "t1", "ken"),
//!         Assignment::new("a2", "t2", "ken"),
//!     ],
//!     vec![],
//!     vec![],
//! );
//!
//! let registry = ConstraintRegistry::builtin();
//! let context = RuleContext::new("tenant-a", "admin", "2025-08-10T08:00:00Z");
//! let violations = engine::evaluate(&registry, &context, &snapshot);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].affected_assignments, vec!["a1", "a2"]);
//! ```

pub mod constraints;
pub mod metrics;
pub mod models;
pub mod snapshot;
pub mod validation;
