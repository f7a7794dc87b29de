//! Constraints and the evaluation engine.
//!
//! A constraint is a named, leveled, pure rule evaluated against one
//! snapshot. Constraints are registered once into a [`ConstraintRegistry`]
//! and run together by [`engine::evaluate`], which merges, deduplicates,
//! and deterministically orders their violations.
//!
//! # Usage
//!
//! ```
//! use coop_assign::constraints::{engine, ConstraintRegistry, RuleContext};
//! use coop_assign::snapshot::DomainSnapshot;
//!
//! let registry = ConstraintRegistry::builtin();
//! let context = RuleContext::new("tenant-a", "admin", "2025-08-10T08:00:00Z");
//! let snapshot = DomainSnapshot::default();
//! let violations = engine::evaluate(&registry, &context, &snapshot);
//! assert!(violations.is_empty());
//! ```

mod context;
pub mod engine;
mod registry;
pub mod rules;

pub use context::RuleContext;
pub use registry::{ConstraintRegistry, RegistryError};

use std::fmt::Debug;

use crate::models::{ConstraintLevel, RuleViolation};
use crate::snapshot::DomainSnapshot;

/// A pluggable scheduling rule.
///
/// Implementations must be pure with respect to the snapshot: same context
/// and snapshot in, same violations out. Any state a rule carries is
/// process-lifetime configuration, never per-evaluation mutation.
///
/// Returning `Err` marks the rule as failed for this evaluation; the engine
/// isolates the failure and substitutes a synthetic soft violation instead
/// of aborting the call.
pub trait Constraint: Send + Sync + Debug {
    /// Unique constraint identifier (registry key).
    fn id(&self) -> &str;

    /// Severity class of the violations this rule emits.
    fn level(&self) -> ConstraintLevel;

    /// Human-readable description.
    fn description(&self) -> &str {
        self.id()
    }

    /// Evaluates the rule against one snapshot.
    fn evaluate(
        &self,
        context: &RuleContext,
        snapshot: &DomainSnapshot,
    ) -> Result<Vec<RuleViolation>, ConstraintError>;
}

/// Failure raised by a single constraint during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintError {
    /// What went wrong.
    pub message: String,
}

impl ConstraintError {
    /// Creates a new constraint error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConstraintError {}
