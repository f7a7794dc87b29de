//! Constraint registry.
//!
//! An append-only, id-keyed mapping of constraints. Registering a second
//! constraint under an existing id is a configuration error and is refused
//! rather than silently overwriting. There is no deregistration: the set of
//! constraints is process-lifetime configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::rules::{AvailabilityMismatch, DistributionFairness, DoubleBooking};
use super::Constraint;

/// Error raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A constraint with this id is already registered.
    DuplicateConstraintId(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateConstraintId(id) => {
                write!(f, "duplicate constraint id: {id}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Id-keyed collection of constraints.
///
/// Backed by an ordered map so iteration (and therefore evaluation) order
/// is determined by constraint id, independent of registration order.
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    constraints: BTreeMap<String, Arc<dyn Constraint>>,
}

impl ConstraintRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the three built-in rules at default
    /// configuration: double-booking, availability mismatch, and
    /// distribution fairness.
    pub fn builtin() -> Self {
        let mut constraints: BTreeMap<String, Arc<dyn Constraint>> = BTreeMap::new();
        let double_booking = DoubleBooking::default();
        let availability = AvailabilityMismatch::default();
        let fairness = DistributionFairness::default();
        constraints.insert(double_booking.id().to_string(), Arc::new(double_booking));
        constraints.insert(availability.id().to_string(), Arc::new(availability));
        constraints.insert(fairness.id().to_string(), Arc::new(fairness));
        Self { constraints }
    }

    /// Registers a constraint.
    ///
    /// Fails with [`RegistryError::DuplicateConstraintId`] if a constraint
    /// with the same id is already present.
    pub fn register<C: Constraint + 'static>(&mut self, constraint: C) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(constraint))
    }

    /// Registers an already-shared constraint.
    pub fn register_arc(&mut self, constraint: Arc<dyn Constraint>) -> Result<(), RegistryError> {
        let id = constraint.id().to_string();
        if self.constraints.contains_key(&id) {
            return Err(RegistryError::DuplicateConstraintId(id));
        }
        self.constraints.insert(id, constraint);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_constraint<C: Constraint + 'static>(
        mut self,
        constraint: C,
    ) -> Result<Self, RegistryError> {
        self.register(constraint)?;
        Ok(self)
    }

    /// Whether a constraint with the given id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.constraints.contains_key(id)
    }

    /// Looks up a constraint by id.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Constraint>> {
        self.constraints.get(id)
    }

    /// Iterates constraints in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Constraint>> {
        self.constraints.values()
    }

    /// Number of registered constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintError, RuleContext};
    use crate::models::{ConstraintLevel, RuleViolation};
    use crate::snapshot::DomainSnapshot;

    #[derive(Debug)]
    struct Noop(&'static str);

    impl Constraint for Noop {
        fn id(&self) -> &str {
            self.0
        }
        fn level(&self) -> ConstraintLevel {
            ConstraintLevel::Soft
        }
        fn evaluate(
            &self,
            _context: &RuleContext,
            _snapshot: &DomainSnapshot,
        ) -> Result<Vec<RuleViolation>, ConstraintError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ConstraintRegistry::new()
            .with_constraint(Noop("a"))
            .unwrap()
            .with_constraint(Noop("b"))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert_eq!(registry.get("b").map(|c| c.id().to_string()), Some("b".into()));
    }

    #[test]
    fn test_duplicate_id_refused() {
        let mut registry = ConstraintRegistry::new();
        registry.register(Noop("a")).unwrap();
        let err = registry.register(Noop("a")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateConstraintId("a".into()));
        // The original registration survives.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_order_is_by_id() {
        let registry = ConstraintRegistry::new()
            .with_constraint(Noop("zebra"))
            .unwrap()
            .with_constraint(Noop("alpha"))
            .unwrap();

        let ids: Vec<&str> = registry.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["alpha", "zebra"]);
    }

    #[test]
    fn test_builtin_registry() {
        let registry = ConstraintRegistry::builtin();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("double-booking"));
        assert!(registry.contains("availability-mismatch"));
        assert!(registry.contains("distribution-fairness"));
    }
}
