//! Rule evaluation context.

/// Immutable calling context passed to every rule.
///
/// Identifies the tenant whose data is being evaluated, the acting user,
/// and the evaluation timestamp (stamped onto every violation as
/// `detected_at`, so a fixed context yields byte-identical output).
/// Carries no mutable state; the engine stays stateless between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    /// Tenant whose records are being evaluated.
    pub tenant_id: String,
    /// User on whose behalf the evaluation runs.
    pub actor_id: String,
    /// ISO-8601 evaluation timestamp.
    pub timestamp: String,
}

impl RuleContext {
    /// Creates a new context.
    pub fn new(
        tenant_id: impl Into<String>,
        actor_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            actor_id: actor_id.into(),
            timestamp: timestamp.into(),
        }
    }
}
