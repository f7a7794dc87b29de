//! Rule violation model.
//!
//! The single output type of the evaluation engine. Violations are
//! ephemeral: computed fresh on every evaluation, never persisted here.

use serde::{Deserialize, Serialize};

/// Severity class of a constraint and its violations.
///
/// Ordering matters: hard violations sort before soft ones in engine
/// output, so `Hard < Soft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintLevel {
    /// Should block confirmation in the surrounding workflow.
    Hard,
    /// Advisory only; informs but never blocks.
    Soft,
}

impl std::fmt::Display for ConstraintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hard => f.write_str("hard"),
            Self::Soft => f.write_str("soft"),
        }
    }
}

/// A detected rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    /// Severity class.
    pub level: ConstraintLevel,
    /// Human-readable description of the conflict.
    pub message: String,
    /// Implicated assignment IDs, sorted and deduplicated.
    pub affected_assignments: Vec<String>,
    /// ISO-8601 timestamp of the evaluation that produced this violation.
    pub detected_at: String,
}

impl RuleViolation {
    /// Creates a violation, normalizing the affected-assignment list.
    pub fn new(
        level: ConstraintLevel,
        message: impl Into<String>,
        affected_assignments: Vec<String>,
        detected_at: impl Into<String>,
    ) -> Self {
        let mut affected = affected_assignments;
        affected.sort();
        affected.dedup();
        Self {
            level,
            message: message.into(),
            affected_assignments: affected,
            detected_at: detected_at.into(),
        }
    }

    /// Creates a hard violation.
    pub fn hard(
        message: impl Into<String>,
        affected_assignments: Vec<String>,
        detected_at: impl Into<String>,
    ) -> Self {
        Self::new(ConstraintLevel::Hard, message, affected_assignments, detected_at)
    }

    /// Creates a soft violation.
    pub fn soft(
        message: impl Into<String>,
        affected_assignments: Vec<String>,
        detected_at: impl Into<String>,
    ) -> Self {
        Self::new(ConstraintLevel::Soft, message, affected_assignments, detected_at)
    }

    /// First affected assignment ID, if any. Used for deterministic ordering.
    pub fn first_affected(&self) -> Option<&str> {
        self.affected_assignments.first().map(String::as_str)
    }
}
