//! Assignment model.
//!
//! An assignment links one person to one task. Draft assignments are
//! proposals; confirmed assignments are committed. Both participate in
//! conflict detection.

use serde::{Deserialize, Serialize};

/// Commitment state of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Proposed, not yet committed.
    #[default]
    Draft,
    /// Committed.
    Confirmed,
}

/// A person-to-task assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: String,
    /// Task being filled.
    pub task_id: String,
    /// Person filling it.
    pub person_id: String,
    /// Role the person fills on this task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Commitment state.
    #[serde(default)]
    pub status: AssignmentStatus,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Assignment {
    /// Creates a new draft assignment.
    pub fn new(
        id: impl Into<String>,
        task_id: impl Into<String>,
        person_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            person_id: person_id.into(),
            role: None,
            status: AssignmentStatus::Draft,
            note: None,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Marks the assignment as confirmed.
    pub fn confirmed(mut self) -> Self {
        self.status = AssignmentStatus::Confirmed;
        self
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
