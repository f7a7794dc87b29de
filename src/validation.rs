//! Snapshot integrity diagnostics.
//!
//! Opt-in structural checks for the storage collaborator. Detects:
//! - Duplicate IDs across each collection
//! - Assignments referencing unknown tasks or persons
//! - Availability records referencing unknown persons
//! - More than one availability record per (person, date)
//!
//! The evaluation engine never runs these: rules silently skip records
//! they cannot resolve, and reporting broken data is the storage layer's
//! job. This module is the tool for that job.

use std::collections::HashSet;

use crate::snapshot::DomainSnapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A snapshot integrity error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of snapshot integrity errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records in one collection share the same ID.
    DuplicateId,
    /// An assignment references a task that doesn't exist.
    UnknownTask,
    /// An assignment or availability record references a person that
    /// doesn't exist.
    UnknownPerson,
    /// A person has more than one availability record for one date.
    DuplicateAvailability,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structural integrity of a snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &DomainSnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in &snapshot.tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
    }

    let mut person_ids = HashSet::new();
    for person in &snapshot.persons {
        if !person_ids.insert(person.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate person ID: {}", person.id),
            ));
        }
    }

    let mut assignment_ids = HashSet::new();
    for assignment in &snapshot.assignments {
        if !assignment_ids.insert(assignment.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate assignment ID: {}", assignment.id),
            ));
        }
        if !task_ids.contains(assignment.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTask,
                format!(
                    "Assignment '{}' references unknown task '{}'",
                    assignment.id, assignment.task_id
                ),
            ));
        }
        if !person_ids.contains(assignment.person_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownPerson,
                format!(
                    "Assignment '{}' references unknown person '{}'",
                    assignment.id, assignment.person_id
                ),
            ));
        }
    }

    let mut availability_ids = HashSet::new();
    let mut availability_keys = HashSet::new();
    for record in &snapshot.availability {
        if !availability_ids.insert(record.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate availability ID: {}", record.id),
            ));
        }
        if !person_ids.contains(record.person_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownPerson,
                format!(
                    "Availability '{}' references unknown person '{}'",
                    record.id, record.person_id
                ),
            ));
        }
        if !availability_keys.insert((record.person_id.as_str(), record.date.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateAvailability,
                format!(
                    "Person '{}' has more than one availability record on {}",
                    record.person_id, record.date
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
