//! Domain snapshot: the immutable per-evaluation view.
//!
//! A snapshot is a consistent read of one tenant's tasks, assignments,
//! persons, and availability records over some date range, supplied by the
//! storage collaborator. The engine never mutates it; derived lookup
//! structures are built per evaluation call and discarded afterward.
//!
//! All four collections are required when deserializing. A document missing
//! one of them is a malformed snapshot and fails at the boundary, before
//! any rule runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Availability, Person, Task};

/// Read-only view of the domain records for one evaluation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSnapshot {
    /// Tasks in the evaluation window.
    pub tasks: Vec<Task>,
    /// Assignments referencing those tasks.
    pub assignments: Vec<Assignment>,
    /// Persons referenced by assignments and availability.
    pub persons: Vec<Person>,
    /// Availability records in the evaluation window.
    pub availability: Vec<Availability>,
}

impl DomainSnapshot {
    /// Creates a snapshot from the four collections.
    pub fn new(
        tasks: Vec<Task>,
        assignments: Vec<Assignment>,
        persons: Vec<Person>,
        availability: Vec<Availability>,
    ) -> Self {
        Self {
            tasks,
            assignments,
            persons,
            availability,
        }
    }

    /// Builds per-call lookup indexes over this snapshot.
    pub fn index(&self) -> SnapshotIndex<'_> {
        SnapshotIndex::build(self)
    }

    /// The inclusive date range spanned by the snapshot's tasks.
    ///
    /// ISO dates compare lexicographically, so plain `min`/`max` suffice.
    /// Returns `None` for a snapshot without tasks.
    pub fn task_date_range(&self) -> Option<(&str, &str)> {
        let first = self.tasks.first()?;
        let mut min = first.date.as_str();
        let mut max = first.date.as_str();
        for task in &self.tasks[1..] {
            let date = task.date.as_str();
            if date < min {
                min = date;
            }
            if date > max {
                max = date;
            }
        }
        Some((min, max))
    }
}

/// Borrowed lookup indexes over one snapshot.
///
/// Local to one evaluation call; cheap to rebuild, never cached across calls.
#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    tasks: BTreeMap<&'a str, &'a Task>,
    persons: BTreeMap<&'a str, &'a Person>,
    availability: BTreeMap<(&'a str, &'a str), &'a Availability>,
}

impl<'a> SnapshotIndex<'a> {
    fn build(snapshot: &'a DomainSnapshot) -> Self {
        let mut tasks = BTreeMap::new();
        for task in &snapshot.tasks {
            tasks.entry(task.id.as_str()).or_insert(task);
        }

        let mut persons = BTreeMap::new();
        for person in &snapshot.persons {
            persons.entry(person.id.as_str()).or_insert(person);
        }

        // A consistent snapshot has one record per (person, date); on
        // inconsistent input the first record wins.
        let mut availability = BTreeMap::new();
        for record in &snapshot.availability {
            availability
                .entry((record.person_id.as_str(), record.date.as_str()))
                .or_insert(record);
        }

        Self {
            tasks,
            persons,
            availability,
        }
    }

    /// Looks up a task by ID.
    pub fn task(&self, id: &str) -> Option<&'a Task> {
        self.tasks.get(id).copied()
    }

    /// Looks up a person by ID.
    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.persons.get(id).copied()
    }

    /// Looks up the availability record for a person on a date.
    pub fn availability(&self, person_id: &str, date: &str) -> Option<&'a Availability> {
        self.availability.get(&(person_id, date)).copied()
    }

    /// Display label for a person: display name if known, else the raw ID.
    pub fn person_label(&self, person_id: &'a str) -> &'a str {
        match self.person(person_id) {
            Some(person) => person.label(),
            None => person_id,
        }
    }
}
