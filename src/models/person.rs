//! Person model.
//!
//! A person is someone who can be assigned to tasks: a volunteer, umpire,
//! or staff member. Identity is tenant-scoped and immutable for the
//! lifetime of a snapshot.

use serde::{Deserialize, Serialize};

/// A person who can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique person identifier.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Free-form labels (may encode a proficiency grade).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Role names this person may fill.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Person {
    /// Creates a new person with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            tags: Vec::new(),
            skills: Vec::new(),
            note: None,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a skill (role name this person may fill).
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether this person has a given skill.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s == name)
    }

    /// Display name if set, otherwise the ID.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_builder() {
        let p = Person::new("p1")
            .with_display_name("Ume")
            .with_tag("grade-A")
            .with_skill("referee")
            .with_skill("scorer")
            .with_note("prefers mornings");

        assert_eq!(p.id, "p1");
        assert_eq!(p.display_name, "Ume");
        assert_eq!(p.tags, vec!["grade-A"]);
        assert!(p.has_skill("referee"));
        assert!(!p.has_skill("coach"));
        assert_eq!(p.label(), "Ume");
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let p = Person::new("p1");
        assert_eq!(p.label(), "p1");
    }

    #[test]
    fn test_person_json_shape() {
        let p = Person::new("p1").with_display_name("Ume").with_skill("referee");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["displayName"], "Ume");
        assert_eq!(json["skills"][0], "referee");

        let back: Person = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_person_deserializes_minimal_document() {
        let p: Person =
            serde_json::from_str(r#"{"id":"p1","displayName":"Ken"}"#).unwrap();
        assert!(p.tags.is_empty());
        assert!(p.skills.is_empty());
        assert!(p.note.is_none());
    }
}
