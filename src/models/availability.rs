//! Availability model.
//!
//! One record per `(person, date)` declaring a half-day or full-day slot.
//! Absence of a record means "unknown/unconstrained" and is treated as
//! permissive by the rules — never as an implicit denial.

use serde::{Deserialize, Serialize};

use super::MinuteWindow;

/// A person's declared availability for one date.
///
/// Wire-compatible with the upstream document shape: `NONE`, `AM`, `PM`,
/// `FULL` slot tokens and ISO `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AvailabilitySlot {
    /// Not available at all that day.
    None,
    /// Available in the morning half only ([00:00, 12:00)).
    Am,
    /// Available in the afternoon half only ([12:00, 24:00)).
    Pm,
    /// Available the whole day.
    Full,
}

impl AvailabilitySlot {
    /// Whether a task window is compatible with this slot.
    ///
    /// `None` permits nothing. `Am`/`Pm` reject a window only when it falls
    /// entirely within the opposite half of the day; a window straddling
    /// noon is still (partially) workable and therefore permitted.
    pub fn permits(&self, window: &MinuteWindow) -> bool {
        match self {
            Self::None => false,
            Self::Full => true,
            Self::Am => !window.within_pm(),
            Self::Pm => !window.within_am(),
        }
    }
}

impl std::fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::None => "NONE",
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Full => "FULL",
        };
        f.write_str(token)
    }
}

/// An availability record for one `(person, date)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Unique record identifier.
    pub id: String,
    /// Person this record belongs to.
    pub person_id: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    /// Declared slot for that date.
    pub slot: AvailabilitySlot,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Availability {
    /// Creates a new availability record.
    pub fn new(
        id: impl Into<String>,
        person_id: impl Into<String>,
        date: impl Into<String>,
        slot: AvailabilitySlot,
    ) -> Self {
        Self {
            id: id.into(),
            person_id: person_id.into(),
            date: date.into(),
            slot,
            note: None,
        }
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_permits() {
        let morning = MinuteWindow::new(540, 660); // 09:00-11:00
        let afternoon = MinuteWindow::new(780, 900); // 13:00-15:00
        let straddling = MinuteWindow::new(660, 780); // 11:00-13:00
        let all_day = MinuteWindow::all_day();

        assert!(!AvailabilitySlot::None.permits(&morning));
        assert!(!AvailabilitySlot::None.permits(&all_day));

        assert!(AvailabilitySlot::Full.permits(&morning));
        assert!(AvailabilitySlot::Full.permits(&all_day));

        assert!(AvailabilitySlot::Am.permits(&morning));
        assert!(!AvailabilitySlot::Am.permits(&afternoon));
        assert!(AvailabilitySlot::Am.permits(&straddling));
        assert!(AvailabilitySlot::Am.permits(&all_day));

        assert!(AvailabilitySlot::Pm.permits(&afternoon));
        assert!(!AvailabilitySlot::Pm.permits(&morning));
        assert!(AvailabilitySlot::Pm.permits(&straddling));
    }

    #[test]
    fn test_slot_serde_tokens() {
        assert_eq!(
            serde_json::to_string(&AvailabilitySlot::None).unwrap(),
            "\"NONE\""
        );
        assert_eq!(
            serde_json::from_str::<AvailabilitySlot>("\"PM\"").unwrap(),
            AvailabilitySlot::Pm
        );
    }

    #[test]
    fn test_availability_json_shape() {
        let a = Availability::new("av1", "p1", "2025-08-10", AvailabilitySlot::Am);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["personId"], "p1");
        assert_eq!(json["slot"], "AM");

        let back: Availability = serde_json::from_value(json).unwrap();
        assert_eq!(back, a);
    }
}
