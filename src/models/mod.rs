//! Assignment-ledger domain models.
//!
//! Core data types for cooperative assignment scheduling: people, their
//! declared availability, dated tasks, and the assignments linking them.
//! All types are tenant-scoped by their owning snapshot and serialize to
//! the upstream camelCase document shape.
//!
//! # Domain Mappings
//!
//! | coop-assign | Sports officiating | Volunteering | Shift work |
//! |-------------|--------------------|--------------|------------|
//! | Person | Umpire | Volunteer | Employee |
//! | Task | Match | Event slot | Shift |
//! | Availability | Availability sheet | Sign-up sheet | Absence record |
//! | Assignment | Appointment | Booking | Roster entry |

mod assignment;
mod availability;
mod person;
mod task;
mod timeslot;
mod violation;

pub use assignment::{Assignment, AssignmentStatus};
pub use availability::{Availability, AvailabilitySlot};
pub use person::Person;
pub use task::{Task, TaskStatus};
pub use timeslot::{format_hhmm, parse_hhmm, MinuteWindow, MINUTES_PER_DAY, NOON_MIN};
pub use violation::{ConstraintLevel, RuleViolation};
