//! Rostering domain models.
//!
//! Provides the core data types of the scheduler: who can work
//! ([`Employee`], collected in a [`Roster`]) and what each day looks
//! like ([`DaySchedule`], collected in a [`ScheduleBook`]). These are
//! the persisted shapes; the assignment engine consumes and mutates
//! them without owning them.

mod employee;
mod schedule;

pub use employee::{Branch, Employee, EmployeeId, Roster, SkillLevel};
pub use schedule::{BranchRosters, DaySchedule, ScheduleBook};
