//! Employee model and registry.
//!
//! Employees are the people rostered onto branch shifts. Each record
//! carries the attributes the assignment engine cares about: kitchen
//! skill, home branch, permanent weekly days off, dated holiday
//! requests, and the weekly shift quota.
//!
//! # Weekday Numbering
//! Fixed holidays are stored as weekday indices 0-6 where 0 = Monday
//! and 6 = Sunday. Use [`Employee::is_fixed_holiday`] instead of
//! touching the raw set.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique employee identifier, assigned monotonically by the registry.
pub type EmployeeId = u32;

/// One of the two store branches.
///
/// `A` and `B` are the canonical codes everywhere in this crate. The
/// legacy storage codes `"OS"` and `"HC"` are accepted when reading old
/// data files but are never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// First branch (legacy code `OS`). Filled first by the engine.
    #[serde(alias = "OS")]
    A,
    /// Second branch (legacy code `HC`).
    #[serde(alias = "HC")]
    B,
}

impl Branch {
    /// Both branches, in fill order.
    pub const ALL: [Branch; 2] = [Branch::A, Branch::B];

    /// Canonical branch code.
    pub fn code(&self) -> &'static str {
        match self {
            Branch::A => "A",
            Branch::B => "B",
        }
    }

    /// The opposite branch.
    pub fn other(&self) -> Branch {
        match self {
            Branch::A => Branch::B,
            Branch::B => Branch::A,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kitchen skill classification.
///
/// Serialized as the storage codes `"C"` / `"N"`; the spelled-out
/// legacy values `"cook"` / `"nocook"` are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    /// Can run the kitchen.
    #[serde(rename = "C", alias = "cook")]
    Cook,
    /// Front-of-house only.
    #[serde(rename = "N", alias = "nocook")]
    General,
}

impl SkillLevel {
    /// Whether this is the kitchen-capable level.
    #[inline]
    pub fn is_cook(&self) -> bool {
        matches!(self, SkillLevel::Cook)
    }
}

fn default_max_shifts() -> u8 {
    6
}

/// An employee record.
///
/// Quota invariant: `min_shifts_per_week <= max_shifts_per_week`.
/// [`Employee::with_quota`] enforces it; hand-edited data is checked by
/// [`crate::validation::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique id. `0` means "not yet registered"; [`Roster::add`]
    /// assigns the real one.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Display role (owner, manager, staff...). Free text.
    #[serde(default)]
    pub role: String,
    /// Kitchen skill.
    #[serde(rename = "skill_level")]
    pub skill: SkillLevel,
    /// Branch this employee normally works at.
    pub home_branch: Branch,
    /// Weekday indices (0 = Monday .. 6 = Sunday) that are permanent days off.
    #[serde(default)]
    pub fixed_holidays: BTreeSet<u8>,
    /// Specific dates requested off.
    #[serde(default)]
    pub holiday_requests: BTreeSet<NaiveDate>,
    /// Minimum shifts per week. Informational; the engine only caps.
    #[serde(default)]
    pub min_shifts_per_week: u8,
    /// Maximum shifts per calendar week.
    #[serde(default = "default_max_shifts")]
    pub max_shifts_per_week: u8,
}

impl Employee {
    /// Creates an unregistered employee with default quota (0..=6).
    pub fn new(name: impl Into<String>, skill: SkillLevel, home_branch: Branch) -> Self {
        Self {
            id: 0,
            name: name.into(),
            role: String::new(),
            skill,
            home_branch,
            fixed_holidays: BTreeSet::new(),
            holiday_requests: BTreeSet::new(),
            min_shifts_per_week: 0,
            max_shifts_per_week: default_max_shifts(),
        }
    }

    /// Creates a kitchen-capable employee.
    pub fn cook(name: impl Into<String>, home_branch: Branch) -> Self {
        Self::new(name, SkillLevel::Cook, home_branch)
    }

    /// Creates a front-of-house employee.
    pub fn general(name: impl Into<String>, home_branch: Branch) -> Self {
        Self::new(name, SkillLevel::General, home_branch)
    }

    /// Sets the display role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Adds a permanent weekly day off.
    pub fn with_fixed_holiday(mut self, weekday: Weekday) -> Self {
        self.fixed_holidays
            .insert(weekday.num_days_from_monday() as u8);
        self
    }

    /// Adds a dated holiday request.
    pub fn with_holiday_request(mut self, date: NaiveDate) -> Self {
        self.holiday_requests.insert(date);
        self
    }

    /// Sets the weekly shift quota. `min` is clamped to `max`.
    pub fn with_quota(mut self, min: u8, max: u8) -> Self {
        self.max_shifts_per_week = max;
        self.min_shifts_per_week = min.min(max);
        self
    }

    /// Whether this employee is kitchen-capable.
    #[inline]
    pub fn is_cook(&self) -> bool {
        self.skill.is_cook()
    }

    /// Whether `weekday` is one of this employee's permanent days off.
    pub fn is_fixed_holiday(&self, weekday: Weekday) -> bool {
        self.fixed_holidays
            .contains(&(weekday.num_days_from_monday() as u8))
    }

    /// Whether this employee requested `date` off.
    pub fn has_requested_off(&self, date: NaiveDate) -> bool {
        self.holiday_requests.contains(&date)
    }

    /// Whether this employee can work on `date` at all (ignores quota).
    pub fn can_work_on(&self, date: NaiveDate) -> bool {
        !self.is_fixed_holiday(date.weekday()) && !self.has_requested_off(date)
    }
}

/// The employee registry.
///
/// A thin ordered collection that owns id assignment. Deleting an
/// employee does not touch schedules; run
/// [`crate::models::ScheduleBook::purge_employee`] afterwards so past
/// rosters stop referencing the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next id [`Roster::add`] would assign.
    pub fn next_id(&self) -> EmployeeId {
        self.employees.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }

    /// Registers an employee, assigning the next free id.
    ///
    /// Returns the assigned id.
    pub fn add(&mut self, mut employee: Employee) -> EmployeeId {
        employee.id = self.next_id();
        let id = employee.id;
        self.employees.push(employee);
        id
    }

    /// Inserts an employee keeping its existing id.
    ///
    /// For loaders and fixtures; uniqueness is the caller's problem and
    /// is checked by [`crate::validation::validate`].
    pub fn push(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Looks up an employee by id.
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id == id)
    }

    /// Removes an employee, returning the record if it existed.
    pub fn remove(&mut self, id: EmployeeId) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| e.id == id)?;
        Some(self.employees.remove(pos))
    }

    /// Iterates employees in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }

    /// Number of registered employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
