//! Daily schedule model.
//!
//! A [`DaySchedule`] is the assignment state of one calendar date: who
//! works at each branch, who is off, a free-text memo, and whether the
//! whole store is closed. [`ScheduleBook`] is the date-keyed collection
//! the engine and the editors mutate.
//!
//! # Invariants
//! - No id appears twice within one branch roster, nor in both branch
//!   rosters on the same date.
//! - `holidays` is disjoint from both branch rosters.
//! - A closed day has empty rosters and an empty holiday list; use
//!   [`DaySchedule::close`] so the clearing happens in one place.
//!
//! Hand-edited data that breaks these is caught by
//! [`crate::validation::validate`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Branch, EmployeeId};

/// Per-branch worker id lists for one date.
///
/// Serialized as `{"A": [...], "B": [...]}`; the legacy branch keys
/// `"OS"` / `"HC"` are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRosters {
    /// Workers at branch A, in placement order.
    #[serde(rename = "A", alias = "OS", default)]
    pub a: Vec<EmployeeId>,
    /// Workers at branch B, in placement order.
    #[serde(rename = "B", alias = "HC", default)]
    pub b: Vec<EmployeeId>,
}

impl BranchRosters {
    /// The roster of one branch.
    pub fn get(&self, branch: Branch) -> &[EmployeeId] {
        match branch {
            Branch::A => &self.a,
            Branch::B => &self.b,
        }
    }

    /// Mutable roster of one branch.
    pub fn get_mut(&mut self, branch: Branch) -> &mut Vec<EmployeeId> {
        match branch {
            Branch::A => &mut self.a,
            Branch::B => &mut self.b,
        }
    }

    /// Whether `id` works at either branch.
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.a.contains(&id) || self.b.contains(&id)
    }

    /// All assigned ids, branch A first.
    pub fn assigned(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.a.iter().chain(self.b.iter()).copied()
    }

    /// Total workers across both branches.
    pub fn headcount(&self) -> usize {
        self.a.len() + self.b.len()
    }

    /// Empties both rosters.
    pub fn clear(&mut self) {
        self.a.clear();
        self.b.clear();
    }

    /// Whether both rosters are empty.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

/// The assignment state of one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// The date this entry belongs to.
    pub date: NaiveDate,
    /// Branch rosters.
    #[serde(default)]
    pub working: BranchRosters,
    /// Employees off this day.
    #[serde(default)]
    pub holidays: Vec<EmployeeId>,
    /// Free-text memo.
    #[serde(default)]
    pub memo: String,
    /// Store-wide closure; overrides all assignment.
    #[serde(default)]
    pub closed: bool,
}

impl DaySchedule {
    /// Creates an empty, open schedule for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            working: BranchRosters::default(),
            holidays: Vec::new(),
            memo: String::new(),
            closed: false,
        }
    }

    /// Marks the store closed, clearing rosters and holidays.
    pub fn close(&mut self) {
        self.closed = true;
        self.working.clear();
        self.holidays.clear();
    }

    /// Reopens a closed day. Rosters stay empty until reassigned.
    pub fn reopen(&mut self) {
        self.closed = false;
    }

    /// Whether `id` is assigned to a branch this day.
    pub fn is_assigned(&self, id: EmployeeId) -> bool {
        self.working.contains(id)
    }

    /// Whether `id` is marked off this day.
    pub fn is_off(&self, id: EmployeeId) -> bool {
        self.holidays.contains(&id)
    }
}

/// Date-keyed schedule collection.
///
/// One entry per date; entries are created on first reference and kept
/// in date order. Serializes as the `{"YYYY-MM-DD": {...}}` object the
/// data files use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleBook {
    days: BTreeMap<NaiveDate, DaySchedule>,
}

impl ScheduleBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schedule for `date`, if one exists.
    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.get(&date)
    }

    /// The schedule for `date`, created empty on first reference.
    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DaySchedule {
        self.days.entry(date).or_insert_with(|| DaySchedule::new(date))
    }

    /// Inserts (or replaces) a day entry under its own date.
    pub fn insert(&mut self, day: DaySchedule) {
        self.days.insert(day.date, day);
    }

    /// Deletes the entry for `date`.
    pub fn remove(&mut self, date: NaiveDate) -> Option<DaySchedule> {
        self.days.remove(&date)
    }

    /// Iterates entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DaySchedule)> {
        self.days.iter()
    }

    /// Number of day entries.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the book has no entries.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Strips `id` from every roster and holiday list.
    ///
    /// Run after deleting an employee from the registry. Returns the
    /// number of day entries that changed.
    pub fn purge_employee(&mut self, id: EmployeeId) -> usize {
        let mut changed = 0;
        for day in self.days.values_mut() {
            let before = day.working.headcount() + day.holidays.len();
            day.working.a.retain(|&e| e != id);
            day.working.b.retain(|&e| e != id);
            day.holidays.retain(|&e| e != id);
            if day.working.headcount() + day.holidays.len() != before {
                changed += 1;
            }
        }
        changed
    }
}
