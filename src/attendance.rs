//! Punch-clock bookkeeping.
//!
//! Tracks actual clock-in/out times per employee per date, separate
//! from the planned rosters. Punches are first-write-wins: repeating a
//! punch never overwrites the recorded time, only an explicit
//! adjustment does. The clock itself stays with the caller — every
//! operation takes the time to record, so tests and backfills are
//! trivial.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::EmployeeId;

/// One employee's recorded punches for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCard {
    /// First clock-in of the day.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveTime>,
    /// First clock-out of the day.
    #[serde(rename = "out", default, skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveTime>,
}

impl TimeCard {
    /// Whether neither punch is recorded.
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none()
    }
}

/// Punch records keyed by date, then employee.
///
/// Empty cards and empty days are dropped eagerly, so the serialized
/// file never accumulates hollow entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceBook {
    days: BTreeMap<NaiveDate, BTreeMap<EmployeeId, TimeCard>>,
}

impl AttendanceBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The card for `id` on `date`, if any punch is recorded.
    pub fn card(&self, date: NaiveDate, id: EmployeeId) -> Option<&TimeCard> {
        self.days.get(&date)?.get(&id)
    }

    /// Records a clock-in. Only the first punch of the day sticks;
    /// returns whether this one was recorded.
    pub fn punch_in(&mut self, date: NaiveDate, id: EmployeeId, time: NaiveTime) -> bool {
        let card = self
            .days
            .entry(date)
            .or_default()
            .entry(id)
            .or_default();
        if card.clock_in.is_some() {
            return false;
        }
        card.clock_in = Some(time);
        true
    }

    /// Records a clock-out. Only the first punch of the day sticks;
    /// returns whether this one was recorded.
    pub fn punch_out(&mut self, date: NaiveDate, id: EmployeeId, time: NaiveTime) -> bool {
        let card = self
            .days
            .entry(date)
            .or_default()
            .entry(id)
            .or_default();
        if card.clock_out.is_some() {
            return false;
        }
        card.clock_out = Some(time);
        true
    }

    /// Sets or clears the clock-in time (manager adjustment).
    pub fn set_clock_in(&mut self, date: NaiveDate, id: EmployeeId, time: Option<NaiveTime>) {
        self.days.entry(date).or_default().entry(id).or_default().clock_in = time;
        self.prune(date, id);
    }

    /// Sets or clears the clock-out time (manager adjustment).
    pub fn set_clock_out(&mut self, date: NaiveDate, id: EmployeeId, time: Option<NaiveTime>) {
        self.days.entry(date).or_default().entry(id).or_default().clock_out = time;
        self.prune(date, id);
    }

    /// Iterates recorded days in date order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&NaiveDate, &BTreeMap<EmployeeId, TimeCard>)> {
        self.days.iter()
    }

    /// Number of dates with at least one punch.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no punches are recorded at all.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Drops the card if both punches were cleared, and the day if it
    /// held only that card.
    fn prune(&mut self, date: NaiveDate, id: EmployeeId) {
        if let Some(day) = self.days.get_mut(&date) {
            if day.get(&id).is_some_and(|c| c.is_empty()) {
                day.remove(&id);
            }
            if day.is_empty() {
                self.days.remove(&date);
            }
        }
    }
}
