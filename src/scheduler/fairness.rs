//! Per-run assignment bookkeeping.
//!
//! [`RunTally`] holds the two pieces of state the engine keeps while it
//! walks a date range, and nothing survives the run:
//!
//! - a weekly shift counter per employee, cleared every Monday, used to
//!   enforce `max_shifts_per_week`;
//! - a days-off ledger keyed by (calendar-week index, employee), fed
//!   only by this run's own decisions, used to spread days off evenly
//!   across each week of the month.

use std::collections::HashMap;

use crate::models::EmployeeId;

/// Ephemeral counters for one engine run.
#[derive(Debug, Default)]
pub struct RunTally {
    weekly_shifts: HashMap<EmployeeId, u32>,
    days_off: HashMap<(u32, EmployeeId), u32>,
}

impl RunTally {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the weekly shift counter. Called when iteration reaches a
    /// Monday.
    pub fn start_week(&mut self) {
        self.weekly_shifts.clear();
    }

    /// Shifts worked by `id` in the current Monday-to-Sunday week.
    pub fn shifts(&self, id: EmployeeId) -> u32 {
        self.weekly_shifts.get(&id).copied().unwrap_or(0)
    }

    /// Records one placed shift for `id`.
    pub fn record_shift(&mut self, id: EmployeeId) {
        *self.weekly_shifts.entry(id).or_insert(0) += 1;
    }

    /// Days off granted to `id` in calendar week `week` by this run.
    pub fn days_off(&self, week: u32, id: EmployeeId) -> u32 {
        self.days_off.get(&(week, id)).copied().unwrap_or(0)
    }

    /// Records one day off for `id` under calendar week `week`.
    pub fn record_day_off(&mut self, week: u32, id: EmployeeId) {
        *self.days_off.entry((week, id)).or_insert(0) += 1;
    }

    /// Orders off-duty candidates by fairness.
    ///
    /// Employees still under `cap` days off this week come first, fewest
    /// days off leading; employees at or over the cap follow, in the
    /// same ascending order. The cap is a preference, never a refusal:
    /// with `cap == 0` the first bucket is simply empty. Both sorts are
    /// stable, so the caller's ordering breaks ties and seeded runs
    /// reproduce exactly.
    pub fn order_off_candidates(
        &self,
        week: u32,
        cap: u32,
        candidates: &[EmployeeId],
    ) -> Vec<EmployeeId> {
        let (mut below, mut over): (Vec<EmployeeId>, Vec<EmployeeId>) = candidates
            .iter()
            .copied()
            .partition(|&id| self.days_off(week, id) < cap);

        below.sort_by_key(|&id| self.days_off(week, id));
        over.sort_by_key(|&id| self.days_off(week, id));
        below.extend(over);
        below
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_counter_resets() {
        let mut tally = RunTally::new();
        tally.record_shift(1);
        tally.record_shift(1);
        tally.record_shift(2);
        assert_eq!(tally.shifts(1), 2);
        assert_eq!(tally.shifts(2), 1);

        tally.start_week();
        assert_eq!(tally.shifts(1), 0);
        assert_eq!(tally.shifts(2), 0);
    }

    #[test]
    fn test_days_off_ledger_is_per_week() {
        let mut tally = RunTally::new();
        tally.record_day_off(1, 5);
        tally.record_day_off(1, 5);
        tally.record_day_off(2, 5);

        assert_eq!(tally.days_off(1, 5), 2);
        assert_eq!(tally.days_off(2, 5), 1);
        assert_eq!(tally.days_off(3, 5), 0);
    }

    #[test]
    fn test_off_candidates_fewest_first() {
        let mut tally = RunTally::new();
        tally.record_day_off(1, 10);
        tally.record_day_off(1, 10);
        tally.record_day_off(1, 11);
        // 12 has no days off yet.

        let ordered = tally.order_off_candidates(1, 3, &[10, 11, 12]);
        assert_eq!(ordered, vec![12, 11, 10]);
    }

    #[test]
    fn test_capped_employees_go_last() {
        let mut tally = RunTally::new();
        tally.record_day_off(1, 10);
        tally.record_day_off(1, 10); // at the cap of 2
        tally.record_day_off(1, 11); // below the cap

        let ordered = tally.order_off_candidates(1, 2, &[10, 11, 12]);
        assert_eq!(ordered, vec![12, 11, 10]);
    }

    #[test]
    fn test_zero_cap_still_yields_everyone() {
        let mut tally = RunTally::new();
        tally.record_day_off(1, 11);

        // Nobody is "below" a cap of zero; the overflow bucket carries all.
        let ordered = tally.order_off_candidates(1, 0, &[10, 11]);
        assert_eq!(ordered, vec![10, 11]);
    }

    #[test]
    fn test_stable_ties_keep_input_order() {
        let tally = RunTally::new();
        let ordered = tally.order_off_candidates(1, 2, &[30, 10, 20]);
        assert_eq!(ordered, vec![30, 10, 20]);
    }
}
