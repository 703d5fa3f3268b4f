//! Automatic shift assignment.
//!
//! A greedy, randomized staffing pass over a date range. Not a
//! constraint solver: fixed priority rules with random tie-breaking,
//! and no guarantee of full staffing when the workforce is thin.
//!
//! # Algorithm
//!
//! For each date, in order:
//! 1. Skip closed days entirely.
//! 2. Keep pre-existing branch rosters as a fixed starting point
//!    (unless overwriting); preserved workers hold their slots.
//! 3. Filter employees available that day: not a fixed weekly day off,
//!    not a requested date off, weekly shift quota not yet reached.
//! 4. Fill branch A, then branch B, to two workers each:
//!    home cook + home non-cook pairs first, then single draws to
//!    repair the skill mix (home pool before cross pool), then anyone
//!    available in random order. A branch with no workers yet is only
//!    staffed when a pair is reachable.
//! 5. Mark everyone unassigned as off, ordered so employees with the
//!    fewest days off this calendar week come first.
//!
//! The weekly quota counter resets every Monday; the days-off ledger is
//! keyed by the Sunday-start week index of the current month
//! ([`crate::week::month_week_index`]). Both are per-run state.
//!
//! # Randomness
//!
//! Choices go through a caller-supplied [`rand::Rng`], so tests inject
//! a seeded generator; production callers pass `rand::rng()`.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::{debug, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

use super::fairness::RunTally;
use crate::models::{Branch, DaySchedule, Employee, EmployeeId, Roster, ScheduleBook};
use crate::week::month_week_index;

/// Workers per branch per day.
const BRANCH_CAPACITY: usize = 2;

/// Why an assignment run could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// The registry has no employees; nothing was modified.
    #[error("no employees are registered; add staff before running auto-assignment")]
    EmptyRoster,
    /// The start date did not parse as `YYYY-MM-DD`.
    #[error("start date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidStartDate(String),
    /// A run must cover at least one day.
    #[error("day count must be at least 1")]
    InvalidDayCount,
}

/// The date range of one assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignRequest {
    /// First date to assign.
    pub start: NaiveDate,
    /// Number of consecutive days, at least 1.
    pub days: u32,
}

impl AssignRequest {
    /// Creates a request; rejects an empty range.
    pub fn new(start: NaiveDate, days: u32) -> Result<Self, AssignError> {
        if days == 0 {
            return Err(AssignError::InvalidDayCount);
        }
        Ok(Self { start, days })
    }

    /// Parses the start date from its `YYYY-MM-DD` form.
    ///
    /// Fails fast, before any schedule is touched.
    pub fn parse(start: &str, days: u32) -> Result<Self, AssignError> {
        let start = start
            .parse()
            .map_err(|_| AssignError::InvalidStartDate(start.to_string()))?;
        Self::new(start, days)
    }

    /// The dates covered, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..u64::from(self.days)).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }
}

/// Tuning knobs for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOptions {
    /// Discard pre-existing branch rosters instead of topping them up.
    pub overwrite: bool,
    /// Preferred limit on days off per employee per calendar week.
    /// A soft preference: it orders off-duty candidates, never blocks them.
    pub weekly_off_cap: u32,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            weekly_off_cap: 2,
        }
    }
}

/// Summary of one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignOutcome {
    /// Dates visited, closed days included.
    pub days_processed: u32,
    /// Dates skipped because the store was closed.
    pub closed_days: u32,
    /// Branch placements made by this run (preserved workers excluded).
    pub shifts_placed: u32,
    /// Days off marked by this run.
    pub days_off_marked: u32,
}

/// The auto-assignment engine.
///
/// # Example
///
/// ```
/// use shift_roster::models::{Branch, Employee, Roster, ScheduleBook};
/// use shift_roster::scheduler::{AssignRequest, AutoAssigner};
///
/// let mut staff = Roster::new();
/// staff.add(Employee::cook("Kim", Branch::A));
/// staff.add(Employee::general("Lee", Branch::A));
///
/// let mut book = ScheduleBook::new();
/// let request = AssignRequest::parse("2025-08-01", 7).unwrap();
/// let outcome = AutoAssigner::new()
///     .run(request, &staff, &mut book, &mut rand::rng())
///     .unwrap();
/// assert_eq!(outcome.days_processed, 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoAssigner {
    options: AssignOptions,
}

impl AutoAssigner {
    /// Creates an engine with default options (preserve existing
    /// rosters, weekly off cap of 2).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all options at once.
    pub fn with_options(mut self, options: AssignOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets whether existing rosters are discarded.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.options.overwrite = overwrite;
        self
    }

    /// Sets the weekly days-off preference cap.
    pub fn with_weekly_off_cap(mut self, cap: u32) -> Self {
        self.options.weekly_off_cap = cap;
        self
    }

    /// Assigns shifts for every date in `request`, mutating `book` in
    /// place.
    ///
    /// Persistence is the caller's concern; the book is only touched in
    /// memory here. With an empty registry nothing is modified.
    pub fn run<R: Rng + ?Sized>(
        &self,
        request: AssignRequest,
        staff: &Roster,
        book: &mut ScheduleBook,
        rng: &mut R,
    ) -> Result<AssignOutcome, AssignError> {
        if staff.is_empty() {
            return Err(AssignError::EmptyRoster);
        }

        let mut tally = RunTally::new();
        let mut outcome = AssignOutcome::default();
        let mut week_index: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        let mut current_month: Option<(i32, u32)> = None;

        for date in request.dates() {
            outcome.days_processed += 1;

            if date.weekday() == Weekday::Mon {
                tally.start_week();
            }
            let month = (date.year(), date.month());
            if current_month != Some(month) {
                week_index = month_week_index(month.0, month.1);
                current_month = Some(month);
            }

            let day = book.day_mut(date);
            if day.closed {
                debug!("{date}: store closed, skipping");
                outcome.closed_days += 1;
                continue;
            }

            if self.options.overwrite {
                day.working.clear();
            }
            // Holidays are always recomputed; only rosters are preserved.
            day.holidays.clear();

            // Preserved workers hold their slots and count toward this
            // week's quota.
            let mut assigned_today: Vec<EmployeeId> = day.working.assigned().collect();
            for &id in &assigned_today {
                tally.record_shift(id);
            }

            let available: Vec<&Employee> = staff
                .iter()
                .filter(|e| !assigned_today.contains(&e.id))
                .filter(|e| e.can_work_on(date))
                .filter(|e| tally.shifts(e.id) < u32::from(e.max_shifts_per_week))
                .collect();

            for branch in Branch::ALL {
                outcome.shifts_placed += self.fill_branch(
                    branch,
                    staff,
                    &available,
                    &mut assigned_today,
                    day,
                    &mut tally,
                    rng,
                );
            }

            // Everyone unassigned is off today, fairest-first.
            let week = week_index.get(&date).copied().unwrap_or(1);
            let off_candidates: Vec<EmployeeId> = staff
                .iter()
                .map(|e| e.id)
                .filter(|id| !assigned_today.contains(id))
                .collect();
            for id in tally.order_off_candidates(week, self.options.weekly_off_cap, &off_candidates)
            {
                day.holidays.push(id);
                tally.record_day_off(week, id);
                outcome.days_off_marked += 1;
            }

            debug!(
                "{date}: A={:?} B={:?} off={:?}",
                day.working.a, day.working.b, day.holidays
            );
        }

        Ok(outcome)
    }

    /// Fills one branch up to [`BRANCH_CAPACITY`], returning the number
    /// of placements made.
    #[allow(clippy::too_many_arguments)]
    fn fill_branch<R: Rng + ?Sized>(
        &self,
        branch: Branch,
        staff: &Roster,
        available: &[&Employee],
        assigned_today: &mut Vec<EmployeeId>,
        day: &mut DaySchedule,
        tally: &mut RunTally,
        rng: &mut R,
    ) -> u32 {
        let occupants = day.working.get(branch).len();
        let mut slots = BRANCH_CAPACITY.saturating_sub(occupants);
        if slots == 0 {
            return 0;
        }

        let pool: Vec<&Employee> = available
            .iter()
            .copied()
            .filter(|e| !assigned_today.contains(&e.id))
            .collect();

        // An empty branch is only staffed when a pair is reachable; a
        // lone worker is never rostered alone.
        if occupants + pool.len() < BRANCH_CAPACITY {
            warn!(
                "{}: branch {branch} left short ({occupants} worker(s), {} candidate(s))",
                day.date,
                pool.len()
            );
            return 0;
        }

        let (mut home, mut cross): (Vec<&Employee>, Vec<&Employee>) =
            pool.into_iter().partition(|e| e.home_branch == branch);

        let mut placed = 0;

        // Priority 1: home cook + home non-cook pairs.
        while slots >= 2
            && home.iter().any(|e| e.is_cook())
            && home.iter().any(|e| !e.is_cook())
        {
            let Some(cook) = draw(&mut home, |e| e.is_cook(), rng) else {
                break;
            };
            let Some(other) = draw(&mut home, |e| !e.is_cook(), rng) else {
                break;
            };
            place(day, branch, cook.id, assigned_today, tally);
            place(day, branch, other.id, assigned_today, tally);
            slots -= 2;
            placed += 2;
        }

        // Priority 2: repair the skill mix, home pool before cross.
        if slots > 0 && !crew_has_skill(day, branch, staff, true) {
            if let Some(cook) =
                draw(&mut home, |e| e.is_cook(), rng).or_else(|| draw(&mut cross, |e| e.is_cook(), rng))
            {
                place(day, branch, cook.id, assigned_today, tally);
                slots -= 1;
                placed += 1;
            }
        }
        if slots > 0 && !crew_has_skill(day, branch, staff, false) {
            if let Some(other) = draw(&mut home, |e| !e.is_cook(), rng)
                .or_else(|| draw(&mut cross, |e| !e.is_cook(), rng))
            {
                place(day, branch, other.id, assigned_today, tally);
                slots -= 1;
                placed += 1;
            }
        }

        // Priority 3: anyone available, home first, random order.
        if slots > 0 {
            home.shuffle(rng);
            cross.shuffle(rng);
            for e in home.into_iter().chain(cross) {
                if slots == 0 {
                    break;
                }
                place(day, branch, e.id, assigned_today, tally);
                slots -= 1;
                placed += 1;
            }
        }

        placed
    }
}

/// Records one placement.
fn place(
    day: &mut DaySchedule,
    branch: Branch,
    id: EmployeeId,
    assigned_today: &mut Vec<EmployeeId>,
    tally: &mut RunTally,
) {
    day.working.get_mut(branch).push(id);
    assigned_today.push(id);
    tally.record_shift(id);
}

/// Whether the branch crew already has (`cook = true`) a kitchen-capable
/// worker or (`cook = false`) a front-of-house worker.
fn crew_has_skill(day: &DaySchedule, branch: Branch, staff: &Roster, cook: bool) -> bool {
    day.working
        .get(branch)
        .iter()
        .any(|&id| staff.get(id).is_some_and(|e| e.is_cook() == cook))
}

/// Removes and returns a uniformly random pool member matching `pred`.
fn draw<'a, R: Rng + ?Sized>(
    pool: &mut Vec<&'a Employee>,
    pred: impl Fn(&Employee) -> bool,
    rng: &mut R,
) -> Option<&'a Employee> {
    let matching: Vec<usize> = (0..pool.len()).filter(|&i| pred(pool[i])).collect();
    let &at = matching.choose(rng)?;
    Some(pool.remove(at))
}
