//! The automatic shift assignment engine.
//!
//! `AutoAssigner` staffs both branches over a date range with a greedy,
//! randomized heuristic: home cook/non-cook pairs first, then skill-mix
//! repair, then anyone available. `RunTally` carries the per-run
//! fairness bookkeeping: the Monday-reset weekly shift counter and the
//! per-calendar-week days-off ledger.
//!
//! # Usage
//!
//! ```no_run
//! use shift_roster::models::{Roster, ScheduleBook};
//! use shift_roster::scheduler::{AssignRequest, AutoAssigner};
//!
//! # fn load() -> (Roster, ScheduleBook) { unimplemented!() }
//! let (staff, mut book) = load();
//! let request = AssignRequest::parse("2025-08-01", 31)?;
//! AutoAssigner::new()
//!     .with_weekly_off_cap(2)
//!     .run(request, &staff, &mut book, &mut rand::rng())?;
//! # Ok::<(), shift_roster::scheduler::AssignError>(())
//! ```

mod auto;
mod fairness;

pub use auto::{AssignError, AssignOptions, AssignOutcome, AssignRequest, AutoAssigner};
pub use fairness::RunTally;
