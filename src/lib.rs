//! Two-branch staff rostering.
//!
//! Assigns employees to daily shifts across two store branches, tracks
//! holidays and closures, and merges safely with manual edits. The
//! heart of the crate is [`scheduler::AutoAssigner`], a greedy
//! randomized engine balancing skill mix, home-branch preference,
//! weekly shift quotas, and an even spread of days off across each
//! calendar week.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `Roster`, `DaySchedule`,
//!   `ScheduleBook`, the `Branch` and `SkillLevel` classifications
//! - **`week`**: Sunday-start calendar-week indexing within a month
//! - **`scheduler`**: The auto-assignment engine and its per-run
//!   fairness bookkeeping
//! - **`validation`**: Registry/schedule integrity checks (duplicate
//!   ids, double bookings, dangling references)
//! - **`attendance`**: Punch-clock records, separate from planning
//! - **`store`**: Flat-file JSON persistence with atomic writes
//!
//! # Example
//!
//! ```no_run
//! use shift_roster::scheduler::{AssignOptions, AssignRequest};
//! use shift_roster::store::FlatFileStore;
//!
//! let store = FlatFileStore::new("data");
//! let request = AssignRequest::parse("2025-08-01", 31)?;
//! let outcome = store.run_auto_assign(
//!     request,
//!     AssignOptions::default(),
//!     &mut rand::rng(),
//! )?;
//! println!("placed {} shifts", outcome.shifts_placed);
//! # Ok::<(), shift_roster::store::StoreError>(())
//! ```
//!
//! Randomized choices run through a caller-supplied [`rand::Rng`];
//! output is non-deterministic by design unless a seeded generator is
//! injected.

pub mod attendance;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;
pub mod week;
