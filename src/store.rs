//! Flat-file persistence.
//!
//! All state lives as JSON files under one data directory:
//! `employees.json`, `schedules.json`, `attendance.json`, plus the
//! free-text `notes.txt`. Missing or empty files load as empty
//! collections; corrupt files are an error rather than a silent reset.
//! Writes go through a temporary file and a rename, so a crash
//! mid-write never leaves a half-written data file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::attendance::AttendanceBook;
use crate::models::{Roster, ScheduleBook};
use crate::scheduler::{AssignError, AssignOptions, AssignOutcome, AssignRequest, AutoAssigner};

const EMPLOYEES_FILE: &str = "employees.json";
const SCHEDULES_FILE: &str = "schedules.json";
const ATTENDANCE_FILE: &str = "attendance.json";
const NOTES_FILE: &str = "notes.txt";

/// Why a store operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a data file failed.
    #[error("i/o failure on {path}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A data file exists but does not parse.
    #[error("malformed data in {path}")]
    Malformed {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The assignment engine rejected the run.
    #[error(transparent)]
    Assign(#[from] AssignError),
}

/// JSON persistence rooted at one data directory.
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    /// Creates a store over `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the employee registry.
    pub fn load_employees(&self) -> Result<Roster, StoreError> {
        self.load_json(EMPLOYEES_FILE)
    }

    /// Persists the employee registry.
    pub fn save_employees(&self, staff: &Roster) -> Result<(), StoreError> {
        self.save_json(EMPLOYEES_FILE, staff)
    }

    /// Loads the schedule book.
    pub fn load_schedules(&self) -> Result<ScheduleBook, StoreError> {
        self.load_json(SCHEDULES_FILE)
    }

    /// Persists the schedule book.
    pub fn save_schedules(&self, book: &ScheduleBook) -> Result<(), StoreError> {
        self.save_json(SCHEDULES_FILE, book)
    }

    /// Loads the attendance book.
    pub fn load_attendance(&self) -> Result<AttendanceBook, StoreError> {
        self.load_json(ATTENDANCE_FILE)
    }

    /// Persists the attendance book.
    pub fn save_attendance(&self, attendance: &AttendanceBook) -> Result<(), StoreError> {
        self.save_json(ATTENDANCE_FILE, attendance)
    }

    /// Loads the notes text; a missing file reads as empty.
    pub fn load_notes(&self) -> Result<String, StoreError> {
        let path = self.path(NOTES_FILE);
        if !path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&path).map_err(|source| StoreError::Io { path, source })
    }

    /// Persists the notes text.
    pub fn save_notes(&self, text: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.path(NOTES_FILE);
        fs::write(&path, text).map_err(|source| StoreError::Io { path, source })
    }

    /// Loads registry and schedules, runs the assignment engine, and
    /// persists the updated schedules.
    ///
    /// The book is saved exactly once, after the whole range succeeds;
    /// a failed run leaves the files untouched.
    pub fn run_auto_assign<R: Rng + ?Sized>(
        &self,
        request: AssignRequest,
        options: AssignOptions,
        rng: &mut R,
    ) -> Result<AssignOutcome, StoreError> {
        let staff = self.load_employees()?;
        let mut book = self.load_schedules()?;

        let outcome = AutoAssigner::new()
            .with_options(options)
            .run(request, &staff, &mut book, rng)?;

        self.save_schedules(&book)?;
        info!(
            "auto-assigned {} day(s) from {}: {} shift(s) placed, {} day(s) off",
            outcome.days_processed, request.start, outcome.shifts_placed, outcome.days_off_marked
        );
        Ok(outcome)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    fn load_json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.path(name);
        if !path.exists() {
            debug!("{}: missing, loading empty", path.display());
            return Ok(T::default());
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed { path, source })
    }

    fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.path(name);
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;

        // Write to the side, then swap in.
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        debug!("saved {}", name);
        Ok(())
    }
}
