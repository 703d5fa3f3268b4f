//! Registry and schedule consistency checks.
//!
//! The assignment engine assumes its inputs are clean: unique employee
//! ids, sane quotas, and day schedules that reference only registered
//! employees exactly once. Manual edits and employee deletions can
//! break that, so callers run `validate` (and
//! [`crate::models::ScheduleBook::purge_employee`] for dangling ids)
//! before re-assigning. Detects:
//! - Duplicate employee ids
//! - Inverted weekly quotas (`min > max`)
//! - An id booked twice on one date (within or across branches)
//! - An id both working and off on one date
//! - A closed day that still has workers or holidays
//! - Schedule references to employees missing from the registry

use crate::models::{Branch, Roster, ScheduleBook};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees share the same id.
    DuplicateId,
    /// An employee's minimum weekly shifts exceed the maximum.
    QuotaInverted,
    /// An id appears more than once in a day's branch rosters.
    DoubleBooking,
    /// An id is both working and marked off on the same date.
    WorkingOffOverlap,
    /// A closed day still has workers or holidays recorded.
    ClosedDayOccupied,
    /// A schedule references an id missing from the registry.
    UnknownEmployee,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the registry and the schedule book together.
///
/// Collects every detected issue rather than stopping at the first.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate(staff: &Roster, book: &ScheduleBook) -> ValidationResult {
    let mut errors = Vec::new();

    let mut known_ids = HashSet::new();
    for employee in staff.iter() {
        if !known_ids.insert(employee.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee id: {}", employee.id),
            ));
        }
        if employee.min_shifts_per_week > employee.max_shifts_per_week {
            errors.push(ValidationError::new(
                ValidationErrorKind::QuotaInverted,
                format!(
                    "Employee {} ('{}') has min shifts {} above max {}",
                    employee.id,
                    employee.name,
                    employee.min_shifts_per_week,
                    employee.max_shifts_per_week
                ),
            ));
        }
    }

    for (date, day) in book.iter() {
        if day.closed && (!day.working.is_empty() || !day.holidays.is_empty()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ClosedDayOccupied,
                format!("{date} is closed but still has assignments"),
            ));
        }

        let mut booked = HashSet::new();
        for branch in Branch::ALL {
            for &id in day.working.get(branch) {
                if !booked.insert(id) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooking,
                        format!("{date}: employee {id} is booked twice"),
                    ));
                }
            }
        }

        for &id in &day.holidays {
            if booked.contains(&id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WorkingOffOverlap,
                    format!("{date}: employee {id} is both working and off"),
                ));
            }
        }

        for id in day.working.assigned().chain(day.holidays.iter().copied()) {
            if !known_ids.contains(&id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownEmployee,
                    format!("{date}: employee {id} is not in the registry"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Branch, Employee, Roster, ScheduleBook};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_staff() -> Roster {
        let mut staff = Roster::new();
        staff.add(Employee::cook("Kim", Branch::A));
        staff.add(Employee::general("Lee", Branch::B));
        staff
    }

    #[test]
    fn test_valid_input() {
        let staff = sample_staff();
        let mut book = ScheduleBook::new();
        {
            let day = book.day_mut(date("2025-08-01"));
            day.working.a.push(1);
            day.holidays.push(2);
        }
        assert!(validate(&staff, &book).is_ok());
    }

    #[test]
    fn test_duplicate_employee_id() {
        let mut staff = sample_staff();
        staff.push(Employee {
            id: 1,
            ..Employee::cook("Copy", Branch::B)
        });

        let errors = validate(&staff, &ScheduleBook::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_quota_inverted() {
        let mut staff = sample_staff();
        staff.get_mut(1).unwrap().min_shifts_per_week = 5;
        staff.get_mut(1).unwrap().max_shifts_per_week = 3;

        let errors = validate(&staff, &ScheduleBook::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::QuotaInverted));
    }

    #[test]
    fn test_double_booking_within_branch() {
        let staff = sample_staff();
        let mut book = ScheduleBook::new();
        book.day_mut(date("2025-08-01")).working.a.extend([1, 1]);

        let errors = validate(&staff, &book).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DoubleBooking));
    }

    #[test]
    fn test_double_booking_across_branches() {
        let staff = sample_staff();
        let mut book = ScheduleBook::new();
        {
            let day = book.day_mut(date("2025-08-01"));
            day.working.a.push(1);
            day.working.b.push(1);
        }

        let errors = validate(&staff, &book).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DoubleBooking));
    }

    #[test]
    fn test_working_off_overlap() {
        let staff = sample_staff();
        let mut book = ScheduleBook::new();
        {
            let day = book.day_mut(date("2025-08-01"));
            day.working.b.push(2);
            day.holidays.push(2);
        }

        let errors = validate(&staff, &book).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::WorkingOffOverlap));
    }

    #[test]
    fn test_closed_day_occupied() {
        let staff = sample_staff();
        let mut book = ScheduleBook::new();
        {
            let day = book.day_mut(date("2025-08-01"));
            day.working.a.push(1);
            day.closed = true; // bypasses DaySchedule::close on purpose
        }

        let errors = validate(&staff, &book).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ClosedDayOccupied));
    }

    #[test]
    fn test_unknown_employee_after_delete() {
        let mut staff = sample_staff();
        let mut book = ScheduleBook::new();
        book.day_mut(date("2025-08-01")).working.a.push(1);

        staff.remove(1);
        let errors = validate(&staff, &book).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownEmployee));

        // The purge companion clears the dangling reference.
        book.purge_employee(1);
        assert!(validate(&staff, &book).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut staff = sample_staff();
        staff.get_mut(2).unwrap().min_shifts_per_week = 7;
        let mut book = ScheduleBook::new();
        book.day_mut(date("2025-08-01")).working.a.extend([9, 9]);

        let errors = validate(&staff, &book).unwrap_err();
        assert!(errors.len() >= 3); // inverted quota + double booking + unknown id
    }
}
