//! Calendar-week indexing within a month.
//!
//! The fairness bookkeeping needs to know which "week of the month" a
//! date falls in: weeks run Sunday through Saturday, only weeks that
//! contain at least one day of the target month are counted, and the
//! count restarts at 1 every month. A week straddling a month boundary
//! belongs to both months, with its index taken within each.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Maps every date of a month to its 1-based Sunday-start week index.
///
/// An invalid year/month combination yields an empty map.
///
/// # Example
/// August 2025 starts on a Friday:
/// - week 1: 08-01 (Fri) .. 08-02 (Sat)
/// - week 2: 08-03 (Sun) .. 08-09 (Sat)
/// - ...
/// - week 6: 08-31 (Sun), a single-day week inside the month
pub fn month_week_index(year: i32, month: u32) -> BTreeMap<NaiveDate, u32> {
    let mut index = BTreeMap::new();
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return index;
    };
    let last = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1),
    }
    .and_then(|d| d.pred_opt())
    .unwrap_or(first);

    // Back up to the Sunday opening the week that contains the 1st.
    let mut week_start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let mut week = 0;

    while week_start <= last {
        let in_month: Vec<NaiveDate> = (0..7)
            .map(|offset| week_start + Duration::days(offset))
            .filter(|d| d.year() == year && d.month() == month)
            .collect();

        if !in_month.is_empty() {
            week += 1;
            for day in in_month {
                index.insert(day, week);
            }
        }
        week_start = week_start + Duration::days(7);
    }

    index
}
