//! Calendar arithmetic for month-aligned billing.
//!
//! All dates are pure `NaiveDate` values built from `(year, month, day)`
//! components. No local-time parsing happens anywhere in this crate, so a
//! stay can never gain or lose a day to a timezone offset.

use chrono::{Datelike, NaiveDate};

/// Full Indonesian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Returns the Indonesian name of a 1-based month.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

/// Returns the last calendar day of the month containing `date`.
#[must_use]
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_of_next_month(date)
        .pred_opt()
        .expect("day before the first of a month is always representable")
}

/// Returns the first day of the month following the month containing `date`.
#[must_use]
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}

/// Inclusive day count between two dates, `start <= end`.
#[must_use]
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Number of days in the month containing `date`.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> i64 {
    i64::from(last_day_of_month(date).day())
}
