// Date utility functions
// Calendar arithmetic shared by the grid builders

use chrono::{Datelike, Duration, NaiveDate, Weekday};

const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekday for a first-day-of-week setting (0 = Sunday, 1 = Monday, ...).
pub fn weekday_from_index(first_day_of_week: u8) -> Weekday {
    match first_day_of_week % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    date - Duration::days(weekday_offset(date, first_day_of_week) as i64)
}

/// Column of `date` in a week that begins on `first_day_of_week`.
pub fn weekday_offset(date: NaiveDate, first_day_of_week: u8) -> u32 {
    let weekday = date.weekday().num_days_from_sunday();
    (weekday + 7 - u32::from(first_day_of_week % 7)) % 7
}

/// Number of days in a month of the proleptic Gregorian calendar.
/// Returns `None` for a month outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    if month == 12 {
        return Some(31);
    }
    let (next_year, next_month) = shift_month(year, month, 1);
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Number of blank cells before the 1st of the month in a grid whose first
/// column is `first_day_of_week`.
pub fn first_weekday_offset(year: i32, month: u32, first_day_of_week: u8) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| weekday_offset(first, first_day_of_week))
}

/// Move `delta` months from (year, month), rolling over year boundaries.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Short weekday names rotated so the first entry is `first_day_of_week`.
pub fn weekday_labels(first_day_of_week: u8) -> [&'static str; 7] {
    let start = (first_day_of_week % 7) as usize;
    std::array::from_fn(|i| SHORT_DAY_NAMES[(start + i) % 7])
}
