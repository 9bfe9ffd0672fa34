//! Day bucketing.
//!
//! Groups appointments under the local calendar date they start on. Every other
//! view builder reads appointments through these buckets.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::appointment::Appointment;

/// Chronological order used everywhere: start ascending, ties by id.
pub fn chronological(a: &Appointment, b: &Appointment) -> Ordering {
    a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id))
}

/// Appointments keyed by local start date, each day sorted chronologically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DayBuckets<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Appointment>>,
}

impl<'a> DayBuckets<'a> {
    /// Appointments starting on `date`, or an empty slice.
    pub fn get(&self, date: NaiveDate) -> &[&'a Appointment] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that have at least one appointment, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Number of non-empty days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of appointments across all days.
    pub fn total(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[&'a Appointment])> + '_ {
        self.days.iter().map(|(date, appts)| (*date, appts.as_slice()))
    }

    /// Consume the buckets into (date, appointments) pairs in date order.
    pub fn into_days(self) -> impl Iterator<Item = (NaiveDate, Vec<&'a Appointment>)> {
        self.days.into_iter()
    }

    /// Every appointment, ordered by day and then chronologically.
    pub fn into_flat(self) -> Vec<&'a Appointment> {
        self.days.into_values().flatten().collect()
    }
}

/// Group `appointments` (any order) by the local date of their start.
pub fn bucket_by_day<'a, I>(appointments: I) -> DayBuckets<'a>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut days: BTreeMap<NaiveDate, Vec<&'a Appointment>> = BTreeMap::new();
    for appointment in appointments {
        days.entry(appointment.start_date()).or_default().push(appointment);
    }
    for bucket in days.values_mut() {
        bucket.sort_by(|a, b| chronological(a, b));
    }
    DayBuckets { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn appt(id: i64, day: u32, hour: u32, minute: u32) -> Appointment {
        let start = Local.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap();
        Appointment::new(id, format!("Visit {}", id), start, start + Duration::minutes(30)).unwrap()
    }

    fn ids(appts: &[&Appointment]) -> Vec<i64> {
        appts.iter().map(|a| a.id.0).collect()
    }

    #[test]
    fn test_buckets_sorted_within_day() {
        let input = vec![appt(1, 15, 14, 0), appt(2, 15, 9, 0), appt(3, 16, 8, 0), appt(4, 15, 9, 30)];
        let buckets = bucket_by_day(&input);

        let jan15 = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let jan16 = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        assert_eq!(ids(buckets.get(jan15)), vec![2, 4, 1]);
        assert_eq!(ids(buckets.get(jan16)), vec![3]);
        assert_eq!(buckets.days().collect::<Vec<_>>(), vec![jan15, jan16]);
        assert_eq!(buckets.total(), 4);
    }

    #[test]
    fn test_equal_starts_break_ties_by_id() {
        let input = vec![appt(9, 15, 10, 0), appt(2, 15, 10, 0), appt(5, 15, 10, 0)];
        let buckets = bucket_by_day(&input);
        let jan15 = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(ids(buckets.get(jan15)), vec![2, 5, 9]);
    }

    #[test]
    fn test_empty_input() {
        let input: Vec<Appointment> = Vec::new();
        let buckets = bucket_by_day(&input);
        assert!(buckets.is_empty());
        assert_eq!(buckets.total(), 0);
        assert!(buckets.get(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).is_empty());
    }

    #[test]
    fn test_missing_day_returns_empty_slice() {
        let input = vec![appt(1, 15, 9, 0)];
        let buckets = bucket_by_day(&input);
        assert!(buckets.get(NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()).is_empty());
    }

    #[test]
    fn test_into_flat_orders_by_day_then_start() {
        let input = vec![appt(1, 16, 8, 0), appt(2, 15, 17, 0), appt(3, 15, 7, 0)];
        let flat = bucket_by_day(&input).into_flat();
        assert_eq!(ids(&flat), vec![3, 2, 1]);
    }
}
