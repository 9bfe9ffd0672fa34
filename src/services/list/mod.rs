//! Chronological list view: appointments grouped under day headings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::appointment::Appointment;
use crate::services::bucket::bucket_by_day;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    /// "Wednesday, January 15, 2025"
    pub heading: String,
    pub appointments: Vec<&'a Appointment>,
}

/// Group appointments by start date, days ascending, each day chronological.
pub fn group_by_day<'a, I>(appointments: I) -> Vec<DayGroup<'a>>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    bucket_by_day(appointments)
        .into_days()
        .map(|(date, appointments)| DayGroup {
            date,
            heading: date.format("%A, %B %-d, %Y").to_string(),
            appointments,
        })
        .collect()
}

/// Concatenate groups back into one chronological sequence.
pub fn flatten<'a>(groups: &[DayGroup<'a>]) -> Vec<&'a Appointment> {
    groups
        .iter()
        .flat_map(|group| group.appointments.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn appt(id: i64, month: u32, day: u32, hour: u32) -> Appointment {
        let start = Local.with_ymd_and_hms(2025, month, day, hour, 0, 0).unwrap();
        Appointment::new(id, "Visit", start, start + Duration::minutes(45)).unwrap()
    }

    #[test]
    fn test_groups_days_ascending() {
        let input = vec![appt(1, 2, 3, 15), appt(2, 1, 30, 9), appt(3, 2, 3, 8), appt(4, 1, 30, 7)];
        let groups = group_by_day(&input);

        let dates: Vec<String> = groups.iter().map(|g| g.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-30", "2025-02-03"]);
        let first: Vec<i64> = groups[0].appointments.iter().map(|a| a.id.0).collect();
        let second: Vec<i64> = groups[1].appointments.iter().map(|a| a.id.0).collect();
        assert_eq!(first, vec![4, 2]);
        assert_eq!(second, vec![3, 1]);
    }

    #[test]
    fn test_heading() {
        let input = vec![appt(1, 1, 15, 9)];
        let groups = group_by_day(&input);
        assert_eq!(groups[0].heading, "Wednesday, January 15, 2025");
    }

    #[test]
    fn test_regrouping_is_a_no_op() {
        let input = vec![appt(1, 2, 3, 15), appt(2, 1, 30, 9), appt(3, 2, 3, 8)];
        let groups = group_by_day(&input);
        let regrouped = group_by_day(flatten(&groups));
        assert_eq!(groups, regrouped);
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        let input: Vec<Appointment> = Vec::new();
        assert!(group_by_day(&input).is_empty());
    }
}
