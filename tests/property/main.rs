// Property-based tests for the layout builders
// Random appointment sets are checked against the invariants each view relies on

#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use care_calendar::models::appointment::Appointment;
use care_calendar::models::category::CategoryId;
use care_calendar::models::patient::PatientId;
use care_calendar::models::ui::{VisibleMonth, VisibleWeek};
use care_calendar::services::bucket::{bucket_by_day, chronological};
use care_calendar::services::filter::{apply_filters, apply_predicates, FilterCriteria};
use care_calendar::services::list::{flatten, group_by_day};
use care_calendar::services::month_grid::MonthGridBuilder;
use care_calendar::services::week_grid::{layout_hour_bucket, HourWindow, WeekGridBuilder};

use fixtures::dates;

/// Up to 40 appointments in January 2025 with unique ids
fn appointment_set() -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec(
        (1..=31u32, 0..24u32, 0..60u32, 5..240i64, prop::option::of(1..4i64), prop::option::of(10..13i64)),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (day, hour, minute, length, category, patient))| {
                let mut appt = fixtures::appointments::visit(i as i64 + 1, dates::at(2025, 1, day, hour, minute), length);
                appt.category_id = category.map(CategoryId);
                appt.patient_id = patient.map(PatientId);
                appt
            })
            .collect()
    })
}

fn ids(appointments: &[&Appointment]) -> Vec<i64> {
    appointments.iter().map(|a| a.id.0).collect()
}

proptest! {
    /// Property: buckets partition the input, each keyed by its start date
    #[test]
    fn prop_buckets_partition_input(input in appointment_set()) {
        let buckets = bucket_by_day(&input);
        prop_assert_eq!(buckets.total(), input.len());

        let mut seen = BTreeSet::new();
        for (date, bucket) in buckets.iter() {
            for appt in bucket {
                prop_assert_eq!(appt.start_date(), date);
                prop_assert!(seen.insert(appt.id));
            }
            prop_assert!(bucket.windows(2).all(|w| chronological(w[0], w[1]).is_le()));
        }
        prop_assert_eq!(seen.len(), input.len());
    }

    /// Property: the month grid is whole weeks with blanks only around the month
    #[test]
    fn prop_month_grid_shape(
        year in 1990..2060i32,
        month in 1..=12u32,
        first_day_of_week in 0..7u8,
    ) {
        let visible = VisibleMonth::new(year, month).unwrap();
        let grid = MonthGridBuilder::new()
            .first_day_of_week(first_day_of_week)
            .build(visible, std::iter::empty::<&Appointment>(), dates::mid_january_morning());

        prop_assert_eq!(grid.cells.len() % 7, 0);
        prop_assert_eq!(grid.cells.len(), grid.row_count() * 7);
        let offset = grid.leading_blanks();
        prop_assert!(offset < 7);
        prop_assert_eq!(
            (visible.first_day().weekday().num_days_from_sunday() as usize + 7 - first_day_of_week as usize) % 7,
            offset
        );
        let days: Vec<u32> = grid.cells.iter().filter_map(|c| c.day).collect();
        prop_assert_eq!(days, (1..=visible.days_in_month()).collect::<Vec<_>>());
        prop_assert!(grid.cells[..offset].iter().all(|c| c.is_blank()));
    }

    /// Property: lanes in one hour bucket fill exactly the full width
    #[test]
    fn prop_lane_widths_sum_to_100(input in appointment_set()) {
        let mut by_hour: std::collections::BTreeMap<(NaiveDate, u32), Vec<&Appointment>> = Default::default();
        for appt in &input {
            by_hour.entry((appt.start_date(), appt.start_hour())).or_default().push(appt);
        }
        for bucket in by_hour.values_mut() {
            bucket.sort_by(|a, b| chronological(a, b));
            let lanes = layout_hour_bucket(bucket);
            let total: f64 = lanes.iter().map(|l| l.width_percent).sum();
            prop_assert!((total - 100.0).abs() < 1e-9);
            for (i, lane) in lanes.iter().enumerate() {
                prop_assert_eq!(lane.lane, i);
                prop_assert!((lane.left_percent - i as f64 * 100.0 / lanes.len() as f64).abs() < 1e-9);
                prop_assert!(lane.left_percent + lane.width_percent <= 100.0 + 1e-9);
            }
        }
    }

    /// Property: the week builder places or hides every appointment of its week,
    /// fills each hour slot's width exactly and sizes lanes by duration
    #[test]
    fn prop_week_grid_accounts_for_every_appointment(
        input in appointment_set(),
        day in 1..=31u32,
        first_day_of_week in 0..7u8,
        window in prop::option::of((0..24u32, 0..24u32)),
    ) {
        let week = VisibleWeek::containing(NaiveDate::from_ymd_opt(2025, 1, day).unwrap(), first_day_of_week);
        let window = match window {
            Some((a, b)) => HourWindow::Fixed { start: a.min(b), end: a.max(b) },
            None => HourWindow::Fixed { start: 0, end: 23 },
        };
        let grid = WeekGridBuilder::new(window).build(week, &input, dates::mid_january_morning());

        let in_week = input.iter().filter(|a| week.contains(a.start_date())).count();
        prop_assert_eq!(grid.placed().count() + grid.hidden, in_week);
        if window == (HourWindow::Fixed { start: 0, end: 23 }) {
            prop_assert_eq!(grid.hidden, 0);
        }

        for slot in grid.rows.iter().flat_map(|row| row.slots.iter()) {
            if slot.lanes.is_empty() {
                continue;
            }
            let total: f64 = slot.lanes.iter().map(|l| l.width_percent).sum();
            prop_assert!((total - 100.0).abs() < 1e-9);
            for lane in &slot.lanes {
                prop_assert_eq!(lane.appointment.start_date(), slot.date);
                prop_assert_eq!(lane.appointment.start_hour(), slot.hour);
                prop_assert!((lane.height_percent - lane.appointment.duration_minutes() / 60.0 * 100.0).abs() < 1e-9);
            }
        }
    }

    /// Property: unset criteria keep every appointment in order
    #[test]
    fn prop_empty_filter_is_identity(input in appointment_set()) {
        let filtered = apply_filters(&input, &FilterCriteria::default());
        prop_assert_eq!(ids(&filtered), input.iter().map(|a| a.id.0).collect::<Vec<_>>());
    }

    /// Property: predicate order does not change the selection
    #[test]
    fn prop_filter_order_independent(
        input in appointment_set(),
        category in prop::option::of(1..4i64),
        patient in prop::option::of(10..13i64),
        from_day in prop::option::of(1..=31u32),
        to_day in prop::option::of(1..=31u32),
    ) {
        let mut criteria = FilterCriteria::default().with_range(
            from_day.and_then(|d| NaiveDate::from_ymd_opt(2025, 1, d)),
            to_day.and_then(|d| NaiveDate::from_ymd_opt(2025, 1, d)),
        );
        criteria.category = category.map(CategoryId);
        criteria.patient = patient.map(PatientId);

        let forward = criteria.predicates();
        let mut backward = forward.clone();
        backward.reverse();

        let all_at_once = apply_filters(&input, &criteria);
        prop_assert_eq!(ids(&apply_predicates(&input, &forward)), ids(&all_at_once));
        prop_assert_eq!(ids(&apply_predicates(&input, &backward)), ids(&all_at_once));

        let staged = forward
            .iter()
            .fold(input.iter().collect::<Vec<_>>(), |acc, p| apply_predicates(acc, std::slice::from_ref(p)));
        prop_assert_eq!(ids(&staged), ids(&all_at_once));
    }

    /// Property: the list view is the input sorted by (day, start, id), and regrouping changes nothing
    #[test]
    fn prop_list_groups_sorted_and_idempotent(input in appointment_set()) {
        let groups = group_by_day(&input);
        let flat = flatten(&groups);

        let mut expected: Vec<&Appointment> = input.iter().collect();
        expected.sort_by(|a, b| a.start_date().cmp(&b.start_date()).then_with(|| chronological(a, b)));
        prop_assert_eq!(ids(&flat), ids(&expected));

        prop_assert!(groups.windows(2).all(|w| w[0].date < w[1].date));
        prop_assert_eq!(group_by_day(flat), groups);
    }
}
