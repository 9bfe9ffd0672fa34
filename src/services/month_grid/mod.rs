//! Month grid construction.
//!
//! Produces a row-major, seven column grid for one month: leading blanks up to
//! the weekday of the 1st, one cell per day, trailing blanks to close the last
//! row. Each day cell lists its first few appointments and counts the rest.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

use crate::models::appointment::Appointment;
use crate::models::ui::VisibleMonth;
use crate::services::bucket::bucket_by_day;
use crate::utils::date::{first_weekday_offset, weekday_labels};

pub const DEFAULT_CELL_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell<'a> {
    /// Day of month, `None` for padding cells.
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    /// First appointments of the day, chronologically, at most the cell capacity.
    pub appointments: Vec<&'a Appointment>,
    /// Appointments that did not fit.
    pub overflow: usize,
    pub is_today: bool,
    pub is_weekend: bool,
}

impl MonthCell<'_> {
    fn blank() -> Self {
        Self {
            day: None,
            date: None,
            appointments: Vec::new(),
            overflow: 0,
            is_today: false,
            is_weekend: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }

    /// Total appointments on this day, shown and hidden.
    pub fn total(&self) -> usize {
        self.appointments.len() + self.overflow
    }

    /// "+N more" label when some appointments are hidden.
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    /// Short weekday names for the seven columns.
    pub weekday_labels: [&'static str; 7],
    /// ISO week number of each row, when requested.
    pub week_numbers: Option<Vec<u32>>,
    pub cells: Vec<MonthCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn row_count(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, MonthCell<'a>> {
        self.cells.chunks_exact(7)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_blank()).count()
    }

    /// Cell for a day of the visible month.
    pub fn cell_for_day(&self, day: u32) -> Option<&MonthCell<'a>> {
        self.cells.iter().find(|cell| cell.day == Some(day))
    }
}

/// Builder for month grids. Pure: the same inputs always give the same grid.
#[derive(Debug, Clone, Copy)]
pub struct MonthGridBuilder {
    first_day_of_week: u8,
    cell_capacity: usize,
    show_week_numbers: bool,
}

impl Default for MonthGridBuilder {
    fn default() -> Self {
        Self {
            first_day_of_week: 0,
            cell_capacity: DEFAULT_CELL_CAPACITY,
            show_week_numbers: false,
        }
    }
}

impl MonthGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 = Sunday, 1 = Monday, ...
    pub fn first_day_of_week(mut self, first_day_of_week: u8) -> Self {
        self.first_day_of_week = first_day_of_week % 7;
        self
    }

    pub fn cell_capacity(mut self, capacity: usize) -> Self {
        self.cell_capacity = capacity;
        self
    }

    pub fn show_week_numbers(mut self, show: bool) -> Self {
        self.show_week_numbers = show;
        self
    }

    pub fn build<'a, I>(&self, month: VisibleMonth, appointments: I, today: DateTime<Local>) -> MonthGrid<'a>
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let offset = first_weekday_offset(month.year(), month.month(), self.first_day_of_week).unwrap_or(0) as usize;
        let days_in_month = month.days_in_month();
        let row_count = (offset + days_in_month as usize).div_ceil(7);
        let today = today.date_naive();

        let buckets = bucket_by_day(
            appointments
                .into_iter()
                .filter(|appt| month.contains(appt.start_date())),
        );

        let mut cells = Vec::with_capacity(row_count * 7);
        cells.extend((0..offset).map(|_| MonthCell::blank()));

        let first_day = month.first_day();
        for day in 1..=days_in_month {
            let date = first_day + Duration::days(i64::from(day) - 1);
            let day_appointments = buckets.get(date);
            let shown = day_appointments.len().min(self.cell_capacity);
            let weekday = date.weekday().num_days_from_sunday();

            cells.push(MonthCell {
                day: Some(day),
                date: Some(date),
                appointments: day_appointments[..shown].to_vec(),
                overflow: day_appointments.len() - shown,
                is_today: date == today,
                is_weekend: weekday == 0 || weekday == 6,
            });
        }

        cells.resize_with(row_count * 7, MonthCell::blank);

        let week_numbers = self.show_week_numbers.then(|| {
            (0..row_count)
                .map(|row| {
                    let row_start = first_day + Duration::days((row * 7) as i64 - offset as i64);
                    row_start.iso_week().week()
                })
                .collect()
        });

        log::debug!(
            "Built month grid {}-{:02}: {} rows, {} appointment(s)",
            month.year(),
            month.month(),
            row_count,
            buckets.total()
        );

        MonthGrid {
            year: month.year(),
            month: month.month(),
            weekday_labels: weekday_labels(self.first_day_of_week),
            week_numbers,
            cells,
        }
    }
}
