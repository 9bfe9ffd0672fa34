//! Week grid construction.
//!
//! Seven day columns by a window of hour rows. Appointments are placed in the
//! row of the hour they start in; appointments sharing a `(day, start hour)`
//! cell are split into side-by-side lanes of equal width.
//!
//! Lanes are assigned per start-hour cell, not by interval overlap: two
//! appointments starting at 09:00 and 09:50 share a row and get half width
//! each, while 09:30-11:00 and 10:15-10:45 sit in different rows at full width
//! even though they overlap. Heights are proportional to duration and are not
//! clipped, so anything longer than an hour reaches past its row.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::appointment::Appointment;
use crate::models::ui::VisibleWeek;
use crate::services::bucket::chronological;

const LAST_HOUR: u32 = 23;

/// Which hour rows the week grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourWindow {
    /// `before` hours before the current hour through `after` hours after it.
    AroundNow { before: u32, after: u32 },
    /// A fixed inclusive range of hours.
    Fixed { start: u32, end: u32 },
}

impl Default for HourWindow {
    fn default() -> Self {
        Self::AroundNow { before: 3, after: 4 }
    }
}

impl HourWindow {
    pub fn validate(&self) -> CalendarResult<()> {
        match *self {
            Self::Fixed { start, end } if start > end || end > LAST_HOUR => {
                Err(CalendarError::InvalidHourWindow { start, end })
            }
            _ => Ok(()),
        }
    }

    /// First and last visible hour for `now`, clamped to 0..=23.
    pub fn resolve(&self, now: DateTime<Local>) -> (u32, u32) {
        match *self {
            Self::AroundNow { before, after } => {
                let hour = now.hour();
                (hour.saturating_sub(before), hour.saturating_add(after).min(LAST_HOUR))
            }
            Self::Fixed { start, end } => {
                let end = end.min(LAST_HOUR);
                (start.min(end), end)
            }
        }
    }
}

/// Position of one appointment inside its hour cell, in percent of the cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneLayout<'a> {
    pub appointment: &'a Appointment,
    pub lane: usize,
    pub lane_count: usize,
    pub top_percent: f64,
    /// May exceed 100 for appointments longer than an hour.
    pub height_percent: f64,
    pub left_percent: f64,
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSlot<'a> {
    pub day_index: usize,
    pub date: NaiveDate,
    pub hour: u32,
    pub is_current_hour: bool,
    pub lanes: Vec<LaneLayout<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow<'a> {
    pub hour: u32,
    /// "09:00"
    pub label: String,
    pub slots: Vec<WeekSlot<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// "Wednesday, January 15"
    pub label: String,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// The live "now" line drawn across the hour rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowIndicator {
    /// Distance from the top of the first visible row, in percent of all rows.
    pub offset_percent: f64,
    /// "14:05"
    pub label: String,
    /// Column of today, when today is in the visible week.
    pub column: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid<'a> {
    pub week_start: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
    pub days: Vec<DayColumn>,
    pub rows: Vec<WeekRow<'a>>,
    pub now_indicator: Option<NowIndicator>,
    /// Appointments of this week that start outside the visible hours.
    pub hidden: usize,
}

impl<'a> WeekGrid<'a> {
    pub fn hour_count(&self) -> usize {
        self.rows.len()
    }

    pub fn slot(&self, day_index: usize, hour: u32) -> Option<&WeekSlot<'a>> {
        self.rows
            .iter()
            .find(|row| row.hour == hour)
            .and_then(|row| row.slots.get(day_index))
    }

    /// Every placed appointment, row by row.
    pub fn placed(&self) -> impl Iterator<Item = &LaneLayout<'a>> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.slots.iter())
            .flat_map(|slot| slot.lanes.iter())
    }
}

/// Lay out one `(day, hour)` bucket: lane `i` of `k` gets `100 / k` percent of
/// the width starting at `i * 100 / k`. `bucket` must already be in
/// chronological order.
pub fn layout_hour_bucket<'a>(bucket: &[&'a Appointment]) -> Vec<LaneLayout<'a>> {
    let lane_count = bucket.len();
    if lane_count == 0 {
        return Vec::new();
    }
    let width = 100.0 / lane_count as f64;

    bucket
        .iter()
        .copied()
        .enumerate()
        .map(|(lane, appointment)| LaneLayout {
            appointment,
            lane,
            lane_count,
            top_percent: f64::from(appointment.start.minute()) / 60.0 * 100.0,
            height_percent: appointment.duration_minutes() / 60.0 * 100.0,
            left_percent: lane as f64 * width,
            width_percent: width,
        })
        .collect()
}

/// Builder for week grids. Every call is a full rebuild from its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekGridBuilder {
    window: HourWindow,
}

impl WeekGridBuilder {
    pub fn new(window: HourWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> HourWindow {
        self.window
    }

    pub fn build<'a, I>(&self, week: VisibleWeek, appointments: I, now: DateTime<Local>) -> WeekGrid<'a>
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let dates = week.days();
        let today = now.date_naive();
        let (start_hour, end_hour) = self.window.resolve(now);

        let mut buckets: BTreeMap<(NaiveDate, u32), Vec<&'a Appointment>> = BTreeMap::new();
        let mut hidden = 0;
        for appointment in appointments {
            let date = appointment.start_date();
            if !week.contains(date) {
                continue;
            }
            let hour = appointment.start_hour();
            if hour < start_hour || hour > end_hour {
                hidden += 1;
                continue;
            }
            buckets.entry((date, hour)).or_default().push(appointment);
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| chronological(a, b));
        }

        let days = dates
            .iter()
            .map(|date| {
                let weekday = date.weekday().num_days_from_sunday();
                DayColumn {
                    date: *date,
                    label: date.format("%A, %B %-d").to_string(),
                    is_today: *date == today,
                    is_weekend: weekday == 0 || weekday == 6,
                }
            })
            .collect();

        let rows = (start_hour..=end_hour)
            .map(|hour| WeekRow {
                hour,
                label: format!("{:02}:00", hour),
                slots: dates
                    .iter()
                    .enumerate()
                    .map(|(day_index, date)| WeekSlot {
                        day_index,
                        date: *date,
                        hour,
                        is_current_hour: *date == today && hour == now.hour(),
                        lanes: buckets
                            .get(&(*date, hour))
                            .map(|bucket| layout_hour_bucket(bucket))
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        let now_indicator = now_offset_percent(now, start_hour, end_hour).map(|offset_percent| NowIndicator {
            offset_percent,
            label: now.format("%H:%M").to_string(),
            column: dates.iter().position(|date| *date == today),
        });

        if hidden > 0 {
            log::debug!(
                "Week of {}: {} appointment(s) start outside {:02}:00-{:02}:59",
                week.start(),
                hidden,
                start_hour,
                end_hour
            );
        }

        WeekGrid {
            week_start: week.start(),
            start_hour,
            end_hour,
            days,
            rows,
            now_indicator,
            hidden,
        }
    }
}

/// Offset of `now` within the visible hours, in percent, or `None` when the
/// current hour is not shown.
pub fn now_offset_percent(now: DateTime<Local>, start_hour: u32, end_hour: u32) -> Option<f64> {
    let hour = now.hour();
    if hour < start_hour || hour > end_hour {
        return None;
    }
    let elapsed = f64::from((hour - start_hour) * 60 + now.minute());
    let span = f64::from((end_hour - start_hour + 1) * 60);
    Some(elapsed / span * 100.0)
}
