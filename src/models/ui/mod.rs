// UI models module
// View selection and navigation state handed to the builders

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::appointment::{Appointment, AppointmentId};
use crate::utils::date::{self, weekday_from_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Month,
    Week,
    List,
}

impl std::str::FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "list" => Ok(Self::List),
            other => Err(format!("Unknown view '{}' (expected month, week or list)", other)),
        }
    }
}

impl std::fmt::Display for ViewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Week => write!(f, "week"),
            Self::List => write!(f, "list"),
        }
    }
}

/// The month shown by the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleMonth {
    year: i32,
    month: u32,
}

impl VisibleMonth {
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        if date::days_in_month(year, month).is_none() {
            return Err(CalendarError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month containing the local date of `now`.
    pub fn current(now: DateTime<Local>) -> Self {
        Self::containing(now.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Following month. Fails past the last month chrono can represent.
    pub fn next(&self) -> CalendarResult<Self> {
        self.shifted(1)
    }

    pub fn previous(&self) -> CalendarResult<Self> {
        self.shifted(-1)
    }

    fn shifted(&self, delta: i32) -> CalendarResult<Self> {
        let (year, month) = date::shift_month(self.year, self.month, delta);
        Self::new(year, month)
    }

    pub fn first_day(&self) -> NaiveDate {
        // `new` admits only months whose 1st exists, and `containing` starts from a real date.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        date::days_in_month(self.year, self.month).unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// The week shown by the week grid: seven days from a normalized start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleWeek {
    start: NaiveDate,
    first_day_of_week: u8,
}

impl VisibleWeek {
    /// Accept `start` only if it falls on `first_day_of_week`.
    pub fn new(start: NaiveDate, first_day_of_week: u8) -> CalendarResult<Self> {
        if first_day_of_week > 6 {
            return Err(CalendarError::InvalidFirstDayOfWeek(first_day_of_week));
        }
        if date::weekday_offset(start, first_day_of_week) != 0 {
            return Err(CalendarError::UnalignedWeekStart {
                date: start,
                expected: weekday_from_index(first_day_of_week),
                first_day_of_week,
            });
        }
        Ok(Self {
            start,
            first_day_of_week,
        })
    }

    /// Week containing `date`, normalized to `first_day_of_week`.
    pub fn containing(date: NaiveDate, first_day_of_week: u8) -> Self {
        let first_day_of_week = first_day_of_week % 7;
        Self {
            start: date::week_start(date, first_day_of_week),
            first_day_of_week,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day after the week (exclusive bound).
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(7)
    }

    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.start + Duration::days(i as i64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end()
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Duration::days(7),
            ..*self
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Duration::days(7),
            ..*self
        }
    }
}

/// The appointment currently opened in a detail view, tracked by id.
///
/// Looking it up again after every re-filter or re-sort keeps the selection
/// pointing at the same record, and it reads as empty once the record is gone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    appointment_id: Option<AppointmentId>,
}

impl Selection {
    pub fn select(id: AppointmentId) -> Self {
        Self {
            appointment_id: Some(id),
        }
    }

    pub fn clear(&mut self) {
        self.appointment_id = None;
    }

    pub fn id(&self) -> Option<AppointmentId> {
        self.appointment_id
    }

    /// Resolve the selection against the appointments currently on screen.
    pub fn resolve<'a, I>(&self, appointments: I) -> Option<&'a Appointment>
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let id = self.appointment_id?;
        appointments.into_iter().find(|appt| appt.id == id)
    }

    /// Drop the selection if its appointment is no longer present.
    pub fn retain_in<'a, I>(&mut self, appointments: I)
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        if self.appointment_id.is_some() && self.resolve(appointments).is_none() {
            self.clear();
        }
    }
}
