//! Error types for the calendar core.

use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;

use crate::models::appointment::AppointmentId;

/// Which weak reference on an appointment failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Patient,
    Category,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Category => write!(f, "category"),
        }
    }
}

/// Errors raised by the calendar core.
///
/// Builders never return these: they are produced by record validation and by
/// the constructors of view parameters (`VisibleMonth`, `VisibleWeek`,
/// `HourWindow`), so a built grid is always well formed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Appointment {appointment} references unknown {kind} {target}")]
    MissingReference {
        appointment: AppointmentId,
        kind: ReferenceKind,
        target: i64,
    },

    #[error("Appointment end time {end} must be after start time {start}")]
    InvalidRange {
        start: DateTime<Local>,
        end: DateTime<Local>,
    },

    #[error("Appointment title cannot be empty")]
    EmptyTitle,

    #[error("Appointment {field} is required")]
    MissingField { field: &'static str },

    #[error("Duplicate appointment id {0} in snapshot")]
    DuplicateAppointment(AppointmentId),

    #[error("Invalid month {month} (expected 1-12)")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Week start {date} is not a {expected} (first day of week {first_day_of_week})")]
    UnalignedWeekStart {
        date: NaiveDate,
        expected: chrono::Weekday,
        first_day_of_week: u8,
    },

    #[error("Invalid hour window {start}..={end} (hours must be 0-23, start <= end)")]
    InvalidHourWindow { start: u32, end: u32 },

    #[error("Invalid first day of week {0} (expected 0-6, 0 = Sunday)")]
    InvalidFirstDayOfWeek(u8),

    #[error("Time cursor can only start inside a tokio runtime")]
    NoRuntime,
}

/// Result alias for calendar core operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
