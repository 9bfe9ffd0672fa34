// Test fixtures - reusable test data
// Provides consistent appointments, patients and clocks across all test files
#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone};

use care_calendar::models::appointment::Appointment;
use care_calendar::models::category::Category;
use care_calendar::models::patient::Patient;
use care_calendar::services::time_cursor::FixedClock;

/// Sample instants for testing
pub mod dates {
    use super::*;

    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
    }

    /// Wednesday, Jan 15, 2025 at 10:30
    pub fn mid_january_morning() -> DateTime<Local> {
        at(2025, 1, 15, 10, 30)
    }

    /// Friday, Feb 28, 2025 at 14:00 (last day of a non-leap February)
    pub fn end_of_february() -> DateTime<Local> {
        at(2025, 2, 28, 14, 0)
    }

    /// Thursday, Feb 29, 2024 at 12:00 (leap year)
    pub fn leap_day_2024() -> DateTime<Local> {
        at(2024, 2, 29, 12, 0)
    }
}

/// Sample appointments for testing
pub mod appointments {
    use super::*;

    pub fn visit(id: i64, start: DateTime<Local>, minutes: i64) -> Appointment {
        Appointment::builder()
            .id(id)
            .title(format!("Visit {}", id))
            .start(start)
            .end(start + Duration::minutes(minutes))
            .build()
            .unwrap()
    }

    /// Three visits on Jan 15, 2025: two in the 09:00 hour, one at 14:00
    pub fn busy_wednesday() -> Vec<Appointment> {
        vec![
            visit(1, dates::at(2025, 1, 15, 9, 0), 30),
            visit(2, dates::at(2025, 1, 15, 9, 15), 30),
            visit(3, dates::at(2025, 1, 15, 14, 0), 60),
        ]
    }

    /// Visits alternating between Greta and Hans across January 2025.
    /// Every third visit is wound care, the rest medication.
    pub fn january_round() -> Vec<Appointment> {
        [2u32, 6, 9, 15, 15, 22, 31]
            .into_iter()
            .enumerate()
            .map(|(i, day)| {
                let id = i as i64 + 1;
                let start = dates::at(2025, 1, day, 8 + (i as u32 % 4), 0);
                let patient = if i % 2 == 0 { patients::greta() } else { patients::hans() };
                let category = if i % 3 == 0 {
                    categories::wound_care()
                } else {
                    categories::medication()
                };
                Appointment::builder()
                    .id(id)
                    .title(format!("Round {}", id))
                    .start(start)
                    .end(start + Duration::minutes(45))
                    .patient(patient.id.0)
                    .category(category.id.0)
                    .build()
                    .unwrap()
            })
            .collect()
    }
}

pub mod patients {
    use super::*;

    pub fn greta() -> Patient {
        Patient::new(10, "Greta", "Lindner")
    }

    pub fn hans() -> Patient {
        Patient::new(11, "Hans", "Becker")
    }

    pub fn all() -> Vec<Patient> {
        vec![greta(), hans()]
    }
}

pub mod categories {
    use super::*;

    pub fn wound_care() -> Category {
        Category::new(1, "Wound care")
    }

    pub fn medication() -> Category {
        Category::new(2, "Medication")
    }

    pub fn all() -> Vec<Category> {
        vec![wound_care(), medication()]
    }
}

/// Clock stopped at `now`
pub fn clock_at(now: DateTime<Local>) -> FixedClock {
    FixedClock(now)
}
