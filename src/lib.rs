// Care Calendar Library
// Layout core for the care appointment calendar

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{CalendarError, CalendarResult};
pub use models::appointment::{Appointment, AppointmentId};
pub use models::snapshot::Snapshot;
pub use services::engine::{CalendarEngine, ViewOutput, ViewRequest};
