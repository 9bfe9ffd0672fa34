// Module exports for models

pub mod appointment;
pub mod category;
pub mod patient;
pub mod settings;
pub mod snapshot;
pub mod ui;
