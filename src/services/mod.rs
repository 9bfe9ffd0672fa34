// Service module exports
// Layout builders and the engine that dispatches to them

pub mod bucket;
pub mod engine;
pub mod filter;
pub mod join;
pub mod list;
pub mod month_grid;
pub mod settings;
pub mod time_cursor;
pub mod week_grid;
