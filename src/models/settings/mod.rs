// Settings module
// View configuration loaded from settings.toml

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::ui::ViewType;
use crate::services::month_grid::DEFAULT_CELL_CAPACITY;
use crate::services::time_cursor::DEFAULT_TICK_INTERVAL;
use crate::services::week_grid::HourWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u8,
    /// Appointments listed per month cell before "+N more".
    pub month_cell_capacity: usize,
    pub hours_before_now: u32,
    pub hours_after_now: u32,
    /// Fixed `[start, end]` hour rows for the week grid instead of following now.
    pub fixed_hour_window: Option<[u32; 2]>,
    pub tick_interval_secs: u64,
    pub default_view: ViewType,
    pub show_week_numbers: bool,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            month_cell_capacity: DEFAULT_CELL_CAPACITY,
            hours_before_now: 3,
            hours_after_now: 4,
            fixed_hour_window: None,
            tick_interval_secs: DEFAULT_TICK_INTERVAL.as_secs(),
            default_view: ViewType::Month,
            show_week_numbers: false,
        }
    }
}

impl CalendarSettings {
    pub fn validate(&self) -> CalendarResult<()> {
        if self.first_day_of_week > 6 {
            return Err(CalendarError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }
        self.hour_window().validate()
    }

    /// Hour-window policy for the week grid.
    pub fn hour_window(&self) -> HourWindow {
        match self.fixed_hour_window {
            Some([start, end]) => HourWindow::Fixed { start, end },
            None => HourWindow::AroundNow {
                before: self.hours_before_now,
                after: self.hours_after_now,
            },
        }
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tick_interval_secs.max(1))
    }
}
