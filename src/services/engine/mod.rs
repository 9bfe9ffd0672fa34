//! Entry point for rendering: holds the current snapshot and settings and
//! dispatches a view request to the matching builder.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::CalendarResult;
use crate::models::appointment::{Appointment, AppointmentId};
use crate::models::settings::CalendarSettings;
use crate::models::snapshot::Snapshot;
use crate::models::ui::{Selection, ViewType, VisibleMonth, VisibleWeek};
use crate::services::filter::{apply_filters, FilterCriteria};
use crate::services::list::{group_by_day, DayGroup};
use crate::services::month_grid::{MonthGrid, MonthGridBuilder};
use crate::services::week_grid::{WeekGrid, WeekGridBuilder};

/// Everything one layout pass needs besides the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRequest {
    pub view: ViewType,
    /// Month to show; the month containing `now` when unset.
    pub month: Option<VisibleMonth>,
    /// Week to show; the week containing `now` when unset.
    pub week: Option<VisibleWeek>,
    pub criteria: FilterCriteria,
    pub now: DateTime<Local>,
}

impl ViewRequest {
    pub fn new(view: ViewType, now: DateTime<Local>) -> Self {
        Self {
            view,
            month: None,
            week: None,
            criteria: FilterCriteria::default(),
            now,
        }
    }

    pub fn with_month(mut self, month: VisibleMonth) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_week(mut self, week: VisibleWeek) -> Self {
        self.week = Some(week);
        self
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Same request at a later instant.
    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "layout", rename_all = "lowercase")]
pub enum ViewOutput<'a> {
    Month(MonthGrid<'a>),
    Week(WeekGrid<'a>),
    List(Vec<DayGroup<'a>>),
}

impl ViewOutput<'_> {
    pub fn view_type(&self) -> ViewType {
        match self {
            Self::Month(_) => ViewType::Month,
            Self::Week(_) => ViewType::Week,
            Self::List(_) => ViewType::List,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarEngine {
    settings: CalendarSettings,
    snapshot: Snapshot,
    selection: Selection,
}

impl CalendarEngine {
    pub fn new(settings: CalendarSettings) -> CalendarResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            snapshot: Snapshot::empty(),
            selection: Selection::default(),
        })
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Swap in a freshly fetched snapshot. The old one is dropped whole.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        log::info!(
            "Replacing snapshot: {} -> {} appointment(s)",
            self.snapshot.len(),
            snapshot.len()
        );
        self.snapshot = snapshot;
        self.selection.retain_in(&self.snapshot);
    }

    pub fn select(&mut self, id: AppointmentId) -> Option<&Appointment> {
        self.selection = Selection::select(id);
        self.selection.retain_in(&self.snapshot);
        self.selected()
    }

    pub fn selected(&self) -> Option<&Appointment> {
        self.selection.resolve(&self.snapshot)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Request for the configured default view at `now`.
    pub fn default_request(&self, now: DateTime<Local>) -> ViewRequest {
        ViewRequest::new(self.settings.default_view, now)
    }

    /// Filter the snapshot, then lay it out for the requested view.
    pub fn render(&self, request: &ViewRequest) -> ViewOutput<'_> {
        let visible = apply_filters(&self.snapshot, &request.criteria);

        match request.view {
            ViewType::Month => ViewOutput::Month(self.month_grid(request, visible)),
            ViewType::Week => ViewOutput::Week(self.week_grid(request, visible)),
            ViewType::List => ViewOutput::List(group_by_day(visible)),
        }
    }

    fn month_grid<'a>(&self, request: &ViewRequest, visible: Vec<&'a Appointment>) -> MonthGrid<'a> {
        let month = request
            .month
            .unwrap_or_else(|| VisibleMonth::current(request.now));
        MonthGridBuilder::new()
            .first_day_of_week(self.settings.first_day_of_week)
            .cell_capacity(self.settings.month_cell_capacity)
            .show_week_numbers(self.settings.show_week_numbers)
            .build(month, visible, request.now)
    }

    fn week_grid<'a>(&self, request: &ViewRequest, visible: Vec<&'a Appointment>) -> WeekGrid<'a> {
        let week = request.week.unwrap_or_else(|| {
            VisibleWeek::containing(request.now.date_naive(), self.settings.first_day_of_week)
        });
        let grid = WeekGridBuilder::new(self.settings.hour_window()).build(week, visible, request.now);
        log::debug!(
            "Week grid from {}: hours {}-{}, {} placed",
            grid.week_start,
            grid.start_hour,
            grid.end_hour,
            grid.placed().count()
        );
        grid
    }
}
