// Appointment module
// Care appointment model with weak patient/category references

use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::category::{Category, CategoryId};
use crate::models::patient::{Patient, PatientId};

/// Identifier of an appointment in the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub i64);

impl std::fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled care appointment.
///
/// `patient_id` and `category_id` are weak references. The resolved records
/// are optional denormalized copies attached by
/// [`attach_references`](crate::services::join::attach_references); the
/// calendar never owns them and renders blank when they are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// File identifiers, in upload order. Duplicates are kept.
    #[serde(default, alias = "attachements")]
    pub attachments: Vec<String>,
    #[serde(default, rename = "patient")]
    pub patient_id: Option<PatientId>,
    #[serde(default, rename = "category")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_patient: Option<Patient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_category: Option<Category>,
}

impl Appointment {
    /// Create a new appointment with required fields
    ///
    /// # Examples
    /// ```
    /// use care_calendar::models::appointment::Appointment;
    /// use chrono::{Local, TimeZone};
    ///
    /// let start = Local.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::minutes(45);
    /// let appt = Appointment::new(1, "Wound dressing", start, end).unwrap();
    /// assert_eq!(appt.duration_minutes(), 45.0);
    /// ```
    pub fn new(
        id: i64,
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> CalendarResult<Self> {
        Self::builder()
            .id(id)
            .title(title)
            .start(start)
            .end(end)
            .build()
    }

    /// Create a builder for constructing appointments with optional fields
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::new()
    }

    /// Validate title and time range.
    pub fn validate(&self) -> CalendarResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalendarError::EmptyTitle);
        }
        self.check_range()
    }

    /// Check the `start < end` invariant only.
    pub fn check_range(&self) -> CalendarResult<()> {
        if self.end <= self.start {
            return Err(CalendarError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Duration in (fractional) minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_seconds() as f64 / 60.0
    }

    /// Local calendar date the appointment starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Resolved patient name, or blank when the reference is unset or unresolved.
    pub fn patient_name(&self) -> String {
        self.resolved_patient
            .as_ref()
            .map(Patient::display_name)
            .unwrap_or_default()
    }

    /// Resolved category label, or blank.
    pub fn category_label(&self) -> &str {
        self.resolved_category
            .as_ref()
            .map(Category::display_label)
            .unwrap_or("")
    }

    /// "HH:MM - HH:MM" in local time.
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }

    /// Return a new record with `changes` applied on top of this one.
    ///
    /// The base record is left untouched. Changing a reference drops the
    /// resolved copy that belonged to the old id.
    pub fn with_changes(&self, changes: AppointmentChanges) -> CalendarResult<Self> {
        let mut updated = self.clone();

        if let Some(title) = changes.title {
            updated.title = title;
        }
        if let Some(start) = changes.start {
            updated.start = start;
        }
        if let Some(end) = changes.end {
            updated.end = end;
        }
        if let Some(notes) = changes.notes {
            updated.notes = notes;
        }
        if let Some(location) = changes.location {
            updated.location = location;
        }
        if let Some(attachments) = changes.attachments {
            updated.attachments = attachments;
        }
        if let Some(patient_id) = changes.patient_id {
            if patient_id != updated.patient_id {
                updated.resolved_patient = None;
            }
            updated.patient_id = patient_id;
        }
        if let Some(category_id) = changes.category_id {
            if category_id != updated.category_id {
                updated.resolved_category = None;
            }
            updated.category_id = category_id;
        }

        updated.validate()?;
        Ok(updated)
    }
}

/// Named field overrides for [`Appointment::with_changes`].
///
/// `None` leaves a field as it is; for optional fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentChanges {
    pub title: Option<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
    pub notes: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub attachments: Option<Vec<String>>,
    pub patient_id: Option<Option<PatientId>>,
    pub category_id: Option<Option<CategoryId>>,
}

impl AppointmentChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn times(mut self, start: DateTime<Local>, end: DateTime<Local>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    /// Set attachments from a comma separated list, as typed into a form.
    pub fn attachments_from_list(self, input: &str) -> Self {
        let attachments = input
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        self.attachments(attachments)
    }

    pub fn patient(mut self, patient_id: Option<PatientId>) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builder for creating appointments with optional fields
#[derive(Debug, Default)]
pub struct AppointmentBuilder {
    id: Option<AppointmentId>,
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    notes: Option<String>,
    location: Option<String>,
    attachments: Vec<String>,
    patient_id: Option<PatientId>,
    category_id: Option<CategoryId>,
}

impl AppointmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(AppointmentId(id));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Append one attachment identifier.
    pub fn attachment(mut self, file: impl Into<String>) -> Self {
        self.attachments.push(file.into());
        self
    }

    pub fn patient(mut self, patient_id: i64) -> Self {
        self.patient_id = Some(PatientId(patient_id));
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(CategoryId(category_id));
        self
    }

    /// Build the appointment
    pub fn build(self) -> CalendarResult<Appointment> {
        let id = self.id.ok_or(CalendarError::MissingField { field: "id" })?;
        let title = self.title.ok_or(CalendarError::MissingField { field: "title" })?;
        let start = self.start.ok_or(CalendarError::MissingField { field: "start" })?;
        let end = self.end.ok_or(CalendarError::MissingField { field: "end" })?;

        let appointment = Appointment {
            id,
            title,
            start,
            end,
            notes: self.notes,
            location: self.location,
            attachments: self.attachments,
            patient_id: self.patient_id,
            category_id: self.category_id,
            resolved_patient: None,
            resolved_category: None,
        };

        appointment.validate()?;
        Ok(appointment)
    }
}
