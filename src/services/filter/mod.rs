//! Appointment filters.
//!
//! Each criterion is an independent conjunctive predicate, so applying them in
//! any order or grouping selects the same appointments. Unset criteria are
//! no-ops and the relative order of the input is always preserved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::appointment::Appointment;
use crate::models::category::CategoryId;
use crate::models::patient::PatientId;

/// Criteria chosen in the filter panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub category: Option<CategoryId>,
    pub patient: Option<PatientId>,
    /// Earliest start date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest start date, inclusive (the whole day counts).
    pub to: Option<NaiveDate>,
}

/// One criterion as a standalone predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPredicate {
    Category(CategoryId),
    Patient(PatientId),
    StartsOnOrAfter(NaiveDate),
    StartsOnOrBefore(NaiveDate),
}

impl FilterPredicate {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        match *self {
            Self::Category(id) => appointment.category_id == Some(id),
            Self::Patient(id) => appointment.patient_id == Some(id),
            Self::StartsOnOrAfter(date) => appointment.start_date() >= date,
            Self::StartsOnOrBefore(date) => appointment.start_date() <= date,
        }
    }
}

impl FilterCriteria {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Clear every criterion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn with_category(mut self, id: CategoryId) -> Self {
        self.category = Some(id);
        self
    }

    pub fn with_patient(mut self, id: PatientId) -> Self {
        self.patient = Some(id);
        self
    }

    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// The set criteria as independent predicates.
    pub fn predicates(&self) -> Vec<FilterPredicate> {
        [
            self.category.map(FilterPredicate::Category),
            self.patient.map(FilterPredicate::Patient),
            self.from.map(FilterPredicate::StartsOnOrAfter),
            self.to.map(FilterPredicate::StartsOnOrBefore),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.predicates().iter().all(|p| p.matches(appointment))
    }
}

/// Keep the appointments matching every predicate, in input order.
pub fn apply_predicates<'a, I>(appointments: I, predicates: &[FilterPredicate]) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments
        .into_iter()
        .filter(|appt| predicates.iter().all(|p| p.matches(appt)))
        .collect()
}

/// Narrow `appointments` by `criteria`, in input order.
pub fn apply_filters<'a, I>(appointments: I, criteria: &FilterCriteria) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let predicates = criteria.predicates();
    let filtered = apply_predicates(appointments, &predicates);
    log::debug!(
        "Filter with {} active criteria kept {} appointment(s)",
        predicates.len(),
        filtered.len()
    );
    filtered
}
