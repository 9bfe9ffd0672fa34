//! Attach resolved patient and category records to appointments.
//!
//! The store only keeps ids on an appointment. Before display the ids are looked
//! up in the patient and category lists fetched alongside; anything that does
//! not resolve is reported and left blank rather than failing the snapshot.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{CalendarError, CalendarResult, ReferenceKind};
use crate::models::appointment::Appointment;
use crate::models::category::{Category, CategoryId};
use crate::models::patient::{Patient, PatientId};
use crate::models::snapshot::Snapshot;

/// Appointments with their references resolved, plus what could not be.
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub appointments: Vec<Appointment>,
    /// One `CalendarError::MissingReference` per unresolved id.
    pub missing: Vec<CalendarError>,
}

/// Resolve `patient` / `category` references against the given records.
pub fn attach_references(
    appointments: Vec<Appointment>,
    patients: &[Patient],
    categories: &[Category],
) -> JoinOutcome {
    let patients: HashMap<PatientId, &Patient> = patients.iter().map(|p| (p.id, p)).collect();
    let categories: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut missing = Vec::new();
    let appointments = appointments
        .into_iter()
        .map(|mut appointment| {
            let appointment_id = appointment.id;
            appointment.resolved_patient = appointment.patient_id.and_then(|id| {
                let found = patients.get(&id).map(|p| (*p).clone());
                if found.is_none() {
                    missing.push(CalendarError::MissingReference {
                        appointment: appointment_id,
                        kind: ReferenceKind::Patient,
                        target: id.0,
                    });
                }
                found
            });
            appointment.resolved_category = appointment.category_id.and_then(|id| {
                let found = categories.get(&id).map(|c| (*c).clone());
                if found.is_none() {
                    missing.push(CalendarError::MissingReference {
                        appointment: appointment_id,
                        kind: ReferenceKind::Category,
                        target: id.0,
                    });
                }
                found
            });
            appointment
        })
        .collect();

    for error in &missing {
        log::warn!("{}", error);
    }

    JoinOutcome { appointments, missing }
}

/// One fetch from the store: appointments plus the records they point at.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotDocument {
    pub appointments: Vec<Appointment>,
    pub patients: Vec<Patient>,
    pub categories: Vec<Category>,
}

impl SnapshotDocument {
    /// Join references and freeze the result. Unresolved references are
    /// returned alongside; invalid records fail the whole snapshot.
    pub fn into_snapshot(self) -> CalendarResult<(Snapshot, Vec<CalendarError>)> {
        let JoinOutcome { appointments, missing } =
            attach_references(self.appointments, &self.patients, &self.categories);
        let snapshot = Snapshot::new(appointments)?;
        Ok((snapshot, missing))
    }
}
