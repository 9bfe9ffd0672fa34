//! Immutable, validated appointment set.
//!
//! A snapshot is the unit of data exchange with the external repository: each
//! fetch produces a new one that fully replaces the previous one.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{CalendarError, CalendarResult};
use crate::models::appointment::{Appointment, AppointmentId};

#[derive(Debug, Clone)]
pub struct Snapshot {
    appointments: Arc<[Appointment]>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            appointments: Arc::from(Vec::new()),
        }
    }
}

impl Snapshot {
    /// Validate and freeze `appointments`, keeping their incoming order.
    ///
    /// Rejects records with `end <= start` and duplicate ids.
    pub fn new(appointments: Vec<Appointment>) -> CalendarResult<Self> {
        let mut seen: HashSet<AppointmentId> = HashSet::with_capacity(appointments.len());
        for appointment in &appointments {
            appointment.check_range()?;
            if !seen.insert(appointment.id) {
                return Err(CalendarError::DuplicateAppointment(appointment.id));
            }
        }
        Ok(Self {
            appointments: appointments.into(),
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Appointment> {
        self.appointments.iter()
    }

    pub fn as_slice(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|appt| appt.id == id)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Appointment;
    type IntoIter = std::slice::Iter<'a, Appointment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn appt(id: i64) -> Appointment {
        let start = Local.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap();
        Appointment::new(id, "Visit", start, start + Duration::minutes(30)).unwrap()
    }

    #[test]
    fn test_snapshot_keeps_order() {
        let snapshot = Snapshot::new(vec![appt(3), appt(1), appt(2)]).unwrap();
        let ids: Vec<i64> = snapshot.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(AppointmentId(1)).map(|a| a.id.0), Some(1));
        assert!(snapshot.get(AppointmentId(9)).is_none());
    }

    #[test]
    fn test_snapshot_rejects_duplicate_ids() {
        let result = Snapshot::new(vec![appt(1), appt(2), appt(1)]);
        assert_eq!(
            result.unwrap_err(),
            CalendarError::DuplicateAppointment(AppointmentId(1))
        );
    }

    #[test]
    fn test_snapshot_rejects_invalid_range() {
        let mut broken = appt(1);
        broken.end = broken.start;
        assert!(matches!(
            Snapshot::new(vec![broken]),
            Err(CalendarError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::new(Vec::new()).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.iter().count(), 0);
    }
}
