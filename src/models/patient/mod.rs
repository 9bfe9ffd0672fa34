//! Patient model.
//!
//! Patients are owned by the external booking workflow. The calendar only
//! reads them to show a name next to an appointment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a patient in the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub i64);

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person receiving care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Assessed care level (1-5)
    #[serde(default)]
    pub care_level: Option<u8>,
    #[serde(default)]
    pub pronoun: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub active_since: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl Patient {
    /// Create an active patient with just a name.
    pub fn new(id: i64, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id: PatientId(id),
            firstname: firstname.into(),
            lastname: lastname.into(),
            birth_date: None,
            care_level: None,
            pronoun: None,
            email: String::new(),
            active: true,
            active_since: None,
        }
    }

    /// "Firstname Lastname", skipping whichever part is blank.
    pub fn display_name(&self) -> String {
        [self.firstname.trim(), self.lastname.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let patient = Patient::new(1, "Greta", "Lindner");
        assert_eq!(patient.display_name(), "Greta Lindner");
    }

    #[test]
    fn test_display_name_with_missing_part() {
        let patient = Patient::new(1, "", "Lindner");
        assert_eq!(patient.display_name(), "Lindner");
    }

    #[test]
    fn test_deserialize_store_row() {
        let json = r#"{
            "id": 12,
            "firstname": "Jonas",
            "lastname": "Weber",
            "birth_date": "1941-03-08",
            "care_level": 3,
            "pronoun": "he/him",
            "email": "jonas@example.org",
            "active_since": "2023-05-01"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();

        assert_eq!(patient.id, PatientId(12));
        assert_eq!(patient.care_level, Some(3));
        assert!(patient.active);
        assert_eq!(
            patient.birth_date,
            NaiveDate::from_ymd_opt(1941, 3, 8)
        );
    }
}
