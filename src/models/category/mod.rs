//! Category model for organizing appointments.
//!
//! Categories group appointments by type of care (home visit, consultation,
//! therapy, ...). Appointments only hold a weak reference to a category by id.

use serde::{Deserialize, Serialize};

/// Identifier of a category in the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for organizing appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name of the category
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Category {
    /// Create a new category with the given label.
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id: CategoryId(id),
            label: label.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Label trimmed for display.
    pub fn display_label(&self) -> &str {
        self.label.trim()
    }
}
