//! Children under care and their attributes relevant to allocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::ChildId;

/// Gender of a child, matched against gender-restricted resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Canonical uppercase code, as stored and compared by the allocator.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

/// A dependent in the population the optimizer allocates for.
///
/// Identity is stable across runs and used as half of the composite
/// decision-variable key. Administrative edits happen outside the
/// optimizer; it only reads these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Stable unique identifier.
    pub id: ChildId,
    /// Display name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Gender, checked against resource gender restrictions.
    pub gender: Gender,
    /// Date the child was admitted.
    pub admission_date: NaiveDate,
}

impl Child {
    /// Create a child record.
    pub fn new(
        id: impl Into<ChildId>,
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        admission_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            gender,
            admission_date,
        }
    }
}
