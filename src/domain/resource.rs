//! Consumable and discrete resources available for allocation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::child::Gender;
use super::id::ResourceId;

/// Category of a resource.
///
/// The category decides the variable domain in the optimization model:
/// clothing and education units are handed out whole, everything else may
/// be split fractionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceKind {
    Food,
    Clothing,
    Education,
    Medical,
    Money,
}

impl ResourceKind {
    /// Whether allocations of this kind must be whole numbers.
    ///
    /// Threaded through variable domains, minimum-requirement floors,
    /// fairness tolerances, and result rounding. Keep those call sites in
    /// agreement with this single predicate.
    #[must_use]
    pub const fn is_integral(&self) -> bool {
        matches!(self, Self::Clothing | Self::Education)
    }

    /// Canonical uppercase code for display and logging.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Clothing => "CLOTHING",
            Self::Education => "EDUCATION",
            Self::Medical => "MEDICAL",
            Self::Money => "MONEY",
        }
    }
}

/// Gender restriction on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderRule {
    /// Available to every child.
    #[serde(rename = "ALL")]
    All,
    /// Restricted to male children.
    #[serde(rename = "MALE")]
    MaleOnly,
    /// Restricted to female children.
    #[serde(rename = "FEMALE")]
    FemaleOnly,
}

impl GenderRule {
    /// Whether a child of the given gender may receive the resource.
    #[must_use]
    pub const fn admits(&self, gender: Gender) -> bool {
        match self {
            Self::All => true,
            Self::MaleOnly => matches!(gender, Gender::Male),
            Self::FemaleOnly => matches!(gender, Gender::Female),
        }
    }
}

/// A stock of one resource available for allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier; the resource name in the transient-input flow.
    pub id: ResourceId,
    /// Display name, unique within a run.
    pub name: String,
    /// Resource category.
    pub kind: ResourceKind,
    /// Total stock currently available. Never negative.
    pub quantity: Decimal,
    /// Display unit ("kg", "sets"); not used in computation.
    pub unit: String,
    /// Cost of one unit, used by the cost-minimizing objective.
    pub cost_per_unit: Decimal,
    /// Gender restriction.
    pub gender_specific: GenderRule,
}

impl Resource {
    /// Create a resource keyed by its name.
    pub fn new(
        name: impl Into<String>,
        kind: ResourceKind,
        quantity: Decimal,
        unit: impl Into<String>,
        cost_per_unit: Decimal,
        gender_specific: GenderRule,
    ) -> Self {
        let name = name.into();
        Self {
            id: ResourceId::new(name.clone()),
            name,
            kind,
            quantity,
            unit: unit.into(),
            cost_per_unit,
            gender_specific,
        }
    }

    /// Record a donation, increasing available stock.
    pub fn receive_donation(&mut self, quantity: Decimal) {
        self.quantity += quantity;
    }
}
