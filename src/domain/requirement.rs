//! Per-child entitlements at a given cadence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ResourceId;

/// Cadence at which a requirement recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Seasonal,
}

impl Frequency {
    /// Days covered by one period, for converting an entitlement to a
    /// daily usage rate. Seasonal requirements have no meaningful daily
    /// rate and are excluded from exhaustion estimates.
    #[must_use]
    pub const fn days_per_period(&self) -> Option<u32> {
        match self {
            Self::Daily => Some(1),
            Self::Weekly => Some(7),
            Self::Monthly => Some(30),
            Self::Seasonal => None,
        }
    }
}

/// Minimum entitlement of one resource per child.
///
/// References its resource by [`ResourceId`]; in the transient-input flow
/// that is the resource name. A resource carries at most one requirement
/// in the transient flow and one per cadence in the store-backed flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Resource this entitlement applies to.
    pub resource: ResourceId,
    /// Quantity each child is entitled to per period. Never negative.
    pub quantity_per_child: Decimal,
    /// Cadence of the entitlement.
    pub frequency: Frequency,
}

impl Requirement {
    /// Create a requirement for a resource.
    pub fn new(
        resource: impl Into<ResourceId>,
        quantity_per_child: Decimal,
        frequency: Frequency,
    ) -> Self {
        Self {
            resource: resource.into(),
            quantity_per_child,
            frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn days_per_period() {
        assert_eq!(Frequency::Daily.days_per_period(), Some(1));
        assert_eq!(Frequency::Weekly.days_per_period(), Some(7));
        assert_eq!(Frequency::Monthly.days_per_period(), Some(30));
        assert_eq!(Frequency::Seasonal.days_per_period(), None);
    }

    #[test]
    fn requirement_references_resource_by_id() {
        let req = Requirement::new("Rice", dec!(2), Frequency::Daily);
        assert_eq!(req.resource.as_str(), "Rice");
        assert_eq!(req.quantity_per_child, dec!(2));
    }

    #[test]
    fn frequency_deserializes_from_uppercase() {
        let f: Frequency = serde_json::from_str("\"WEEKLY\"").unwrap();
        assert_eq!(f, Frequency::Weekly);
    }
}
