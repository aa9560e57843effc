//! Allocation records produced by one optimizer run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::{ChildId, ResourceId};

/// One child's share of one resource, as decided by the solver.
///
/// Allocations are immutable once created and are replaced wholesale by
/// the next successful run (solve-and-replace, never incremental).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// Child receiving the share.
    pub child: ChildId,
    /// Resource being shared out.
    pub resource: ResourceId,
    /// Allocated quantity. Whole number for integral resource kinds.
    pub quantity: Decimal,
    /// Date the allocation was computed. Set at creation, immutable.
    pub date_allocated: NaiveDate,
}

impl Allocation {
    /// Create an allocation dated today.
    pub fn new(child: ChildId, resource: ResourceId, quantity: Decimal) -> Self {
        Self::dated(child, resource, quantity, chrono::Utc::now().date_naive())
    }

    /// Create an allocation with an explicit date.
    pub fn dated(
        child: ChildId,
        resource: ResourceId,
        quantity: Decimal,
        date_allocated: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            child,
            resource,
            quantity,
            date_allocated,
        }
    }
}
