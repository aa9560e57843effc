//! Result interpreter: solved values to allocation records and metrics.
//!
//! Walks the eligible pairs in column order, rounds integral kinds to
//! whole units, and derives per-resource remaining stock and exhaustion
//! estimates. The eligibility gating is the same index the model builder
//! produced, so extraction can never disagree with construction.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::{
    eligible_children, Allocation, Child, Requirement, Resource, ResourceId,
};
use crate::port::MilpSolution;

use super::model::BuiltModel;

/// Payload of one successful optimizer run.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    /// New allocation records, in pair-column order.
    pub allocations: Vec<Allocation>,
    /// Exhaustion summaries for resources with a recurring requirement.
    pub exhaustion: Vec<ExhaustionEstimate>,
    /// Objective value reported by the solver.
    pub objective: Decimal,
}

impl AllocationReport {
    /// Total quantity allocated for one resource.
    #[must_use]
    pub fn total_for(&self, resource: &ResourceId) -> Decimal {
        self.allocations
            .iter()
            .filter(|a| &a.resource == resource)
            .map(|a| a.quantity)
            .sum()
    }
}

/// Projected depletion of one resource at its required usage rate.
///
/// Informational output only; never fed back into the model.
#[derive(Debug, Clone, Serialize)]
pub struct ExhaustionEstimate {
    /// Resource the estimate applies to.
    pub resource: ResourceId,
    /// Display name.
    pub name: String,
    /// Display unit.
    pub unit: String,
    /// Stock left after this run's allocations.
    pub remaining: Decimal,
    /// Required usage per day across eligible children.
    pub daily_rate: Decimal,
    /// Whole days until the remaining stock runs out. Zero when the
    /// daily rate is zero; never negative.
    pub days_left: u64,
    /// Calendar date the stock runs out, when a daily rate exists.
    pub depleted_on: Option<NaiveDate>,
}

/// Convert an optimal solution into allocation records and metrics.
///
/// Only strictly positive solved values produce records. Integral kinds
/// are rounded to the nearest whole unit (half away from zero);
/// continuous kinds keep the value as computed.
#[must_use]
pub fn interpret(
    model: &BuiltModel,
    solution: &MilpSolution,
    children: &[Child],
    resources: &[Resource],
    requirements: &[Requirement],
    today: NaiveDate,
) -> AllocationReport {
    let by_id: HashMap<&ResourceId, &Resource> =
        resources.iter().map(|r| (&r.id, r)).collect();

    let mut allocations = Vec::new();
    let mut remaining: HashMap<ResourceId, Decimal> = HashMap::new();

    for (column, (child_id, resource_id)) in model.pairs().iter().enumerate() {
        let Some(resource) = by_id.get(resource_id) else {
            continue;
        };
        let Some(&value) = solution.values.get(column) else {
            continue;
        };

        let quantity = if resource.kind.is_integral() {
            value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        } else {
            value
        };
        if quantity <= Decimal::ZERO {
            continue;
        }

        allocations.push(Allocation::dated(
            child_id.clone(),
            resource_id.clone(),
            quantity,
            today,
        ));
        *remaining
            .entry(resource_id.clone())
            .or_insert(resource.quantity) -= quantity;
    }

    let exhaustion = estimate_exhaustion(children, resources, requirements, &remaining, today);

    AllocationReport {
        allocations,
        exhaustion,
        objective: solution.objective,
    }
}

/// Days-until-empty per resource with a daily, weekly, or monthly
/// requirement. Seasonal requirements carry no daily rate.
fn estimate_exhaustion(
    children: &[Child],
    resources: &[Resource],
    requirements: &[Requirement],
    remaining: &HashMap<ResourceId, Decimal>,
    today: NaiveDate,
) -> Vec<ExhaustionEstimate> {
    let mut estimates = Vec::new();

    for resource in resources {
        let eligible = Decimal::from(eligible_children(children, resource).len());

        let recurring: Vec<&Requirement> = requirements
            .iter()
            .filter(|req| {
                req.resource == resource.id && req.frequency.days_per_period().is_some()
            })
            .collect();
        if recurring.is_empty() {
            continue;
        }

        // May still be zero, for a zero entitlement or an empty eligible
        // set; the estimate is then "0 days", not a division.
        let daily_rate: Decimal = recurring
            .iter()
            .filter_map(|req| {
                req.frequency
                    .days_per_period()
                    .map(|days| req.quantity_per_child * eligible / Decimal::from(days))
            })
            .sum();

        let left = remaining
            .get(&resource.id)
            .copied()
            .unwrap_or(resource.quantity);

        // Guard both the divide-by-zero and the negative-days cases.
        let days_left = if daily_rate > Decimal::ZERO && left > Decimal::ZERO {
            (left / daily_rate).floor().to_u64().unwrap_or(0)
        } else {
            0
        };

        estimates.push(ExhaustionEstimate {
            resource: resource.id.clone(),
            name: resource.name.clone(),
            unit: resource.unit.clone(),
            remaining: left,
            daily_rate,
            days_left,
            depleted_on: if daily_rate > Decimal::ZERO {
                today.checked_add_days(chrono::Days::new(days_left))
            } else {
                None
            },
        });
    }

    estimates
}
