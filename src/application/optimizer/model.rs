//! Model builder: turns domain records into a mixed-integer program.
//!
//! One non-negative decision variable per eligible (child, resource)
//! pair, integer-domain for integral resource kinds. Constraints cover
//! capacity, minimum requirements, and (policy permitting) pairwise
//! fairness plus a free fairness-floor variable per resource kind.
//!
//! Resources with no eligible children produce no variables, no
//! constraints, and no objective terms; that is a valid trivial sub-case,
//! never an error.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::{FairnessPolicy, ObjectiveMode};
use crate::domain::{
    eligible_children, Child, ChildId, Constraint, Requirement, Resource, ResourceId,
    ResourceKind, VariableBounds,
};
use crate::port::MilpProblem;

/// Upper edge of the fairness band for continuous resources.
const FAIRNESS_UPPER: Decimal = dec!(1.2);
/// Lower edge of the fairness band for continuous resources.
const FAIRNESS_LOWER: Decimal = dec!(0.8);

/// A built model plus the index mapping solver columns back to pairs.
///
/// The variable bindings live only for the duration of one optimization
/// call; nothing here outlives the run that created it.
#[derive(Debug, Clone)]
pub struct BuiltModel {
    /// The mixed-integer program handed to the solver.
    pub problem: MilpProblem,
    pairs: Vec<(ChildId, ResourceId)>,
    index: HashMap<(ChildId, ResourceId), usize>,
    floor_columns: HashMap<ResourceKind, usize>,
}

impl BuiltModel {
    /// Eligible (child, resource) pairs in column order.
    ///
    /// Pair `i` corresponds to column `i` of the problem; fairness-floor
    /// columns come after all pair columns.
    #[must_use]
    pub fn pairs(&self) -> &[(ChildId, ResourceId)] {
        &self.pairs
    }

    /// Column index for an eligible pair, if one exists.
    #[must_use]
    pub fn column(&self, child: &ChildId, resource: &ResourceId) -> Option<usize> {
        self.index.get(&(child.clone(), resource.clone())).copied()
    }

    /// Column index of the fairness-floor variable for a resource kind.
    #[must_use]
    pub fn floor_column(&self, kind: ResourceKind) -> Option<usize> {
        self.floor_columns.get(&kind).copied()
    }
}

/// Builds the allocation program from domain records.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder {
    objective: ObjectiveMode,
    fairness: FairnessPolicy,
}

impl ModelBuilder {
    /// Create a builder with the given policy knobs.
    #[must_use]
    pub const fn new(objective: ObjectiveMode, fairness: FairnessPolicy) -> Self {
        Self {
            objective,
            fairness,
        }
    }

    /// Build the program for a snapshot of domain records.
    #[must_use]
    pub fn build(
        &self,
        children: &[Child],
        resources: &[Resource],
        requirements: &[Requirement],
    ) -> BuiltModel {
        let mut problem = MilpProblem::new();
        let mut pairs = Vec::new();
        let mut index = HashMap::new();

        // Decision variables, gated by the eligibility rule.
        for resource in resources {
            for child in eligible_children(children, resource) {
                let cost = match self.objective {
                    ObjectiveMode::Cost => resource.cost_per_unit,
                    ObjectiveMode::Volume => Decimal::ONE,
                };
                let column = problem.add_column(
                    cost,
                    VariableBounds::non_negative(),
                    resource.kind.is_integral(),
                );
                let key = (child.id.clone(), resource.id.clone());
                index.insert(key.clone(), column);
                pairs.push(key);
            }
        }

        self.add_capacity_constraints(&mut problem, &index, children, resources);
        self.add_minimum_constraints(&mut problem, &index, children, resources, requirements);

        let mut floor_columns = HashMap::new();
        if self.fairness == FairnessPolicy::Full {
            floor_columns =
                self.add_fairness_constraints(&mut problem, &index, children, resources);
        }

        debug!(
            variables = problem.num_vars(),
            constraints = problem.constraints.len(),
            integer = problem.integer_columns.len(),
            "allocation model built"
        );

        BuiltModel {
            problem,
            pairs,
            index,
            floor_columns,
        }
    }

    /// Per resource: total handed out must not exceed available stock.
    fn add_capacity_constraints(
        &self,
        problem: &mut MilpProblem,
        index: &HashMap<(ChildId, ResourceId), usize>,
        children: &[Child],
        resources: &[Resource],
    ) {
        for resource in resources {
            let terms: Vec<(usize, Decimal)> = eligible_children(children, resource)
                .iter()
                .filter_map(|c| index.get(&(c.id.clone(), resource.id.clone())))
                .map(|&col| (col, Decimal::ONE))
                .collect();
            if terms.is_empty() {
                continue;
            }
            problem.add_constraint(Constraint::leq(terms, resource.quantity));
        }
    }

    /// Per requirement and eligible child: allocation must reach the
    /// entitlement, capped at an even split of the available stock.
    ///
    /// The even-split divisor is the count of eligible children for the
    /// resource, so gender-restricted stock is not diluted by children
    /// who can never receive it.
    fn add_minimum_constraints(
        &self,
        problem: &mut MilpProblem,
        index: &HashMap<(ChildId, ResourceId), usize>,
        children: &[Child],
        resources: &[Resource],
        requirements: &[Requirement],
    ) {
        for requirement in requirements {
            let Some(resource) = resources.iter().find(|r| r.id == requirement.resource) else {
                continue;
            };
            let eligible = eligible_children(children, resource);
            if eligible.is_empty() {
                continue;
            }

            let even_split = resource.quantity / Decimal::from(eligible.len());
            let mut floor = requirement.quantity_per_child.min(even_split);
            if resource.kind.is_integral() {
                floor = floor.trunc();
            }

            for child in eligible {
                if let Some(&col) = index.get(&(child.id.clone(), resource.id.clone())) {
                    problem.add_constraint(Constraint::geq(vec![(col, Decimal::ONE)], floor));
                }
            }
        }
    }

    /// Pairwise fairness bands plus one free floor variable per kind.
    ///
    /// Integral kinds tolerate a spread of one unit; continuous kinds a
    /// +-20% band. Every eligible allocation additionally sits above its
    /// kind's floor variable, whose value the solver discovers - linking
    /// fairness across resources of the same category.
    fn add_fairness_constraints(
        &self,
        problem: &mut MilpProblem,
        index: &HashMap<(ChildId, ResourceId), usize>,
        children: &[Child],
        resources: &[Resource],
    ) -> HashMap<ResourceKind, usize> {
        let mut floor_columns: HashMap<ResourceKind, usize> = HashMap::new();

        for resource in resources {
            let eligible = eligible_children(children, resource);
            if eligible.is_empty() {
                continue;
            }

            let floor_col = *floor_columns.entry(resource.kind).or_insert_with(|| {
                problem.add_column(Decimal::ZERO, VariableBounds::non_negative(), false)
            });

            let columns: Vec<usize> = eligible
                .iter()
                .filter_map(|c| index.get(&(c.id.clone(), resource.id.clone())))
                .copied()
                .collect();

            // Kind-level floor: every eligible allocation >= floor var.
            for &col in &columns {
                problem.add_constraint(Constraint::geq(
                    vec![(col, Decimal::ONE), (floor_col, -Decimal::ONE)],
                    Decimal::ZERO,
                ));
            }

            if resource.kind.is_integral() {
                // |a - b| <= 1, one pair of rows per unordered pair.
                for (i, &a) in columns.iter().enumerate() {
                    for &b in &columns[i + 1..] {
                        problem.add_constraint(Constraint::leq(
                            vec![(a, Decimal::ONE), (b, -Decimal::ONE)],
                            Decimal::ONE,
                        ));
                        problem.add_constraint(Constraint::geq(
                            vec![(a, Decimal::ONE), (b, -Decimal::ONE)],
                            -Decimal::ONE,
                        ));
                    }
                }
            } else {
                // a <= 1.2 * b and a >= 0.8 * b for every ordered pair.
                for &a in &columns {
                    for &b in &columns {
                        if a == b {
                            continue;
                        }
                        problem.add_constraint(Constraint::leq(
                            vec![(a, Decimal::ONE), (b, -FAIRNESS_UPPER)],
                            Decimal::ZERO,
                        ));
                        problem.add_constraint(Constraint::geq(
                            vec![(a, Decimal::ONE), (b, -FAIRNESS_LOWER)],
                            Decimal::ZERO,
                        ));
                    }
                }
            }
        }

        floor_columns
    }
}
