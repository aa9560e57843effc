//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer
//! programming solver. This adapter wraps it through the good_lp crate
//! and is the only place where `Decimal` model data crosses into `f64`.

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::ConstraintSense;
use crate::error::Result;
use crate::port::{MilpProblem, MilpSolution, SolveStatus, Solver};

/// HiGHS-based MILP solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &MilpProblem) -> Result<MilpSolution> {
        let n = problem.num_vars();

        // Handle empty problem
        if n == 0 {
            return Ok(MilpSolution::trivial());
        }

        // Create variables
        let mut vars = variables!();
        let mut var_list = Vec::with_capacity(n);

        for (i, bounds) in problem.bounds.iter().enumerate() {
            let mut v = variable();

            if let Some(lb) = bounds.lower {
                v = v.min(lb.to_f64().unwrap_or(0.0));
            }
            if let Some(ub) = bounds.upper {
                v = v.max(ub.to_f64().unwrap_or(f64::INFINITY));
            }

            if problem.integer_columns.contains(&i) {
                v = v.integer();
            }

            var_list.push(vars.add(v));
        }

        // Build objective function
        let objective: Expression = var_list
            .iter()
            .zip(problem.objective.iter())
            .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
            .sum();

        let mut model = vars.minimise(&objective).using(highs);

        // Add sparse constraint rows
        for constr in &problem.constraints {
            let lhs: Expression = constr
                .terms
                .iter()
                .map(|(col, coeff)| coeff.to_f64().unwrap_or(0.0) * var_list[*col])
                .sum();

            let rhs = constr.rhs.to_f64().unwrap_or(0.0);

            match constr.sense {
                ConstraintSense::GreaterEqual => {
                    model = model.with(constraint!(lhs >= rhs));
                }
                ConstraintSense::LessEqual => {
                    model = model.with(constraint!(lhs <= rhs));
                }
                ConstraintSense::Equal => {
                    model = model.with(constraint!(lhs == rhs));
                }
            }
        }

        match model.solve() {
            Ok(solution) => {
                let values: Vec<Decimal> = var_list
                    .iter()
                    .map(|v| Decimal::try_from(solution.value(*v)).unwrap_or(Decimal::ZERO))
                    .collect();

                // Re-evaluate the objective with the solved values
                let objective: f64 = values
                    .iter()
                    .zip(problem.objective.iter())
                    .map(|(v, c)| v.to_f64().unwrap_or(0.0) * c.to_f64().unwrap_or(0.0))
                    .sum();

                Ok(MilpSolution {
                    values,
                    objective: Decimal::try_from(objective).unwrap_or(Decimal::ZERO),
                    status: SolveStatus::Optimal,
                })
            }
            Err(ResolutionError::Infeasible) => {
                Ok(MilpSolution::with_status(SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(MilpSolution::with_status(SolveStatus::Unbounded))
            }
            Err(_) => Ok(MilpSolution::with_status(SolveStatus::Error)),
        }
    }
}
