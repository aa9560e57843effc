//! Solver port for mixed-integer linear programming.
//!
//! The allocation model is always a minimization over non-negative
//! variables, some of which are integer-constrained. Implementations wrap
//! a concrete backend (HiGHS via `good_lp` by default) and perform exactly
//! one solve attempt per call; retry policy belongs to the caller.

use rust_decimal::Decimal;

use crate::domain::{Constraint, VariableBounds};
use crate::error::Result;

/// Mixed-integer linear programming solver.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; the optimizer service moves the
/// solve onto a blocking task so it can be bounded by a timeout.
///
/// # Contract
///
/// - One solve attempt per call, no retries.
/// - Domain records are never mutated; the solver sees only the model.
/// - Non-optimal termination is a status, not an `Err` - `Err` is
///   reserved for backend failures that prevent a solve from running.
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Minimize the objective subject to the model's constraints.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails; infeasible
    /// and unbounded models come back as [`SolveStatus`] values.
    fn solve(&self, problem: &MilpProblem) -> Result<MilpSolution>;
}

/// A mixed-integer minimization problem.
///
/// ```text
/// minimize    c^T * x
/// subject to  constraints
///             bounds on x
///             x[i] integer for i in integer_columns
/// ```
///
/// Columns are appended through [`MilpProblem::add_column`]; the returned
/// index is how constraints and solutions refer to the variable.
#[derive(Debug, Clone, Default)]
pub struct MilpProblem {
    /// Objective coefficients, one per column.
    pub objective: Vec<Decimal>,
    /// Sparse linear constraints over the columns.
    pub constraints: Vec<Constraint>,
    /// Lower and upper bounds for each column.
    pub bounds: Vec<VariableBounds>,
    /// Columns constrained to integer values. All others are continuous.
    pub integer_columns: Vec<usize>,
}

impl MilpProblem {
    /// Create an empty problem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decision variable and return its column index.
    pub fn add_column(
        &mut self,
        objective: Decimal,
        bounds: VariableBounds,
        integer: bool,
    ) -> usize {
        let column = self.objective.len();
        self.objective.push(objective);
        self.bounds.push(bounds);
        if integer {
            self.integer_columns.push(column);
        }
        column
    }

    /// Append a constraint row.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Whether the problem has no variables at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objective.is_empty()
    }
}

/// Solution to a mixed-integer linear program.
#[derive(Debug, Clone)]
pub struct MilpSolution {
    /// Solved value for each column. Meaningful only when the status is
    /// [`SolveStatus::Optimal`].
    pub values: Vec<Decimal>,

    /// Objective function value at the solution.
    pub objective: Decimal,

    /// Termination status of the solver.
    pub status: SolveStatus,
}

impl MilpSolution {
    /// Return `true` if the solver found an optimal solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// An optimal empty solution, for models with no variables.
    #[must_use]
    pub fn trivial() -> Self {
        Self {
            values: vec![],
            objective: Decimal::ZERO,
            status: SolveStatus::Optimal,
        }
    }

    /// A valueless solution carrying only a termination status.
    #[must_use]
    pub fn with_status(status: SolveStatus) -> Self {
        Self {
            values: vec![],
            objective: Decimal::ZERO,
            status,
        }
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Solver found a globally optimal solution.
    Optimal,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// Solver encountered an internal error, or the solve was cut off
    /// by the caller's timeout.
    Error,
}

impl SolveStatus {
    /// Short uppercase code for logs and reports.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Infeasible => "INFEASIBLE",
            Self::Unbounded => "UNBOUNDED",
            Self::Error => "ERROR",
        }
    }
}
