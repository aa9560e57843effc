//! The allocation optimizer: one synchronous unit of work per run.
//!
//! build model -> solve -> interpret -> replace allocations. The solve is
//! bounded by a caller-supplied timeout and runs on a blocking task; the
//! whole read-solve-write sequence holds a single run lock so concurrent
//! invocations over the same pool serialize instead of double-spending
//! capacity.

pub mod input;
pub mod interpret;
pub mod model;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::OptimizerConfig;
use crate::domain::{Child, Requirement, Resource};
use crate::error::{Error, Result};
use crate::port::{AllocationRepository, MilpSolution, SolveStatus, Solver};

pub use input::{AllocationInput, ValidatedInput};
pub use interpret::{AllocationReport, ExhaustionEstimate};
pub use model::{BuiltModel, ModelBuilder};

/// Outcome of one optimizer invocation.
///
/// Infeasibility is an outcome, not an error: the caller gets a
/// human-readable reason and the previous allocation set stays untouched.
#[derive(Debug)]
pub enum OptimizeOutcome {
    /// An optimal allocation was found (and, in the store-backed flow,
    /// persisted in place of the previous set).
    Allocated(AllocationReport),
    /// The solver terminated without an optimal solution.
    NotAllocated {
        /// Termination status reported by the solver adapter.
        status: SolveStatus,
        /// Human-readable reason for reporting.
        reason: String,
    },
}

impl OptimizeOutcome {
    /// Whether the run produced allocations.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated(_))
    }

    /// The report, if the run succeeded.
    #[must_use]
    pub fn report(&self) -> Option<&AllocationReport> {
        match self {
            Self::Allocated(report) => Some(report),
            Self::NotAllocated { .. } => None,
        }
    }
}

/// Orchestrates optimization runs against a repository and a solver.
pub struct OptimizerService<R> {
    repository: Arc<R>,
    solver: Arc<dyn Solver>,
    config: OptimizerConfig,
    run_lock: Mutex<()>,
}

impl<R: AllocationRepository> OptimizerService<R> {
    /// Create a service over a repository and a solver backend.
    pub fn new(repository: Arc<R>, solver: Arc<dyn Solver>, config: OptimizerConfig) -> Self {
        Self {
            repository,
            solver,
            config,
            run_lock: Mutex::new(()),
        }
    }

    /// Run the store-backed flow: snapshot records, solve, and on an
    /// optimal solution replace the stored allocation set wholesale.
    ///
    /// Serialized against every other run on this service; the
    /// replacement write is all-or-nothing through the repository.
    pub async fn optimize(&self) -> Result<OptimizeOutcome> {
        let _guard = self.run_lock.lock().await;

        let children = self.repository.children().await?;
        let resources = self.repository.resources().await?;
        let requirements = self.repository.requirements().await?;

        let outcome = self
            .solve_snapshot(&children, &resources, &requirements)
            .await?;

        if let OptimizeOutcome::Allocated(report) = &outcome {
            self.repository
                .replace_allocations(report.allocations.clone())
                .await?;
            info!(
                allocations = report.allocations.len(),
                "allocation set replaced"
            );
        }

        Ok(outcome)
    }

    /// Run the transient-input flow: validate the batch, solve, and
    /// report without touching the repository.
    pub async fn plan(&self, input: AllocationInput) -> Result<OptimizeOutcome> {
        let _guard = self.run_lock.lock().await;
        let validated = input.validate()?;
        self.solve_snapshot(
            &validated.children,
            &validated.resources,
            &validated.requirements,
        )
        .await
    }

    async fn solve_snapshot(
        &self,
        children: &[Child],
        resources: &[Resource],
        requirements: &[Requirement],
    ) -> Result<OptimizeOutcome> {
        let builder = ModelBuilder::new(self.config.objective, self.config.fairness);
        let model = builder.build(children, resources, requirements);

        let started = Instant::now();
        let solution = if model.problem.is_empty() {
            // Zero children or zero eligible pairs: trivially optimal.
            MilpSolution::trivial()
        } else {
            self.solve_bounded(&model).await?
        };

        info!(
            solver = self.solver.name(),
            status = solution.status.code(),
            variables = model.problem.num_vars(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solve finished"
        );

        match solution.status {
            SolveStatus::Optimal => {
                let report = interpret::interpret(
                    &model,
                    &solution,
                    children,
                    resources,
                    requirements,
                    chrono::Utc::now().date_naive(),
                );
                Ok(OptimizeOutcome::Allocated(report))
            }
            status => Ok(OptimizeOutcome::NotAllocated {
                status,
                reason: "no feasible allocation".into(),
            }),
        }
    }

    /// Solve on a blocking task, bounded by the configured timeout.
    ///
    /// An elapsed timeout is logged distinctly for operational diagnosis
    /// and surfaced as an error status - fail fast, never a partial
    /// allocation.
    async fn solve_bounded(&self, model: &BuiltModel) -> Result<MilpSolution> {
        let solver = Arc::clone(&self.solver);
        let problem = model.problem.clone();
        let handle = tokio::task::spawn_blocking(move || solver.solve(&problem));

        match tokio::time::timeout(self.config.solver_timeout(), handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(Error::Solver(join_error.to_string())),
            Err(_elapsed) => {
                warn!(
                    timeout_secs = self.config.solver_timeout_secs,
                    "solver timed out; treating run as failed"
                );
                Ok(MilpSolution::with_status(SolveStatus::Error))
            }
        }
    }
}
