//! Handlers for the `optimize` and `validate` subcommands.

use std::sync::Arc;

use tracing::info;

use crate::adapter::solver::HiGHSSolver;
use crate::adapter::store::MemoryRepository;
use crate::application::optimizer::{AllocationInput, OptimizeOutcome, OptimizerService};
use crate::config::{Config, FairnessPolicy};
use crate::error::Result;

use super::command::{OptimizeArgs, ValidateArgs};
use super::output;

/// Load an input batch, solve it, and render the outcome.
///
/// Returns `true` when an allocation was produced, so `main` can set the
/// exit code on infeasible runs without treating them as crashes.
pub async fn run_optimize(args: &OptimizeArgs, config: &Config, json: bool) -> Result<bool> {
    let mut optimizer_config = config.optimizer.clone();
    if let Some(objective) = args.objective {
        optimizer_config.objective = objective.into();
    }
    if args.no_fairness {
        optimizer_config.fairness = FairnessPolicy::Minimums;
    }

    let input = AllocationInput::load(&args.input)?;
    let validated = input.validate()?;
    let resources = validated.resources.clone();

    info!(
        children = validated.children.len(),
        resources = resources.len(),
        "optimization requested"
    );

    let repository = Arc::new(MemoryRepository::seeded(
        validated.children,
        validated.resources,
        validated.requirements,
    ));
    let service = OptimizerService::new(
        repository,
        Arc::new(HiGHSSolver::new()),
        optimizer_config,
    );

    match service.optimize().await? {
        OptimizeOutcome::Allocated(report) => {
            output::render_report(&report, &resources, json)?;
            Ok(true)
        }
        OptimizeOutcome::NotAllocated { status, reason } => {
            output::render_failure(status, &reason, json)?;
            Ok(false)
        }
    }
}

/// Parse and validate an input batch without solving.
pub fn run_validate(args: &ValidateArgs, json: bool) -> Result<bool> {
    let input = AllocationInput::load(&args.input)?;
    let validated = input.validate()?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "valid": true,
                "children": validated.children.len(),
                "resources": validated.resources.len(),
                "requirements": validated.requirements.len(),
            })
        );
    } else {
        println!(
            "input is valid: {} children, {} resources, {} requirements",
            validated.children.len(),
            validated.resources.len(),
            validated.requirements.len()
        );
    }
    Ok(true)
}
