//! Command-line interface definitions.
//!
//! Defines the CLI structure for the almoner application using `clap`.
//! The CLI supports solving an allocation over a transient input batch
//! and validating an input file without solving.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fair resource allocation for children's homes
#[derive(Parser, Debug)]
#[command(name = "almoner")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "almoner.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the almoner CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the allocation problem for an input batch
    Optimize(OptimizeArgs),

    /// Validate an input batch without solving
    Validate(ValidateArgs),
}

/// Arguments for `almoner optimize`.
#[derive(clap::Args, Debug)]
pub struct OptimizeArgs {
    /// Input batch (children, resources, requirements) as TOML
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the configured objective mode
    #[arg(long, value_enum)]
    pub objective: Option<ObjectiveArg>,

    /// Drop pairwise fairness constraints, keeping only minimums
    #[arg(long)]
    pub no_fairness: bool,
}

/// Arguments for `almoner validate`.
#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Input batch to validate
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Objective mode flag values.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ObjectiveArg {
    /// Minimize total cost of the allocation
    Cost,
    /// Minimize total allocated volume
    Volume,
}

impl From<ObjectiveArg> for crate::config::ObjectiveMode {
    fn from(arg: ObjectiveArg) -> Self {
        match arg {
            ObjectiveArg::Cost => Self::Cost,
            ObjectiveArg::Volume => Self::Volume,
        }
    }
}
