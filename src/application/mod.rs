//! Application services orchestrating the domain and the ports.

pub mod optimizer;

pub use optimizer::{
    AllocationInput, AllocationReport, ExhaustionEstimate, ModelBuilder, OptimizeOutcome,
    OptimizerService,
};
