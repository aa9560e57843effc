//! Trait seams between the optimizer core and its collaborators.

pub mod solver;
pub mod store;

pub use solver::{MilpProblem, MilpSolution, SolveStatus, Solver};
pub use store::AllocationRepository;
