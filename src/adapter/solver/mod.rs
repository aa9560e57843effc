//! Solver backends implementing the `port::Solver` trait.

mod highs;

pub use highs::HiGHSSolver;
