//! Concrete edges of the application: solver backend, record store, CLI.

pub mod cli;
pub mod solver;
pub mod store;
