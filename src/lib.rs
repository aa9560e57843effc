//! Almoner - fair allocation of shelter resources among children.
//!
//! This crate formulates resource allocation as a mixed-integer linear
//! program: a finite stock of consumable and discrete resources (food,
//! clothing, education materials, medical supplies, money) is shared out
//! over a population of children under eligibility, capacity, fairness,
//! and minimum-requirement constraints.
//!
//! # Architecture
//!
//! The optimizer core is a pipeline over narrow trait seams:
//!
//! - **`domain`** - plain records (children, resources, requirements,
//!   allocations), the eligibility rule, and linear-constraint types
//! - **`application::optimizer`** - the model builder, result
//!   interpreter, and run orchestration
//! - **`port`** - the `Solver` and `AllocationRepository` contracts
//! - **`adapter`** - HiGHS via good_lp, an in-memory repository, and the
//!   clap CLI
//!
//! Integral resource kinds (clothing, education) get integer decision
//! variables and whole-number results; everything else stays continuous.
//! A successful run replaces the stored allocation set wholesale
//! (solve-and-replace); infeasibility is reported as an outcome, never a
//! panic, and leaves prior allocations untouched.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use almoner::adapter::solver::HiGHSSolver;
//! use almoner::adapter::store::MemoryRepository;
//! use almoner::application::optimizer::OptimizerService;
//! use almoner::config::OptimizerConfig;
//!
//! # async fn run() -> almoner::error::Result<()> {
//! let repository = Arc::new(MemoryRepository::new());
//! let service = OptimizerService::new(
//!     repository,
//!     Arc::new(HiGHSSolver::new()),
//!     OptimizerConfig::default(),
//! );
//! let outcome = service.optimize().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
