//! Repository port for domain records and the allocation sink.

use std::future::Future;

use crate::domain::{Allocation, Child, Requirement, Resource};
use crate::error::Result;

/// Record store the optimizer reads from and writes allocations through.
///
/// The optimizer treats persistence as an external collaborator: reads
/// are snapshots, and the only write is the all-or-nothing replacement of
/// the allocation set after an optimal solve. Implementations must make
/// `replace_allocations` atomic with respect to concurrent readers - a
/// failed replacement leaves the previous set intact.
pub trait AllocationRepository: Send + Sync {
    /// All children currently under care.
    fn children(&self) -> impl Future<Output = Result<Vec<Child>>> + Send;

    /// All resources with their current stock levels.
    fn resources(&self) -> impl Future<Output = Result<Vec<Resource>>> + Send;

    /// All active requirements.
    fn requirements(&self) -> impl Future<Output = Result<Vec<Requirement>>> + Send;

    /// All stored allocations, most recent first.
    fn allocations(&self) -> impl Future<Output = Result<Vec<Allocation>>> + Send;

    /// Discard every stored allocation and store the given set instead.
    ///
    /// Solve-and-replace semantics: the previous set survives unchanged
    /// if the replacement fails partway.
    fn replace_allocations(
        &self,
        allocations: Vec<Allocation>,
    ) -> impl Future<Output = Result<()>> + Send;
}
