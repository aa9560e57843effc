//! In-memory repository, used by the CLI's transient flow and by tests.
//!
//! Holds a snapshot of domain records behind a `parking_lot::RwLock`.
//! `replace_allocations` swaps the whole allocation vector in one write
//! section, so readers never observe a half-replaced set.

use parking_lot::RwLock;

use crate::domain::{Allocation, Child, Requirement, Resource};
use crate::error::Result;
use crate::port::AllocationRepository;

/// Thread-safe in-memory record store.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Records>,
}

#[derive(Debug, Default)]
struct Records {
    children: Vec<Child>,
    resources: Vec<Resource>,
    requirements: Vec<Requirement>,
    allocations: Vec<Allocation>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with domain records.
    #[must_use]
    pub fn seeded(
        children: Vec<Child>,
        resources: Vec<Resource>,
        requirements: Vec<Requirement>,
    ) -> Self {
        Self {
            inner: RwLock::new(Records {
                children,
                resources,
                requirements,
                allocations: Vec::new(),
            }),
        }
    }

    /// Add a child record.
    pub fn add_child(&self, child: Child) {
        self.inner.write().children.push(child);
    }

    /// Add a resource record.
    pub fn add_resource(&self, resource: Resource) {
        self.inner.write().resources.push(resource);
    }

    /// Add a requirement record.
    pub fn add_requirement(&self, requirement: Requirement) {
        self.inner.write().requirements.push(requirement);
    }

    /// Record a donation against a named resource, increasing its stock.
    /// Returns false when the resource is unknown.
    pub fn record_donation(&self, name: &str, quantity: rust_decimal::Decimal) -> bool {
        let mut records = self.inner.write();
        match records.resources.iter_mut().find(|r| r.name == name) {
            Some(resource) => {
                resource.receive_donation(quantity);
                true
            }
            None => false,
        }
    }
}

impl AllocationRepository for MemoryRepository {
    async fn children(&self) -> Result<Vec<Child>> {
        Ok(self.inner.read().children.clone())
    }

    async fn resources(&self) -> Result<Vec<Resource>> {
        Ok(self.inner.read().resources.clone())
    }

    async fn requirements(&self) -> Result<Vec<Requirement>> {
        Ok(self.inner.read().requirements.clone())
    }

    async fn allocations(&self) -> Result<Vec<Allocation>> {
        let mut allocations = self.inner.read().allocations.clone();
        allocations.sort_by(|a, b| b.date_allocated.cmp(&a.date_allocated));
        Ok(allocations)
    }

    async fn replace_allocations(&self, allocations: Vec<Allocation>) -> Result<()> {
        self.inner.write().allocations = allocations;
        Ok(())
    }
}
