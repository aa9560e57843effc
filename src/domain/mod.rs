//! Domain records and value types.
//!
//! Plain data describing the population and stock the optimizer works on,
//! plus the eligibility rule and the linear-constraint building blocks of
//! the allocation model. Records are owned by the backing store; the
//! optimizer borrows read access and emits new [`allocation::Allocation`]
//! records on success.

pub mod allocation;
pub mod child;
pub mod constraint;
pub mod eligibility;
pub mod id;
pub mod requirement;
pub mod resource;

pub use allocation::Allocation;
pub use child::{Child, Gender};
pub use constraint::{Constraint, ConstraintSense, VariableBounds};
pub use eligibility::{eligible_children, is_eligible};
pub use id::{ChildId, ResourceId};
pub use requirement::{Frequency, Requirement};
pub use resource::{GenderRule, Resource, ResourceKind};
