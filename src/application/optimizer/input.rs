//! Transient allocation input, matched by name rather than stored identity.
//!
//! One optimization request can carry its whole world: children, resource
//! descriptors, and requirement descriptors referencing resources by name.
//! Everything is validated before any model construction; a malformed
//! descriptor never produces a partial model.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{
    Child, ChildId, Frequency, Gender, GenderRule, Requirement, Resource, ResourceKind,
};
use crate::error::{Result, ValidationError};

/// A batch of allocation input as submitted with one request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllocationInput {
    /// Children in the population.
    #[serde(default)]
    pub children: Vec<ChildInput>,
    /// Available resources.
    #[serde(default)]
    pub resources: Vec<ResourceInput>,
    /// Minimum entitlements, referencing resources by name.
    #[serde(default)]
    pub requirements: Vec<RequirementInput>,
}

/// One child descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildInput {
    /// Stable identifier; defaults to the name when omitted.
    pub id: Option<String>,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub admission_date: NaiveDate,
}

/// One resource descriptor with no persisted identity.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub quantity: Decimal,
    pub unit: String,
    pub cost_per_unit: Decimal,
    #[serde(default = "default_gender_rule")]
    pub gender_specific: GenderRule,
}

const fn default_gender_rule() -> GenderRule {
    GenderRule::All
}

/// One requirement descriptor, matched to a resource by name.
#[derive(Debug, Clone, Deserialize)]
pub struct RequirementInput {
    pub resource: String,
    pub quantity_per_child: Decimal,
    pub frequency: Frequency,
}

/// Input that passed validation, converted to domain records.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub children: Vec<Child>,
    pub resources: Vec<Resource>,
    pub requirements: Vec<Requirement>,
}

impl AllocationInput {
    /// Load and parse input from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ValidationError::ReadFile)?;
        let input: Self = toml::from_str(&content).map_err(ValidationError::Parse)?;
        Ok(input)
    }

    /// Validate every descriptor and convert to domain records.
    ///
    /// Checks non-negative quantities and costs, unique resource names,
    /// unique child identifiers, and that every requirement references a
    /// known resource. An empty batch is valid: zero children or zero
    /// resources is a trivial case, not an error.
    pub fn validate(self) -> Result<ValidatedInput> {
        let mut child_ids: HashSet<String> = HashSet::new();
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            if child.name.trim().is_empty() {
                return Err(ValidationError::MissingField { field: "child.name" }.into());
            }
            let id = child.id.unwrap_or_else(|| child.name.clone());
            if !child_ids.insert(id.clone()) {
                return Err(ValidationError::InvalidValue {
                    field: "child.id".into(),
                    reason: format!("duplicate child identifier '{id}'"),
                }
                .into());
            }
            children.push(Child::new(
                ChildId::new(id),
                child.name,
                child.age,
                child.gender,
                child.admission_date,
            ));
        }

        let mut names: HashSet<String> = HashSet::new();
        let mut resources = Vec::with_capacity(self.resources.len());
        for resource in self.resources {
            if resource.name.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    field: "resource.name",
                }
                .into());
            }
            if !names.insert(resource.name.clone()) {
                return Err(ValidationError::DuplicateResource {
                    name: resource.name,
                }
                .into());
            }
            if resource.quantity < Decimal::ZERO {
                return Err(ValidationError::InvalidValue {
                    field: format!("resource.{}.quantity", resource.name),
                    reason: "must be non-negative".into(),
                }
                .into());
            }
            if resource.cost_per_unit < Decimal::ZERO {
                return Err(ValidationError::InvalidValue {
                    field: format!("resource.{}.cost_per_unit", resource.name),
                    reason: "must be non-negative".into(),
                }
                .into());
            }
            resources.push(Resource::new(
                resource.name,
                resource.kind,
                resource.quantity,
                resource.unit,
                resource.cost_per_unit,
                resource.gender_specific,
            ));
        }

        let mut requirements = Vec::with_capacity(self.requirements.len());
        for requirement in self.requirements {
            if !names.contains(&requirement.resource) {
                return Err(ValidationError::UnknownResource {
                    name: requirement.resource,
                }
                .into());
            }
            if requirement.quantity_per_child < Decimal::ZERO {
                return Err(ValidationError::InvalidValue {
                    field: format!("requirement.{}.quantity_per_child", requirement.resource),
                    reason: "must be non-negative".into(),
                }
                .into());
            }
            requirements.push(Requirement::new(
                requirement.resource,
                requirement.quantity_per_child,
                requirement.frequency,
            ));
        }

        Ok(ValidatedInput {
            children,
            resources,
            requirements,
        })
    }
}
