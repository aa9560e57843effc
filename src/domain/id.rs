//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Child identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChildId(String);

impl ChildId {
    /// Create a new ChildId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the child ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChildId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ChildId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Resource identifier - newtype for type safety.
///
/// In the store-backed flow this carries a persisted key; in the
/// transient-input flow resources have no numeric identity and the ID is
/// the resource name, which is what requirement descriptors match on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new ResourceId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the resource ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_id_new_and_as_str() {
        let id = ChildId::new("c-1");
        assert_eq!(id.as_str(), "c-1");
    }

    #[test]
    fn child_id_display() {
        let id = ChildId::new("amina");
        assert_eq!(format!("{}", id), "amina");
    }

    #[test]
    fn resource_id_from_str() {
        let id = ResourceId::from("rice");
        assert_eq!(id.as_str(), "rice");
    }

    #[test]
    fn resource_id_from_string() {
        let id = ResourceId::from("blankets".to_string());
        assert_eq!(id.as_str(), "blankets");
    }
}
