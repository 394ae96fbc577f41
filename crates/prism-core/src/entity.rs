//! The minimal entity model the hierarchy and updater operate on

use crate::id::EntityId;
use crate::types::Transform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A link from a parent entity to one of its children.
///
/// The child's name travels with the id so a dangling link can still be
/// described when the child is missing from its collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    pub id: EntityId,
    pub name: String,
}

impl EntityReference {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An entity: stable id, display name, spatial transform and child links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The stable entity ID
    pub id: EntityId,
    /// Human-readable name
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    /// Children attached under this entity's transform
    #[serde(default)]
    pub children: Vec<EntityReference>,
}

impl Entity {
    /// Create an entity with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(EntityId::new(), name)
    }

    pub fn with_id(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: EntityReference) -> Self {
        self.children.push(child);
        self
    }

    /// A reference to this entity, suitable as a child link
    pub fn reference(&self) -> EntityReference {
        EntityReference::new(self.id, self.name.clone())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_reference() {
        let child = Entity::new("wheel");
        let parent = Entity::new("car").with_child(child.reference());

        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].id, child.id);
        assert_eq!(parent.children[0].name, "wheel");
        assert_eq!(parent.to_string(), "Entity car");
    }

    #[test]
    fn test_deserialize_defaults() {
        let toml_str = r#"
id = "00000000-0000-0000-0000-000000000007"
name = "lamp"
"#;
        let entity: Entity = toml::from_str(toml_str).unwrap();
        assert_eq!(entity.id, EntityId::from_u128(7));
        assert_eq!(entity.transform, Transform::default());
        assert!(entity.children.is_empty());
    }
}
