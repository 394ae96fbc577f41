//! Design-time data attached to an entity

use prism_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Associates an [`Entity`] with design-time data.
///
/// The identifier is always the wrapped entity's id; it is not stored a
/// second time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDesign {
    /// Folder the entity is grouped under, relative to its parent's folder.
    /// Purely organisational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    /// Id of the base entity when instantiated from a prefab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<EntityId>,
    /// Id of the prefab instance (part group) this entity belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_part_instance_id: Option<EntityId>,
    pub entity: Entity,
}

impl EntityDesign {
    pub fn new(entity: Entity) -> Self {
        Self {
            folder: None,
            base_id: None,
            base_part_instance_id: None,
            entity,
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Mark this entity as instantiated from the prefab entity `base_id`
    pub fn with_base_id(mut self, base_id: EntityId) -> Self {
        self.base_id = Some(base_id);
        self
    }

    pub fn with_base_part_instance_id(mut self, base_part_instance_id: EntityId) -> Self {
        self.base_part_instance_id = Some(base_part_instance_id);
        self
    }

    pub fn is_prefab_instance(&self) -> bool {
        self.base_id.is_some()
    }
}

impl From<Entity> for EntityDesign {
    fn from(entity: Entity) -> Self {
        Self::new(entity)
    }
}

impl fmt::Display for EntityDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityDesign {}", self.entity.name)
    }
}
