//! The entity hierarchy aggregate

use crate::collection::EntityCollection;
use crate::design::EntityDesign;
use crate::report::{self, HierarchyReport};
use prism_core::{Entity, EntityId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root entity ids plus the collection of every entity design.
///
/// Field order is part of the serialized layout: the root list always comes
/// before the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityHierarchyData {
    /// Top-level entities, in insertion order
    #[serde(default)]
    pub root_entities: Vec<EntityId>,
    #[serde(default)]
    pub entities: EntityCollection,
}

impl EntityHierarchyData {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a design to the collection and append its id to the root list
    pub fn add_root(&mut self, design: EntityDesign) -> Result<()> {
        let id = design.id();
        self.entities.add(design)?;
        self.root_entities.push(id);
        Ok(())
    }

    /// Add a bare entity as a root
    pub fn add_root_entity(&mut self, entity: Entity) -> Result<()> {
        self.add_root(EntityDesign::new(entity))
    }

    pub fn is_root(&self, id: EntityId) -> bool {
        self.root_entities.contains(&id)
    }

    /// Check every root and child reference
    pub fn validate(&self) -> HierarchyReport {
        report::validate(self)
    }

    /// Write the integrity dump and return whether the hierarchy is valid
    pub fn dump_to<W: fmt::Write>(&self, writer: &mut W) -> std::result::Result<bool, fmt::Error> {
        let report = self.validate();
        write!(writer, "{}", report)?;
        Ok(report.is_valid())
    }
}
