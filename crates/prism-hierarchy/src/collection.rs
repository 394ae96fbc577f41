//! Entity collection keyed and sorted by entity id

use crate::design::EntityDesign;
use prism_core::{Entity, EntityId, PrismError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Index;

/// Entity designs sorted by id, with lookup by id and by position.
///
/// Iteration is in ascending id order, not insertion order. Ids are unique:
/// adding an id that is already present fails and leaves the collection
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCollection {
    items: Vec<EntityDesign>,
}

impl EntityCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&self, id: EntityId) -> std::result::Result<usize, usize> {
        self.items.binary_search_by(|design| design.id().cmp(&id))
    }

    /// Add a design, keeping the collection sorted
    pub fn add(&mut self, design: EntityDesign) -> Result<()> {
        let id = design.id();
        match self.search(id) {
            Ok(_) => Err(PrismError::DuplicateKey(id)),
            Err(position) => {
                self.items.insert(position, design);
                Ok(())
            }
        }
    }

    /// Wrap a bare entity in a design record and add it
    pub fn add_entity(&mut self, entity: Entity) -> Result<()> {
        self.add(EntityDesign::new(entity))
    }

    /// Add designs in order.
    ///
    /// Best effort, not transactional: designs before the first failure stay
    /// in the collection, the rest are not attempted.
    pub fn add_range<I>(&mut self, designs: I) -> Result<()>
    where
        I: IntoIterator<Item = EntityDesign>,
    {
        for design in designs {
            self.add(design)?;
        }
        Ok(())
    }

    /// Add bare entities in order, with the same semantics as [`add_range`](Self::add_range)
    pub fn add_entities<I>(&mut self, entities: I) -> Result<()>
    where
        I: IntoIterator<Item = Entity>,
    {
        self.add_range(entities.into_iter().map(EntityDesign::new))
    }

    pub fn contains_key(&self, id: EntityId) -> bool {
        self.search(id).is_ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityDesign> {
        self.search(id).ok().map(|i| &self.items[i])
    }

    /// Position of an id in iteration order
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.search(id).ok()
    }

    pub fn get_index(&self, index: usize) -> Option<&EntityDesign> {
        self.items.get(index)
    }

    /// Mutate a design in place.
    ///
    /// If `f` changes the entity's id the design is moved to its new sorted
    /// position; when the new id is already taken the old id is restored
    /// and `DuplicateKey` is returned.
    pub fn modify<T, F>(&mut self, id: EntityId, f: F) -> Result<T>
    where
        F: FnOnce(&mut EntityDesign) -> T,
    {
        let index = self
            .search(id)
            .map_err(|_| PrismError::EntityNotFound(id.to_string()))?;
        let output = f(&mut self.items[index]);

        let new_id = self.items[index].id();
        if new_id != id {
            let mut design = self.items.remove(index);
            match self.search(new_id) {
                Err(position) => self.items.insert(position, design),
                Ok(_) => {
                    design.entity.id = id;
                    self.items.insert(index, design);
                    return Err(PrismError::DuplicateKey(new_id));
                }
            }
        }
        Ok(output)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<EntityDesign> {
        self.search(id).ok().map(|i| self.items.remove(i))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityDesign> {
        self.items.iter()
    }

    /// All ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.items.iter().map(EntityDesign::id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Index<usize> for EntityCollection {
    type Output = EntityDesign;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a EntityDesign;
    type IntoIter = std::slice::Iter<'a, EntityDesign>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for EntityCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'de> Deserialize<'de> for EntityCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let designs = Vec::<EntityDesign>::deserialize(deserializer)?;
        let mut collection = EntityCollection::new();
        for design in designs {
            collection.add(design).map_err(D::Error::custom)?;
        }
        Ok(collection)
    }
}
