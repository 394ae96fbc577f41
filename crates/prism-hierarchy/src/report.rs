//! Hierarchy integrity report

use crate::hierarchy::EntityHierarchyData;
use prism_core::EntityId;
use std::fmt;

const SECTION_RULE: &str = "***************";
const HEADER_RULE: &str = "===============";

/// A dangling reference found while validating a hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// A root id with no entity in the collection
    MissingRoot { id: EntityId },
    /// A child link whose target is not in the collection
    MissingChild { parent: EntityId, child: EntityId },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::MissingRoot { id } => {
                write!(f, "root entity {} not found in [Entities]", id)
            }
            IntegrityViolation::MissingChild { parent, child } => {
                write!(f, "child {} of entity {} not found in [Entities]", child, parent)
            }
        }
    }
}

/// One line of the roots section
#[derive(Debug, Clone)]
pub struct RootEntry {
    pub id: EntityId,
    /// The entity's description, or `None` when the id is dangling
    pub description: Option<String>,
}

/// One child link of an entity
#[derive(Debug, Clone)]
pub struct ChildEntry {
    pub id: EntityId,
    pub name: String,
    pub found: bool,
}

/// One entity of the collection with its child links
#[derive(Debug, Clone)]
pub struct EntityEntry {
    pub id: EntityId,
    pub description: String,
    pub base_id: Option<EntityId>,
    pub base_part_instance_id: Option<EntityId>,
    pub children: Vec<ChildEntry>,
}

/// Result of checking a hierarchy's references.
///
/// `Display` renders the human-readable dump.
#[derive(Debug, Clone, Default)]
pub struct HierarchyReport {
    pub roots: Vec<RootEntry>,
    pub entities: Vec<EntityEntry>,
    pub violations: Vec<IntegrityViolation>,
}

impl HierarchyReport {
    /// True when every root and child reference resolves
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn missing_root_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| matches!(v, IntegrityViolation::MissingRoot { .. }))
            .count()
    }

    pub fn missing_child_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| matches!(v, IntegrityViolation::MissingChild { .. }))
            .count()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return format!(
                "Hierarchy is valid: {} root(s), {} entities.",
                self.roots.len(),
                self.entities.len()
            );
        }

        format!(
            "{} violation(s): {} missing root(s), {} missing child(ren)",
            self.violations.len(),
            self.missing_root_count(),
            self.missing_child_count(),
        )
    }
}

impl fmt::Display for HierarchyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SECTION_RULE)?;
        writeln!(f, "RootEntities [{}]", self.roots.len())?;
        writeln!(f, "{}", HEADER_RULE)?;
        for root in &self.roots {
            match &root.description {
                Some(description) => writeln!(f, "{} => {}", root.id, description)?,
                None => writeln!(f, "{} => ERROR - Entity not found in [Entities]", root.id)?,
            }
        }

        writeln!(f, "{}", SECTION_RULE)?;
        writeln!(f, "Entities [{}]", self.entities.len())?;
        writeln!(f, "{}", HEADER_RULE)?;
        for entry in &self.entities {
            write!(f, "{} => {}", entry.id, entry.description)?;
            if let Some(base_id) = entry.base_id {
                write!(f, " Base: {}", base_id)?;
            }
            if let Some(part_id) = entry.base_part_instance_id {
                write!(f, " BasePartInstanceId: {}", part_id)?;
            }
            writeln!(f)?;

            for child in &entry.children {
                write!(f, "  - {} => {}", child.id, child.name)?;
                if !child.found {
                    write!(f, " <= ERROR, Entity not found in [Entities]")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Check every root id and child link of a hierarchy against its collection.
///
/// Never mutates and never fails; dangling references become violations.
pub fn validate(hierarchy: &EntityHierarchyData) -> HierarchyReport {
    let mut report = HierarchyReport::default();

    for &id in &hierarchy.root_entities {
        let description = hierarchy.entities.get(id).map(|d| d.entity.to_string());
        if description.is_none() {
            report.violations.push(IntegrityViolation::MissingRoot { id });
        }
        report.roots.push(RootEntry { id, description });
    }

    for design in &hierarchy.entities {
        let parent = design.id();
        let children = design
            .entity
            .children
            .iter()
            .map(|child| {
                let found = hierarchy.entities.contains_key(child.id);
                if !found {
                    report.violations.push(IntegrityViolation::MissingChild {
                        parent,
                        child: child.id,
                    });
                }
                ChildEntry {
                    id: child.id,
                    name: child.name.clone(),
                    found,
                }
            })
            .collect();

        report.entities.push(EntityEntry {
            id: parent,
            description: design.entity.to_string(),
            base_id: design.base_id,
            base_part_instance_id: design.base_part_instance_id,
            children,
        });
    }

    tracing::debug!(
        roots = report.roots.len(),
        entities = report.entities.len(),
        violations = report.violations.len(),
        "Validated entity hierarchy"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::EntityDesign;
    use prism_core::{Entity, EntityReference};

    fn id(n: u128) -> EntityId {
        EntityId::from_u128(n)
    }

    #[test]
    fn test_consistent_hierarchy_is_valid() {
        let child = Entity::with_id(id(2), "wheel");
        let parent = Entity::with_id(id(1), "car").with_child(child.reference());

        let mut data = EntityHierarchyData::new();
        data.root_entities.push(parent.id);
        data.entities.add_entities(vec![parent, child]).unwrap();

        let report = validate(&data);
        assert!(report.is_valid());
        assert_eq!(report.roots.len(), 1);
        assert_eq!(report.entities.len(), 2);
        assert!(report.entities[0].children[0].found);
        assert_eq!(report.summary(), "Hierarchy is valid: 1 root(s), 2 entities.");
    }

    #[test]
    fn test_missing_root_is_named() {
        let mut data = EntityHierarchyData::new();
        data.root_entities = vec![id(0xA), id(0xB)];
        data.entities.add_entity(Entity::with_id(id(0xA), "A")).unwrap();

        let report = validate(&data);
        assert!(!report.is_valid());
        assert_eq!(
            report.violations,
            vec![IntegrityViolation::MissingRoot { id: id(0xB) }]
        );
        assert!(report.roots[0].description.is_some());
        assert!(report.roots[1].description.is_none());

        let dump = report.to_string();
        assert!(dump.contains(&format!(
            "{} => ERROR - Entity not found in [Entities]",
            id(0xB)
        )));
        assert!(report.summary().starts_with("1 violation(s)"));
    }

    #[test]
    fn test_missing_child_keeps_name() {
        let parent = Entity::with_id(id(1), "door")
            .with_child(EntityReference::new(id(9), "handle"));
        let mut data = EntityHierarchyData::new();
        data.entities.add_entity(parent).unwrap();

        let report = validate(&data);
        assert_eq!(
            report.violations,
            vec![IntegrityViolation::MissingChild {
                parent: id(1),
                child: id(9)
            }]
        );
        assert_eq!(report.missing_child_count(), 1);
        assert_eq!(report.missing_root_count(), 0);
        assert!(!report.entities[0].children[0].found);
    }

    #[test]
    fn test_dump_format() {
        let child = Entity::with_id(id(2), "B");
        let parent = Entity::with_id(id(1), "A")
            .with_child(child.reference())
            .with_child(EntityReference::new(id(4), "Ghost"));

        let mut data = EntityHierarchyData::new();
        data.root_entities = vec![id(1), id(3)];
        data.entities.add_entity(parent).unwrap();
        data.entities
            .add(
                EntityDesign::new(child)
                    .with_base_id(id(7))
                    .with_base_part_instance_id(id(8)),
            )
            .unwrap();

        let expected = format!(
            "***************\n\
             RootEntities [2]\n\
             ===============\n\
             {a} => Entity A\n\
             {c} => ERROR - Entity not found in [Entities]\n\
             ***************\n\
             Entities [2]\n\
             ===============\n\
             {a} => Entity A\n  \
             - {b} => B\n  \
             - {d} => Ghost <= ERROR, Entity not found in [Entities]\n\
             {b} => Entity B Base: {base} BasePartInstanceId: {part}\n",
            a = id(1),
            b = id(2),
            c = id(3),
            d = id(4),
            base = id(7),
            part = id(8),
        );
        assert_eq!(validate(&data).to_string(), expected);
    }

    #[test]
    fn test_empty_hierarchy_dump() {
        let report = validate(&EntityHierarchyData::new());
        assert!(report.is_valid());
        assert_eq!(
            report.to_string(),
            "***************\nRootEntities [0]\n===============\n\
             ***************\nEntities [0]\n===============\n"
        );
    }
}
