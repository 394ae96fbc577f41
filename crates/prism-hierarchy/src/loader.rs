//! Hierarchy loading from TOML files

use crate::hierarchy::EntityHierarchyData;
use prism_core::Result;
use std::fs;
use std::path::Path;

/// Load a hierarchy from a TOML file
pub fn load_hierarchy<P: AsRef<Path>>(path: P) -> Result<EntityHierarchyData> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let data = load_hierarchy_string(&content)?;
    tracing::info!(path = %path.display(), entities = data.entities.len(), "Loaded hierarchy");
    Ok(data)
}

/// Load a hierarchy from a TOML string.
///
/// Dangling references are accepted; duplicate entity ids are not.
pub fn load_hierarchy_string(content: &str) -> Result<EntityHierarchyData> {
    let data: EntityHierarchyData = toml::from_str(content)?;
    tracing::debug!(
        roots = data.root_entities.len(),
        entities = data.entities.len(),
        "Parsed hierarchy"
    );
    Ok(data)
}
