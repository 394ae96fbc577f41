//! Hierarchy saving to TOML files

use crate::hierarchy::EntityHierarchyData;
use prism_core::Result;
use std::fs;
use std::path::Path;

/// Save a hierarchy to a TOML file
pub fn save_hierarchy<P: AsRef<Path>>(path: P, data: &EntityHierarchyData) -> Result<()> {
    let path = path.as_ref();
    let content = save_hierarchy_string(data)?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), entities = data.entities.len(), "Saved hierarchy");
    Ok(())
}

/// Save a hierarchy to a TOML string
pub fn save_hierarchy_string(data: &EntityHierarchyData) -> Result<String> {
    let content = toml::to_string_pretty(data)?;
    Ok(content)
}
