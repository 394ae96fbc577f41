//! Prism Hierarchy - Design-time entity hierarchies
//!
//! An [`EntityHierarchyData`] pairs an ordered list of root entity ids with
//! an [`EntityCollection`] of [`EntityDesign`] records sorted by id. Links
//! between entities are not forced to be consistent; [`validate`] reports
//! every dangling root or child reference instead of failing, so partially
//! broken hierarchies can still be loaded and repaired.

mod collection;
mod design;
mod hierarchy;
mod loader;
mod report;
mod saver;

pub use collection::EntityCollection;
pub use design::EntityDesign;
pub use hierarchy::EntityHierarchyData;
pub use loader::{load_hierarchy, load_hierarchy_string};
pub use report::{validate, ChildEntry, EntityEntry, HierarchyReport, IntegrityViolation, RootEntry};
pub use saver::{save_hierarchy, save_hierarchy_string};
