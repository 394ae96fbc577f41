//! Prism Core - Foundational types shared by the Prism crates
//!
//! This crate provides the types every other Prism crate depends on:
//! - `EntityId` - Stable UUID-based entity identifiers
//! - `Entity`, `EntityReference` - The minimal entity model and parent/child links
//! - `Transform`, `Vec3` - Spatial types
//! - Error types and Result alias

mod entity;
mod error;
mod id;
mod types;

pub use entity::{Entity, EntityReference};
pub use error::{IndexParseReason, PrismError, Result};
pub use id::EntityId;
pub use types::{Transform, Vec3};
