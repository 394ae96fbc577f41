//! Prism Updater - Property path resolution
//!
//! A property path such as `Transform.Position.Y` or `Children[2].Name` is
//! resolved once against a root type into a [`PropertyAccessor`]: a chain of
//! single-step [`Accessor`]s that can then read and write the targeted value
//! on any number of instances without parsing the path again.
//!
//! Resolution is driven by a [`ResolverRegistry`] mapping each runtime type
//! to the [`MemberResolver`] that knows its members and indexers. Supporting
//! a new container kind means registering one more resolver.
//!
//! ```
//! use prism_core::{Entity, EntityReference, EntityId};
//! use prism_updater::{PathResolver, ResolverRegistry};
//!
//! let registry = ResolverRegistry::with_builtins();
//! let resolver = PathResolver::new(&registry);
//! let name = resolver
//!     .resolve_typed::<Entity, String>("Children[0].Name")
//!     .unwrap();
//!
//! let mut entity = Entity::new("root")
//!     .with_child(EntityReference::new(EntityId::new(), "arm"));
//! name.set(&mut entity, "leg".to_string()).unwrap();
//! assert_eq!(name.get(&entity).unwrap(), "leg");
//! ```

mod accessor;
mod builtin;
mod engine;
mod indexer;
mod path;
mod registry;
mod resolver;
mod type_info;

pub use accessor::{Accessor, PropertyAccessor, Slot, TypedAccessor};
pub use builtin::register_builtins;
pub use engine::PathResolver;
pub use indexer::{parse_index, IndexKey};
pub use path::{parse_path, PathSegment};
pub use registry::ResolverRegistry;
pub use resolver::{ArrayResolver, ListResolver, MapResolver, MemberResolver, StructResolver};
pub use type_info::TypeInfo;
