//! Path resolution engine

use crate::accessor::{PropertyAccessor, TypedAccessor};
use crate::path::parse_path;
use crate::registry::ResolverRegistry;
use crate::type_info::TypeInfo;
use prism_core::{PrismError, Result};
use std::any::Any;

/// Resolves property paths against a root type using a registry.
///
/// Resolution looks only at types, never at values: the resulting accessor
/// can be cached and applied to every instance with the same shape.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'r> {
    registry: &'r ResolverRegistry,
}

impl<'r> PathResolver<'r> {
    pub fn new(registry: &'r ResolverRegistry) -> Self {
        Self { registry }
    }

    /// A resolver over the installed global registry, if any
    pub fn global() -> Option<PathResolver<'static>> {
        ResolverRegistry::global().map(PathResolver::new)
    }

    pub fn registry(&self) -> &'r ResolverRegistry {
        self.registry
    }

    /// Resolve `path` starting from `root`.
    ///
    /// For each segment the member is resolved on the current type, then the
    /// optional indexer on the member's type. Errors carry the part of the
    /// path consumed before the failing segment.
    pub fn resolve(&self, root: TypeInfo, path: &str) -> Result<PropertyAccessor> {
        let segments = parse_path(path)?;
        let mut current = root;
        let mut consumed = String::new();
        let mut steps = Vec::with_capacity(segments.len());

        for segment in &segments {
            let resolver = self
                .registry
                .resolver_for(current)
                .map_err(|err| err.with_path(&consumed))?;
            let member = resolver.resolve_member(&segment.member).ok_or_else(|| {
                PrismError::UnknownMember {
                    member: segment.member.clone(),
                    type_name: current.name().to_string(),
                    path: consumed.clone(),
                }
            })?;

            if !consumed.is_empty() {
                consumed.push('.');
            }
            consumed.push_str(&segment.member);
            current = member.target();
            steps.push(member);

            let Some(token) = &segment.indexer else {
                continue;
            };

            // A type without a resolver cannot be indexed
            let resolver = self.registry.resolver_for(current).map_err(|_| {
                PrismError::InvalidIndexer {
                    type_name: current.name().to_string(),
                    token: token.clone(),
                    path: consumed.clone(),
                }
            })?;
            let indexer = resolver
                .resolve_indexer(token)
                .map_err(|err| err.with_path(&consumed))?;

            consumed.push('[');
            consumed.push_str(token);
            consumed.push(']');
            current = indexer.target();
            steps.push(indexer);
        }

        tracing::debug!(
            path = %consumed,
            root = root.name(),
            target = current.name(),
            "Resolved property path"
        );
        Ok(PropertyAccessor::new(consumed, root, current, steps))
    }

    /// Resolve `path` against the root type `R`
    pub fn resolve_for<R: Any>(&self, path: &str) -> Result<PropertyAccessor> {
        self.resolve(TypeInfo::of::<R>(), path)
    }

    /// Resolve `path` against `R` and check that it lands on a `V`
    pub fn resolve_typed<R: Any, V: Any>(&self, path: &str) -> Result<TypedAccessor<R, V>> {
        self.resolve_for::<R>(path)?.typed()
    }
}
