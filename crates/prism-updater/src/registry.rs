//! Resolver registry keyed by runtime type

use crate::builtin::register_builtins;
use crate::indexer::IndexKey;
use crate::resolver::{ArrayResolver, ListResolver, MapResolver, MemberResolver};
use crate::type_info::TypeInfo;
use prism_core::{PrismError, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;

/// The process-wide registry, frozen once installed
static GLOBAL_REGISTRY: OnceLock<ResolverRegistry> = OnceLock::new();

/// Registry that maps each runtime type to its [`MemberResolver`].
///
/// Build it mutably at startup, then either pass it by reference to a
/// [`PathResolver`](crate::PathResolver) or freeze it process-wide with
/// [`install`](Self::install). Once installed it is read-only, so concurrent
/// resolution needs no locking.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<TypeId, Box<dyn MemberResolver>>,
}

impl ResolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with resolvers for the prism-core types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register a resolver, replacing any resolver for the same type
    pub fn register<R: MemberResolver>(&mut self, resolver: R) -> &mut Self {
        let ty = resolver.supported_type();
        if self
            .resolvers
            .insert(ty.id(), Box::new(resolver))
            .is_some()
        {
            tracing::warn!(type_name = ty.name(), "Replacing existing member resolver");
        } else {
            tracing::debug!(type_name = ty.name(), "Registered member resolver");
        }
        self
    }

    /// Register indexing support for `Vec<T>`
    pub fn register_list<T: Any>(&mut self) -> &mut Self {
        self.register(ListResolver::<T>::new())
    }

    /// Register indexing support for `[T; N]`
    pub fn register_array<T: Any, const N: usize>(&mut self) -> &mut Self {
        self.register(ArrayResolver::<T, N>::new())
    }

    /// Register key lookup for `HashMap<K, V>`
    pub fn register_map<K, V>(&mut self) -> &mut Self
    where
        K: IndexKey + Eq + Hash + Clone + Send + Sync + 'static,
        V: Any,
    {
        self.register(MapResolver::<K, V>::new())
    }

    /// Get the resolver for a type
    pub fn resolver_for(&self, ty: TypeInfo) -> Result<&dyn MemberResolver> {
        self.resolvers
            .get(&ty.id())
            .map(|resolver| resolver.as_ref())
            .ok_or_else(|| PrismError::UnsupportedType {
                type_name: ty.name().to_string(),
                path: String::new(),
            })
    }

    pub fn contains(&self, ty: TypeInfo) -> bool {
        self.resolvers.contains_key(&ty.id())
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// List the names of all registered types, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .resolvers
            .values()
            .map(|r| r.supported_type().name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Freeze this registry as the process-wide registry.
    ///
    /// Fails if one was already installed; the earlier registry stays in
    /// place and this one is dropped.
    pub fn install(self) -> Result<&'static ResolverRegistry> {
        let mut installed = false;
        let registry = GLOBAL_REGISTRY.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            tracing::debug!(resolvers = registry.len(), "Installed global resolver registry");
            Ok(registry)
        } else {
            Err(PrismError::RegistryAlreadyInstalled)
        }
    }

    /// The process-wide registry, if one was installed
    pub fn global() -> Option<&'static ResolverRegistry> {
        GLOBAL_REGISTRY.get()
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
