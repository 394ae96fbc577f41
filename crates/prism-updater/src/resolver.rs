//! Member resolvers: per-type knowledge of members and indexers

use crate::accessor::{Accessor, Slot};
use crate::indexer::{parse_index, IndexKey};
use crate::path::is_valid_identifier;
use crate::type_info::TypeInfo;
use prism_core::{IndexParseReason, PrismError, Result};
use std::any::Any;
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

/// Turns member names and indexer tokens into accessors for one type.
///
/// Implement this for a custom container kind and register it with
/// [`ResolverRegistry::register`](crate::ResolverRegistry::register); the
/// path engine needs no other change.
pub trait MemberResolver: Send + Sync + 'static {
    /// The exact type this resolver handles
    fn supported_type(&self) -> TypeInfo;

    /// Resolve a named member, `None` if the type has no such member
    fn resolve_member(&self, name: &str) -> Option<Accessor> {
        let _ = name;
        None
    }

    /// Resolve the token between brackets. The default rejects indexers.
    fn resolve_indexer(&self, token: &str) -> Result<Accessor> {
        Err(PrismError::InvalidIndexer {
            type_name: self.supported_type().name().to_string(),
            token: token.to_string(),
            path: String::new(),
        })
    }

    /// Names of the members this resolver knows, sorted
    fn member_names(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Resolver for a plain struct, built from a table of member getters
pub struct StructResolver<T> {
    members: HashMap<String, (TypeInfo, Slot)>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> StructResolver<T> {
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
            _marker: PhantomData,
        }
    }

    /// Add a member of type `M`.
    ///
    /// Names containing `.`, `[`, `]` or whitespace could never be addressed
    /// by a path; they are skipped with a warning.
    pub fn member<M, G, S>(mut self, name: &str, get: G, get_mut: S) -> Self
    where
        M: Any,
        G: Fn(&T) -> &M + Send + Sync + 'static,
        S: Fn(&mut T) -> &mut M + Send + Sync + 'static,
    {
        if !is_valid_identifier(name) {
            tracing::warn!(
                member = name,
                type_name = std::any::type_name::<T>(),
                "Skipping member whose name is not a valid path identifier"
            );
            return self;
        }

        let slot = Slot::new(
            move |object| object.downcast_ref::<T>().map(|value| get(value) as &dyn Any),
            move |object| {
                object
                    .downcast_mut::<T>()
                    .map(|value| get_mut(value) as &mut dyn Any)
            },
        );
        self.members
            .insert(name.to_string(), (TypeInfo::of::<M>(), slot));
        self
    }
}

impl<T: Any> Default for StructResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Any> MemberResolver for StructResolver<T> {
    fn supported_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn resolve_member(&self, name: &str) -> Option<Accessor> {
        self.members
            .get_key_value(name)
            .map(|(name, (target, slot))| Accessor::member(name.as_str(), *target, slot.clone()))
    }

    fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Resolver for `Vec<T>`: `[index]` with a non-negative integer index.
///
/// The index is not checked against the length here; a list that is too
/// short when the accessor is applied yields `PathNotApplicable`.
pub struct ListResolver<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> ListResolver<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Any> Default for ListResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Any> MemberResolver for ListResolver<T> {
    fn supported_type(&self) -> TypeInfo {
        TypeInfo::of::<Vec<T>>()
    }

    fn resolve_indexer(&self, token: &str) -> Result<Accessor> {
        let index: usize = parse_index(token)?;
        let slot = Slot::new(
            move |object| {
                object
                    .downcast_ref::<Vec<T>>()?
                    .get(index)
                    .map(|item| item as &dyn Any)
            },
            move |object| {
                object
                    .downcast_mut::<Vec<T>>()?
                    .get_mut(index)
                    .map(|item| item as &mut dyn Any)
            },
        );
        Ok(Accessor::list_index(index, TypeInfo::of::<T>(), slot))
    }
}

/// Resolver for fixed-size arrays `[T; N]`.
///
/// The length is part of the type, so an index `>= N` is rejected while
/// resolving.
pub struct ArrayResolver<T, const N: usize> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any, const N: usize> ArrayResolver<T, N> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Any, const N: usize> Default for ArrayResolver<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Any, const N: usize> MemberResolver for ArrayResolver<T, N> {
    fn supported_type(&self) -> TypeInfo {
        TypeInfo::of::<[T; N]>()
    }

    fn resolve_indexer(&self, token: &str) -> Result<Accessor> {
        let index: usize = parse_index(token)?;
        if index >= N {
            return Err(PrismError::IndexParse {
                token: token.to_string(),
                reason: IndexParseReason::Overflow,
            });
        }
        let slot = Slot::new(
            move |object| {
                object
                    .downcast_ref::<[T; N]>()
                    .map(|array| &array[index] as &dyn Any)
            },
            move |object| {
                object
                    .downcast_mut::<[T; N]>()
                    .map(|array| &mut array[index] as &mut dyn Any)
            },
        );
        Ok(Accessor::list_index(index, TypeInfo::of::<T>(), slot))
    }
}

/// Resolver for `HashMap<K, V>`: `[key]` with the key parsed by [`IndexKey`].
///
/// A key absent from the map when the accessor is applied yields
/// `PathNotApplicable`; the accessor never inserts.
pub struct MapResolver<K, V> {
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> MapResolver<K, V>
where
    K: IndexKey + Eq + Hash + Clone + Send + Sync + 'static,
    V: Any,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for MapResolver<K, V>
where
    K: IndexKey + Eq + Hash + Clone + Send + Sync + 'static,
    V: Any,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemberResolver for MapResolver<K, V>
where
    K: IndexKey + Eq + Hash + Clone + Send + Sync + 'static,
    V: Any,
{
    fn supported_type(&self) -> TypeInfo {
        TypeInfo::of::<HashMap<K, V>>()
    }

    fn resolve_indexer(&self, token: &str) -> Result<Accessor> {
        let key: K = parse_index(token)?;
        let key_mut = key.clone();
        let slot = Slot::new(
            move |object| {
                object
                    .downcast_ref::<HashMap<K, V>>()?
                    .get(&key)
                    .map(|value| value as &dyn Any)
            },
            move |object| {
                object
                    .downcast_mut::<HashMap<K, V>>()?
                    .get_mut(&key_mut)
                    .map(|value| value as &mut dyn Any)
            },
        );
        Ok(Accessor::map_key(token, TypeInfo::of::<V>(), slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Light {
        intensity: f32,
        tags: Vec<String>,
    }

    fn light_resolver() -> StructResolver<Light> {
        StructResolver::<Light>::new()
            .member("Intensity", |l| &l.intensity, |l| &mut l.intensity)
            .member("Tags", |l| &l.tags, |l| &mut l.tags)
    }

    #[test]
    fn test_struct_member_lookup() {
        let resolver = light_resolver();
        assert!(resolver.supported_type().is::<Light>());
        assert_eq!(resolver.member_names(), vec!["Intensity", "Tags"]);

        let accessor = resolver.resolve_member("Intensity").unwrap();
        assert!(accessor.target().is::<f32>());

        let mut light = Light::default();
        *accessor
            .get_mut(&mut light)
            .unwrap()
            .downcast_mut::<f32>()
            .unwrap() = 2.5;
        assert_eq!(light.intensity, 2.5);

        assert!(resolver.resolve_member("Color").is_none());
        assert!(matches!(
            resolver.resolve_indexer("0"),
            Err(PrismError::InvalidIndexer { .. })
        ));
    }

    #[test]
    fn test_invalid_member_names_are_skipped() {
        let resolver = StructResolver::<Light>::new()
            .member("bad.name", |l| &l.intensity, |l| &mut l.intensity)
            .member("bad[0]", |l| &l.intensity, |l| &mut l.intensity)
            .member("", |l| &l.intensity, |l| &mut l.intensity);
        assert!(resolver.member_names().is_empty());
    }

    #[test]
    fn test_list_index_fails_softly_when_out_of_range() {
        let resolver = ListResolver::<String>::new();
        let accessor = resolver.resolve_indexer("1").unwrap();
        assert!(accessor.target().is::<String>());

        let short = vec!["a".to_string()];
        assert!(accessor.get(&short).is_none());

        let long = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            accessor.get(&long).unwrap().downcast_ref::<String>().unwrap(),
            "b"
        );
        assert!(matches!(
            resolver.resolve_indexer("-1"),
            Err(PrismError::IndexParse {
                reason: IndexParseReason::Negative,
                ..
            })
        ));
    }

    #[test]
    fn test_array_bounds_checked_at_resolution() {
        let resolver = ArrayResolver::<f32, 3>::new();
        let accessor = resolver.resolve_indexer("2").unwrap();
        let mut values = [1.0f32, 2.0, 3.0];
        *accessor
            .get_mut(&mut values)
            .unwrap()
            .downcast_mut::<f32>()
            .unwrap() = 9.0;
        assert_eq!(values, [1.0, 2.0, 9.0]);

        assert!(matches!(
            resolver.resolve_indexer("3"),
            Err(PrismError::IndexParse {
                reason: IndexParseReason::Overflow,
                ..
            })
        ));
    }

    #[test]
    fn test_map_key_lookup() {
        let resolver = MapResolver::<String, i32>::new();
        let accessor = resolver.resolve_indexer("hp").unwrap();
        assert_eq!(accessor.to_string(), "[hp]");

        let mut stats: HashMap<String, i32> = HashMap::new();
        assert!(accessor.get(&stats).is_none());

        stats.insert("hp".to_string(), 10);
        *accessor
            .get_mut(&mut stats)
            .unwrap()
            .downcast_mut::<i32>()
            .unwrap() = 7;
        assert_eq!(stats["hp"], 7);
        assert_eq!(stats.len(), 1);
    }
}
