//! Single-step accessors and the resolved accessor chain

use crate::type_info::TypeInfo;
use prism_core::{PrismError, Result};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type GetFn = Arc<dyn Fn(&dyn Any) -> Option<&dyn Any> + Send + Sync>;
type GetMutFn = Arc<dyn Fn(&mut dyn Any) -> Option<&mut dyn Any> + Send + Sync>;

/// Type-erased read and write access to one storage location.
///
/// Both functions return `None` when the object is not of the expected type
/// or when the location does not exist in it (index past the end, missing
/// key). They never panic.
#[derive(Clone)]
pub struct Slot {
    get: GetFn,
    get_mut: GetMutFn,
}

impl Slot {
    pub fn new<G, M>(get: G, get_mut: M) -> Self
    where
        G: Fn(&dyn Any) -> Option<&dyn Any> + Send + Sync + 'static,
        M: Fn(&mut dyn Any) -> Option<&mut dyn Any> + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            get_mut: Arc::new(get_mut),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Slot")
    }
}

/// One resolved step of a property path
#[derive(Clone, Debug)]
pub enum Accessor {
    /// A named member of an object, e.g. `Transform`
    Member {
        name: Arc<str>,
        target: TypeInfo,
        slot: Slot,
    },
    /// A position in a sequence, e.g. `[2]`
    ListIndex {
        index: usize,
        target: TypeInfo,
        slot: Slot,
    },
    /// A key of a mapping, e.g. `[wheel]`
    MapKey {
        key: String,
        target: TypeInfo,
        slot: Slot,
    },
}

impl Accessor {
    pub fn member(name: impl Into<Arc<str>>, target: TypeInfo, slot: Slot) -> Self {
        Accessor::Member {
            name: name.into(),
            target,
            slot,
        }
    }

    pub fn list_index(index: usize, target: TypeInfo, slot: Slot) -> Self {
        Accessor::ListIndex {
            index,
            target,
            slot,
        }
    }

    pub fn map_key(key: impl Into<String>, target: TypeInfo, slot: Slot) -> Self {
        Accessor::MapKey {
            key: key.into(),
            target,
            slot,
        }
    }

    /// The type of the value this step lands on
    pub fn target(&self) -> TypeInfo {
        match self {
            Accessor::Member { target, .. }
            | Accessor::ListIndex { target, .. }
            | Accessor::MapKey { target, .. } => *target,
        }
    }

    fn slot(&self) -> &Slot {
        match self {
            Accessor::Member { slot, .. }
            | Accessor::ListIndex { slot, .. }
            | Accessor::MapKey { slot, .. } => slot,
        }
    }

    pub fn get<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.slot().get)(object)
    }

    pub fn get_mut<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.slot().get_mut)(object)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Member { name, .. } => f.write_str(name),
            Accessor::ListIndex { index, .. } => write!(f, "[{}]", index),
            Accessor::MapKey { key, .. } => write!(f, "[{}]", key),
        }
    }
}

/// A fully resolved property path.
///
/// Holds only the shape of the path, never an instance: the same accessor
/// can be applied to every root of the same type. Applying it to an object
/// where the location no longer exists fails with
/// [`PrismError::PathNotApplicable`].
#[derive(Clone, Debug)]
pub struct PropertyAccessor {
    path: String,
    root: TypeInfo,
    target: TypeInfo,
    steps: Vec<Accessor>,
}

impl PropertyAccessor {
    pub(crate) fn new(path: String, root: TypeInfo, target: TypeInfo, steps: Vec<Accessor>) -> Self {
        Self {
            path,
            root,
            target,
            steps,
        }
    }

    /// Canonical text of the resolved path
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn root_type(&self) -> TypeInfo {
        self.root
    }

    pub fn target_type(&self) -> TypeInfo {
        self.target
    }

    pub fn steps(&self) -> &[Accessor] {
        &self.steps
    }

    pub fn get<'a>(&self, root: &'a dyn Any) -> Result<&'a dyn Any> {
        let mut current = root;
        for (i, step) in self.steps.iter().enumerate() {
            current = step.get(current).ok_or_else(|| self.not_applicable(i))?;
        }
        Ok(current)
    }

    pub fn get_mut<'a>(&self, root: &'a mut dyn Any) -> Result<&'a mut dyn Any> {
        let mut current = root;
        for (i, step) in self.steps.iter().enumerate() {
            current = step.get_mut(current).ok_or_else(|| self.not_applicable(i))?;
        }
        Ok(current)
    }

    /// Check the root and target types once and get a typed handle
    pub fn typed<R: Any, V: Any>(self) -> Result<TypedAccessor<R, V>> {
        if !self.root.is::<R>() {
            return Err(PrismError::TypeMismatch {
                expected: std::any::type_name::<R>().to_string(),
                found: self.root.name().to_string(),
            });
        }
        if !self.target.is::<V>() {
            return Err(PrismError::TypeMismatch {
                expected: std::any::type_name::<V>().to_string(),
                found: self.target.name().to_string(),
            });
        }
        Ok(TypedAccessor {
            inner: self,
            _marker: PhantomData,
        })
    }

    fn not_applicable(&self, step: usize) -> PrismError {
        let step = self
            .steps
            .get(step)
            .map(|s| s.to_string())
            .unwrap_or_default();
        PrismError::PathNotApplicable {
            path: self.path.clone(),
            step,
        }
    }
}

impl fmt::Display for PropertyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// A [`PropertyAccessor`] whose root type `R` and value type `V` have been
/// verified, so reads and writes need no type checks from the caller.
pub struct TypedAccessor<R, V> {
    inner: PropertyAccessor,
    _marker: PhantomData<fn(&R) -> &V>,
}

impl<R: Any, V: Any> TypedAccessor<R, V> {
    pub fn get<'a>(&self, root: &'a R) -> Result<&'a V> {
        self.inner
            .get(root)?
            .downcast_ref::<V>()
            .ok_or_else(|| self.mismatch())
    }

    pub fn get_mut<'a>(&self, root: &'a mut R) -> Result<&'a mut V> {
        let mismatch = self.mismatch();
        self.inner
            .get_mut(root)?
            .downcast_mut::<V>()
            .ok_or(mismatch)
    }

    /// Overwrite the targeted value
    pub fn set(&self, root: &mut R, value: V) -> Result<()> {
        *self.get_mut(root)? = value;
        Ok(())
    }

    pub fn untyped(&self) -> &PropertyAccessor {
        &self.inner
    }

    pub fn into_untyped(self) -> PropertyAccessor {
        self.inner
    }

    fn mismatch(&self) -> PrismError {
        PrismError::TypeMismatch {
            expected: std::any::type_name::<V>().to_string(),
            found: self.inner.target.name().to_string(),
        }
    }
}

impl<R, V> Clone for TypedAccessor<R, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R, V> fmt::Debug for TypedAccessor<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedAccessor")
            .field("path", &self.inner.path)
            .field("root", &self.inner.root)
            .field("target", &self.inner.target)
            .finish()
    }
}
