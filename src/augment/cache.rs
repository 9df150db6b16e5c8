//! Per-type descriptor cache
//!
//! A [`TypeCache`] is created once, usually at startup, and shared by every
//! engine for the life of the process. Descriptors are built lazily on the
//! first augmentation of a type, published exactly once, and never mutated
//! afterwards. Failed builds are not cached.

use crate::core::entity::{
    Constructor, ConstructorArgs, Entity, FieldDescriptor, largest_usable_constructor,
};
use crate::core::error::{AugmentError, ConstructionError};
use crate::links::assembler::StorageMode;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

type CacheKey = (TypeId, StorageMode);

/// Name of the member holding links on a serialized augmented entity
pub const LINKS_FIELD: &str = "links";

/// Everything needed to build and populate an augmented `T`
pub struct TypeDescriptor<T> {
    type_name: &'static str,
    mode: StorageMode,
    constructor: Constructor<T>,
    placeholders: ConstructorArgs,
    fields: Vec<FieldDescriptor>,
}

impl<T: Entity> TypeDescriptor<T> {
    /// Select the construction strategy and collect the field list.
    ///
    /// The constructor is not invoked here. A type declaring a field named
    /// [`LINKS_FIELD`] is rejected since the serialized payload owns that key.
    pub fn build(mode: StorageMode) -> Result<Self, AugmentError> {
        let shape = T::type_shape();
        let fields = shape.fields_hierarchical();

        if fields.iter().any(|f| f.name == LINKS_FIELD) {
            return Err(AugmentError::ReservedField {
                type_name: shape.type_name.to_string(),
                field: LINKS_FIELD.to_string(),
            });
        }

        let constructors = T::constructors();

        let constructor = largest_usable_constructor(&constructors)
            .cloned()
            .ok_or_else(|| AugmentError::NoUsableConstructor {
                type_name: shape.type_name.to_string(),
            })?;

        Ok(Self {
            type_name: shape.type_name,
            mode,
            placeholders: constructor.placeholders(),
            constructor,
            fields,
        })
    }

    /// Create a fresh instance through the selected constructor.
    ///
    /// Runs on every call, so a constructor that rejects its placeholder
    /// arguments fails here each time. Panics are reported as construction
    /// failures.
    pub fn instantiate(&self) -> Result<T, AugmentError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.constructor.invoke(&self.placeholders)
        }));

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(ConstructionError::Failed(panic_message(payload.as_ref()))),
        };

        result.map_err(|reason| AugmentError::ConstructionFailure {
            type_name: self.type_name.to_string(),
            constructor: self.constructor.name.to_string(),
            reason,
        })
    }
}

impl<T> TypeDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    pub fn constructor(&self) -> &Constructor<T> {
        &self.constructor
    }

    pub fn placeholders(&self) -> &ConstructorArgs {
        &self.placeholders
    }

    /// Fields copied into every new instance, most-derived first
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

impl<T> std::fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("mode", &self.mode)
            .field("constructor", &self.constructor)
            .field("fields", &self.fields)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "constructor panicked".to_string()
    }
}

/// Shared cache of [`TypeDescriptor`]s keyed by entity type and storage mode
///
/// Lookups take a shared read lock. Builds are serialized under a single
/// build lock and re-check the map before building, so at most one
/// descriptor is ever published per key.
#[derive(Default)]
pub struct TypeCache {
    descriptors: RwLock<HashMap<CacheKey, Arc<dyn Any + Send + Sync>>>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl TypeCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by engines built without an explicit one
    pub fn global() -> Arc<TypeCache> {
        static GLOBAL: OnceLock<Arc<TypeCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(TypeCache::new())))
    }

    /// Get the descriptor for `T`, building and publishing it on first use
    pub fn resolve<T: Entity>(&self, mode: StorageMode) -> Result<Arc<TypeDescriptor<T>>, AugmentError> {
        let key = (TypeId::of::<T>(), mode);

        if let Some(descriptor) = self.lookup::<T>(&key) {
            return Ok(descriptor);
        }

        // Poisoning cannot leave the map half-written: entries are inserted whole.
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(descriptor) = self.lookup::<T>(&key) {
            return Ok(descriptor);
        }

        let descriptor = Arc::new(TypeDescriptor::<T>::build(mode)?);
        tracing::debug!(
            type_name = descriptor.type_name(),
            mode = %mode,
            constructor = descriptor.constructor().name,
            arity = descriptor.constructor().arity(),
            fields = descriptor.fields().len(),
            "publishing augmentation descriptor"
        );

        self.descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&descriptor) as Arc<dyn Any + Send + Sync>);
        self.builds.fetch_add(1, Ordering::Relaxed);

        Ok(descriptor)
    }

    fn lookup<T: Entity>(&self, key: &CacheKey) -> Option<Arc<TypeDescriptor<T>>> {
        let descriptors = self.descriptors.read().unwrap_or_else(PoisonError::into_inner);
        descriptors
            .get(key)
            .cloned()
            .and_then(|any| any.downcast::<TypeDescriptor<T>>().ok())
    }

    /// Whether a descriptor for `T` in `mode` has been published
    pub fn contains<T: Entity>(&self, mode: StorageMode) -> bool {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(TypeId::of::<T>(), mode))
    }

    /// Number of published descriptors
    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of descriptors built and published since creation
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCache")
            .field("descriptors", &self.len())
            .field("builds", &self.builds())
            .finish()
    }
}
