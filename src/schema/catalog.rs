//! Memoizing schema catalog.
//!
//! [`SchemaCatalog`] sits in front of a [`SchemaProvider`] and remembers every
//! descriptor it has fetched for the lifetime of the catalog. It is the only
//! mutable state the engine shares between calls.
//!
//! # Guarantees
//!
//! - **Additive**: entries are never evicted or overwritten
//! - **Idempotent**: the first descriptor stored for a name is the one every
//!   caller sees, even when several threads populate the same name at once
//! - **Failures are not cached**: an unknown object type is asked for again on
//!   the next request
//!
//! Uses DashMap for lock-free concurrent access. The provider is called outside
//! any map lock, then the result is stored with an insert-if-absent entry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, trace};

use super::{ObjectDescriptor, SchemaProvider};
use crate::core::MergeError;

/// Hit and miss counters for a [`SchemaCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that went to the provider
    pub misses: usize,
}

impl CatalogStats {
    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Process- or session-wide cache of object descriptors.
///
/// Construct one per schema source and share it (it is `Send + Sync`) between
/// engines and threads.
pub struct SchemaCatalog {
    provider: Arc<dyn SchemaProvider>,
    /// Keyed by lowercase object type name
    descriptors: DashMap<String, Arc<ObjectDescriptor>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl SchemaCatalog {
    /// Create an empty catalog backed by `provider`.
    pub fn new(provider: Arc<dyn SchemaProvider>) -> Self {
        Self {
            provider,
            descriptors: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Descriptor for `object_type`, fetched from the provider on first use.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnknownObjectType`] (or whatever the provider
    /// reports) when the object type cannot be described.
    pub fn descriptors_for(&self, object_type: &str) -> Result<Arc<ObjectDescriptor>, MergeError> {
        let key = object_type.to_lowercase();

        if let Some(descriptor) = self.descriptors.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("Schema catalog hit for {}", object_type);
            return Ok(Arc::clone(descriptor.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Schema catalog miss for {}, describing", object_type);

        let described = match self.provider.describe(object_type) {
            Ok(descriptor) => Arc::new(descriptor),
            Err(e) => {
                debug!("Failed to describe {}: {}", object_type, e);
                return Err(e);
            }
        };

        // Another caller may have stored this name while we were describing it
        let stored = match self.descriptors.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => Arc::clone(entry.insert(described).value()),
        };
        Ok(stored)
    }

    /// Object type owning the key prefix of `id`.
    ///
    /// Delegates to the provider on every call; prefix lookups are cheap and not
    /// part of the memoized descriptor state.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnknownObjectType`] if the prefix is unknown.
    pub fn object_type_for_id(&self, id: &str) -> Result<String, MergeError> {
        self.provider.object_type_for_id(id)
    }

    /// Whether a descriptor for `object_type` has already been stored.
    pub fn contains(&self, object_type: &str) -> bool {
        self.descriptors.contains_key(&object_type.to_lowercase())
    }

    /// Number of stored descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no descriptor has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for SchemaCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCatalog")
            .field("descriptors", &self.descriptors.len())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
