//! Shared cache of type descriptors.

use std::collections::HashMap;
use std::sync::Arc;

use core::any::TypeId;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::{Described, Descriptor, DescriptorError};

/// Produces descriptors for supplied values.
pub trait DescriptorSource {
    /// Returns the descriptor of `value`'s type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type's declaration is invalid.
    fn reflect(&self, value: &dyn Described) -> Result<Arc<Descriptor>, DescriptorError>;
}

/// Thread-safe cache of descriptors, keyed by Rust type.
///
/// Each type's descriptor is built once and then shared by every statement
/// prepared against the cache. Invalid declarations are not cached.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: RwLock<HashMap<TypeId, Arc<Descriptor>>>,
}

impl DescriptorCache {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached descriptor of `value`'s type, building it on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns an error if the type's declaration is invalid.
    pub fn get(&self, value: &dyn Described) -> Result<Arc<Descriptor>, DescriptorError> {
        let key = value.type_key();
        if let Some(descriptor) = self.entries.read().get(&key) {
            trace!(type_name = value.type_name(), "descriptor cache hit");
            return Ok(Arc::clone(descriptor));
        }

        let built = Arc::new(value.describe()?);
        debug!(type_name = value.type_name(), descriptor = %built, "caching descriptor");

        // Another thread may have filled the entry since the read lock was
        // released; keep whichever landed first.
        let mut entries = self.entries.write();
        Ok(Arc::clone(entries.entry(key).or_insert(built)))
    }

    /// Returns the number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every cached descriptor.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl DescriptorSource for DescriptorCache {
    fn reflect(&self, value: &dyn Described) -> Result<Arc<Descriptor>, DescriptorError> {
        self.get(value)
    }
}

impl<S: DescriptorSource + ?Sized> DescriptorSource for Arc<S> {
    fn reflect(&self, value: &dyn Described) -> Result<Arc<Descriptor>, DescriptorError> {
        (**self).reflect(value)
    }
}

impl<S: DescriptorSource + ?Sized> DescriptorSource for &S {
    fn reflect(&self, value: &dyn Described) -> Result<Arc<Descriptor>, DescriptorError> {
        (**self).reflect(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Describable, FieldTag};

    struct Person;

    impl Describable for Person {
        const TYPE_NAME: &'static str = "Person";
        const FIELDS: &'static [FieldTag] = &[FieldTag::new("id"), FieldTag::new("name")];
    }

    struct Address;

    impl Describable for Address {
        const TYPE_NAME: &'static str = "Address";
        const FIELDS: &'static [FieldTag] = &[FieldTag::new("id")];
    }

    struct Nameless;

    impl Describable for Nameless {
        const TYPE_NAME: &'static str = "";
        const FIELDS: &'static [FieldTag] = &[];
    }

    #[test]
    fn test_get_caches_by_type() {
        let cache = DescriptorCache::new();
        assert!(cache.is_empty());

        let first = cache.get(&Person).expect("valid");
        let second = cache.get(&Person).expect("valid");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let address = cache.get(&Address).expect("valid");
        assert_eq!(address.name(), "Address");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalid_declarations_are_not_cached() {
        let cache = DescriptorCache::new();
        assert_eq!(
            cache.get(&Nameless).unwrap_err(),
            DescriptorError::EmptyTypeName
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = DescriptorCache::new();
        cache.get(&Person).expect("valid");
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_source() {
        let cache = Arc::new(DescriptorCache::new());
        let descriptor = cache.reflect(&Person).expect("valid");
        assert_eq!(descriptor.name(), "Person");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_first_lookup_stores_one_entry() {
        let cache = DescriptorCache::new();
        let results: Vec<Arc<Descriptor>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get(&Person).expect("valid")))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("thread panicked"))
                .collect()
        });
        assert_eq!(cache.len(), 1);
        let stored = cache.get(&Person).expect("valid");
        assert!(results.iter().all(|d| Arc::ptr_eq(d, &stored)));
    }
}
