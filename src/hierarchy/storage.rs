use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::{
    declaration::DeclarationProvider,
    hierarchy::{MappedHierarchy, VariableMapper},
    shape::TypeShape,
    Result,
};

/// Storage for mapped hierarchies, the replaceable "hierarchy storage" module
pub trait HierarchyStorage: Send + Sync {
    /// Return the hierarchy of `root`, mapping it with `mapper` if it is not stored yet
    ///
    /// ## Arguments
    /// * 'root'        - The root type
    /// * 'mapper'      - Builds the hierarchy on a miss
    /// * 'provider'    - Declarations handed to `mapper`
    ///
    /// # Errors
    /// Returns the error of `mapper`; failed mappings are not stored
    fn get_or_map(
        &self,
        root: &TypeShape,
        mapper: &dyn VariableMapper,
        provider: &dyn DeclarationProvider,
    ) -> Result<Arc<MappedHierarchy>>;

    /// The stored hierarchy of `root`, without mapping it
    fn get(&self, root: &TypeShape) -> Option<Arc<MappedHierarchy>>;

    /// Count of stored hierarchies
    fn len(&self) -> usize;

    /// Check if nothing is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the implementation, used in log output
    fn module_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Default [`HierarchyStorage`], caching every hierarchy by its root shape
///
/// Entries are written once. Two threads missing the same root concurrently may both map
/// it; the first inserted hierarchy is kept and returned to both.
#[derive(Debug, Default)]
pub struct CachedHierarchyStorage {
    hierarchies: DashMap<TypeShape, Arc<MappedHierarchy>>,
}

impl CachedHierarchyStorage {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        CachedHierarchyStorage {
            hierarchies: DashMap::new(),
        }
    }
}

impl HierarchyStorage for CachedHierarchyStorage {
    fn get_or_map(
        &self,
        root: &TypeShape,
        mapper: &dyn VariableMapper,
        provider: &dyn DeclarationProvider,
    ) -> Result<Arc<MappedHierarchy>> {
        if let Some(hierarchy) = self.get(root) {
            return Ok(hierarchy);
        }

        debug!(root = %root, mapper = mapper.module_name(), "hierarchy cache miss");
        let mapped = Arc::new(mapper.map_type_variables(root, provider)?);

        Ok(self
            .hierarchies
            .entry(root.clone())
            .or_insert(mapped)
            .value()
            .clone())
    }

    fn get(&self, root: &TypeShape) -> Option<Arc<MappedHierarchy>> {
        self.hierarchies.get(root).map(|entry| entry.value().clone())
    }

    fn len(&self) -> usize {
        self.hierarchies.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        hierarchy::HierarchyWalker,
        test::{fixtures, shapes},
        Error,
    };

    #[derive(Default)]
    struct CountingMapper {
        calls: AtomicUsize,
    }

    impl VariableMapper for CountingMapper {
        fn map_type_variables(
            &self,
            root: &TypeShape,
            provider: &dyn DeclarationProvider,
        ) -> Result<MappedHierarchy> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            HierarchyWalker::new().map_type_variables(root, provider)
        }
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let storage = CachedHierarchyStorage::new();
        let mapper = CountingMapper::default();
        let table = fixtures::pair_table();
        let root = TypeShape::parameterized("demo.Pair", vec![shapes::integer(), shapes::string()]);

        let first = storage.get_or_map(&root, &mapper, &table).unwrap();
        let second = storage.get_or_map(&root, &mapper, &table).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(mapper.calls.load(Ordering::SeqCst), 1);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_raw_and_bound_roots_are_distinct_keys() {
        let storage = CachedHierarchyStorage::new();
        let table = fixtures::pair_table();
        let walker = HierarchyWalker::new();

        storage
            .get_or_map(&TypeShape::named("demo.Pair"), &walker, &table)
            .unwrap();
        storage
            .get_or_map(
                &TypeShape::parameterized("demo.Pair", vec![shapes::integer(), shapes::string()]),
                &walker,
                &table,
            )
            .unwrap();
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_failures_are_not_stored() {
        let storage = CachedHierarchyStorage::new();
        let root = TypeShape::named("demo.Missing");

        let result = storage.get_or_map(&root, &HierarchyWalker::new(), &fixtures::pair_table());
        assert!(matches!(result, Err(Error::TypeNotFound(_))));
        assert!(storage.is_empty());
        assert!(storage.get(&root).is_none());
    }
}
