//! Central registry for hash algorithm implementations

use super::traits::HashAlgorithmImpl;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Central registry for all hash algorithms
///
/// Built once on first use and never mutated afterwards.
pub struct AlgorithmRegistry {
    algorithms: HashMap<&'static str, Arc<dyn HashAlgorithmImpl>>,
}

impl AlgorithmRegistry {
    /// Create a new empty registry
    fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Get the global registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(|| {
            let mut registry = Self::new();
            // Register all built-in algorithms
            super::algorithms::register_all(&mut registry);
            registry
        })
    }

    /// Register a new algorithm
    pub(crate) fn register(&mut self, algorithm: impl HashAlgorithmImpl + 'static) {
        self.algorithms.insert(algorithm.id(), Arc::new(algorithm));
    }

    /// Get algorithm by canonical name
    pub fn get(&self, id: &str) -> Option<Arc<dyn HashAlgorithmImpl>> {
        self.algorithms.get(id).cloned()
    }

    /// List all registered algorithm names, sorted
    pub fn list(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.algorithms.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
