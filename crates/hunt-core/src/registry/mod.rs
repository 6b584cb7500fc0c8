//! Plugin-based store registry
//!
//! The registry allows record store backends to be registered dynamically at
//! runtime, avoiding hardcoded if-else chains in the daemon.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hunt_core::registry::StoreRegistry;
//! use hunt_core::config::StoreConfig;
//!
//! let registry = StoreRegistry::new();
//! hunt_store_notion::register(&registry);
//!
//! let config = StoreConfig::Notion { api_token: "...".to_string() };
//! let store = registry.create_store(&config)?;
//! ```
//!
//! ## Registration
//!
//! Backend crates should expose a `register()` function and call
//! [`StoreRegistry::register_store`] during initialization.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::traits::{RecordStore, RecordStoreFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Registry for plugin-based record store creation
///
/// The registry maintains a map of backend type names to factory objects,
/// allowing dynamic instantiation of stores based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct StoreRegistry {
    /// Registered record store factories
    stores: RwLock<HashMap<String, Box<dyn RecordStoreFactory>>>,
}

impl StoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record store factory
    ///
    /// # Parameters
    ///
    /// - `name`: Backend type name (e.g., "notion")
    /// - `factory`: Factory object for creating store instances
    pub fn register_store(&self, name: impl Into<String>, factory: Box<dyn RecordStoreFactory>) {
        let name = name.into();
        let mut stores = self.stores.write().unwrap();
        stores.insert(name, factory);
    }

    /// Create a record store from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Store configuration; its type name selects the factory
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn RecordStore>)`: The created store
    /// - `Err(Error)`: No factory registered for the type, or the factory
    ///   rejected the configuration
    pub fn create_store(&self, config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
        let type_name = config.type_name();
        let stores = self.stores.read().unwrap();
        let factory = stores.get(type_name).ok_or_else(|| {
            Error::config(format!(
                "No store backend registered for type '{}'",
                type_name
            ))
        })?;
        factory.create(config)
    }

    /// List registered backend type names
    pub fn registered_stores(&self) -> Vec<String> {
        let stores = self.stores.read().unwrap();
        stores.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PropertyFilter;
    use crate::traits::Record;
    use async_trait::async_trait;

    struct NullStore;

    #[async_trait]
    impl RecordStore for NullStore {
        async fn query_by_filter(
            &self,
            _collection: &str,
            _filter: &PropertyFilter,
        ) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }

        async fn query_all(&self, _collection: &str, _page_limit: u32) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }

        async fn get_record(&self, _collection: &str, record_id: &str) -> Result<Record> {
            Ok(Record::new(record_id))
        }

        fn store_name(&self) -> &'static str {
            "null"
        }
    }

    struct NullFactory;

    impl RecordStoreFactory for NullFactory {
        fn create(&self, _config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
            Ok(Box::new(NullStore))
        }
    }

    #[test]
    fn create_store_uses_registered_factory() {
        let registry = StoreRegistry::new();
        registry.register_store("notion", Box::new(NullFactory));

        let config = StoreConfig::Notion {
            api_token: "secret".to_string(),
        };
        let store = registry.create_store(&config).unwrap();
        assert_eq!(store.store_name(), "null");
    }

    #[test]
    fn create_store_fails_for_unregistered_type() {
        let registry = StoreRegistry::new();

        let config = StoreConfig::Custom {
            factory: "memory".to_string(),
            config: serde_json::json!({}),
        };
        assert!(registry.create_store(&config).is_err());
    }

    #[test]
    fn registered_stores_lists_names() {
        let registry = StoreRegistry::new();
        registry.register_store("notion", Box::new(NullFactory));

        assert_eq!(registry.registered_stores(), vec!["notion".to_string()]);
    }
}
