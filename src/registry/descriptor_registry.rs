//! # Descriptor Registry
//!
//! Append-only catalog of descriptor types, kept in definition order.
//!
//! ## Key Features
//!
//! - **Definition order** is preserved and drives bulk dispatch order
//! - **Idempotent registration**: registering the same name again reopens the
//!   existing entry, merging in the new recipes, rather than adding a duplicate
//! - **No removal**: entries live as long as the registry
//! - **Process-wide instance** through [`global`]
//!
//! ## Usage
//!
//! ```rust
//! use godredis::registry::DescriptorRegistry;
//! use godredis::DescriptorType;
//!
//! let registry = DescriptorRegistry::new();
//! registry.register(DescriptorType::new("CacheStoreGodredis"));
//! registry.register(DescriptorType::new("SidekiqRedis"));
//!
//! let tags: Vec<String> = registry
//!     .all_types()
//!     .iter()
//!     .map(|descriptor| descriptor.tag().to_string())
//!     .collect();
//! assert_eq!(tags, vec!["cache_store", "sidekiq"]);
//! ```

use super::descriptor::{Descriptor, DescriptorType};
use crate::logging::log_registry_operation;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tracing::warn;

/// Registry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_types: usize,
    /// Types replacing at least one built-in recipe
    pub overriding_types: usize,
    /// Custom operations across all types
    pub custom_operations: usize,
    pub tags: Vec<String>,
}

/// Ordered catalog of descriptor types
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    types: RwLock<Vec<Arc<DescriptorType>>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor type, returning the shared handle to it.
    /// Registering a name again returns the handle from the first registration.
    pub fn register(&self, descriptor: DescriptorType) -> Arc<DescriptorType> {
        self.register_shared(Arc::new(descriptor))
    }

    /// Register a descriptor described by a Rust type
    pub fn register_descriptor<T: Descriptor>(&self) -> Arc<DescriptorType> {
        self.register(DescriptorType::of::<T>())
    }

    /// Register an already shared descriptor type, returning the registered handle
    pub fn register_shared(&self, descriptor: Arc<DescriptorType>) -> Arc<DescriptorType> {
        let mut types = self.types.write();
        let existing = types.iter().find(|t| t.name() == descriptor.name()).cloned();

        let (registered, status) = match existing {
            Some(existing) => {
                drop(types);
                warn!(
                    descriptor = descriptor.name(),
                    "Descriptor already registered, merging recipes"
                );
                existing.merge(&descriptor);
                (existing, "reopened")
            }
            None => {
                types.push(Arc::clone(&descriptor));
                drop(types);
                (descriptor, "registered")
            }
        };

        log_registry_operation("register", registered.name(), registered.tag(), status, None);
        registered
    }

    /// Snapshot of every registered type, in definition order
    pub fn all_types(&self) -> Vec<Arc<DescriptorType>> {
        self.types.read().clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<DescriptorType>> {
        self.types.read().iter().find(|t| t.name() == name).cloned()
    }

    /// Look up by display tag
    pub fn find_by_tag(&self, tag: &str) -> Option<Arc<DescriptorType>> {
        self.types.read().iter().find(|t| t.tag() == tag).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        let types = self.types.read();
        let mut stats = RegistryStats::default();

        for descriptor in types.iter() {
            stats.total_types += 1;
            if !descriptor.overrides().is_empty() {
                stats.overriding_types += 1;
            }
            stats.custom_operations += descriptor.custom_operations().len();
            stats.tags.push(descriptor.tag().to_string());
        }

        stats
    }
}

/// The process-wide registry
pub fn global() -> Arc<DescriptorRegistry> {
    static GLOBAL: OnceLock<Arc<DescriptorRegistry>> = OnceLock::new();
    Arc::clone(GLOBAL.get_or_init(|| Arc::new(DescriptorRegistry::new())))
}

/// Register a descriptor type on the process-wide registry
pub fn register(descriptor: DescriptorType) -> Arc<DescriptorType> {
    global().register(descriptor)
}

/// Register a Rust descriptor type on the process-wide registry
pub fn register_descriptor<T: Descriptor>() -> Arc<DescriptorType> {
    global().register_descriptor::<T>()
}
