//! # Registry Infrastructure
//!
//! Descriptor types and the catalog that collects them.
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── CommandMap          (operation name -> recipe, plus built-in defaults)
//! ├── DescriptorType      (named resource definition, tag derivation)
//! └── DescriptorRegistry  (ordered, append-only catalog)
//! ```
//!
//! Types are registered explicitly once at start-up, either on a registry the
//! caller owns or on the process-wide one:
//!
//! ```rust
//! use godredis::registry;
//! use godredis::{Descriptor, DescriptorType};
//!
//! struct ObjectsGodredis;
//! impl Descriptor for ObjectsGodredis {}
//!
//! registry::register_descriptor::<ObjectsGodredis>();
//! registry::register(DescriptorType::new("SidekiqRedis"));
//! assert!(registry::global().find_by_tag("objects").is_some());
//! ```

pub mod command_map;
pub mod descriptor;
pub mod descriptor_registry;

pub use command_map::{defaults, CommandMap, Recipe, DEFAULT_OPERATIONS};
pub use descriptor::{derive_tag, Descriptor, DescriptorType};
pub use descriptor_registry::{
    global, register, register_descriptor, DescriptorRegistry, RegistryStats,
};
