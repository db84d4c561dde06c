//! # Descriptor Types
//!
//! A descriptor type names one Redis connection held somewhere in the process
//! and records how to reach it. Descriptors only define the recipes that differ
//! from the defaults:
//!
//! ```rust
//! use godredis::{CommandValue, DescriptorType};
//!
//! let sidekiq = DescriptorType::new("SidekiqRedis")
//!     .with("quit", |instance, _| {
//!         instance.redis()?.quit()?;
//!         Ok(CommandValue::Bool(true))
//!     })
//!     .with("queue_depth", |_, _| Ok(CommandValue::Integer(3)));
//!
//! assert_eq!(sidekiq.tag(), "sidekiq");
//! assert!(sidekiq.responds_to("connected?"));
//! assert!(sidekiq.responds_to("queue_depth"));
//! ```
//!
//! Rust types can describe themselves through the [`Descriptor`] trait, in which
//! case the descriptor is named after the type.

use super::command_map::{self, CommandMap, Recipe};
use crate::dispatch::DescriptorInstance;
use crate::error::CommandResult;
use crate::reporting::StatusReporter;
use crate::value::CommandValue;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

/// A Rust type that describes one Redis connection
///
/// ```rust
/// use godredis::{CommandValue, Descriptor, DescriptorType};
///
/// struct CacheStoreGodredis;
///
/// impl Descriptor for CacheStoreGodredis {
///     fn define(descriptor: &DescriptorType) {
///         descriptor.define("flush_sessions", |_, _| Ok(CommandValue::Integer(0)));
///     }
/// }
///
/// let descriptor = DescriptorType::of::<CacheStoreGodredis>();
/// assert_eq!(descriptor.tag(), "cache_store");
/// ```
pub trait Descriptor: 'static {
    /// Declare recipes. The default declares nothing, so every built-in applies.
    fn define(_descriptor: &DescriptorType) {}
}

/// Named definition of how to reach and operate on one resource
pub struct DescriptorType {
    name: String,
    tag: OnceLock<String>,
    commands: RwLock<CommandMap>,
}

impl DescriptorType {
    /// Create a descriptor with no recipes of its own
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: OnceLock::new(),
            commands: RwLock::new(CommandMap::new()),
        }
    }

    /// Create a descriptor named after `T`, with the recipes `T` declares
    pub fn of<T: Descriptor>() -> Self {
        let descriptor = Self::new(std::any::type_name::<T>());
        T::define(&descriptor);
        descriptor
    }

    /// Builder form of [`define`](Self::define)
    pub fn with<F>(self, name: impl Into<String>, recipe: F) -> Self
    where
        F: Fn(&DescriptorInstance, Option<CommandValue>) -> CommandResult + Send + Sync + 'static,
    {
        self.define(name, recipe);
        self
    }

    /// Declare a recipe. A default name is overridden, any other name adds a
    /// custom operation. Takes effect for every later call, including on
    /// descriptors that are already registered.
    pub fn define<F>(&self, name: impl Into<String>, recipe: F) -> &Self
    where
        F: Fn(&DescriptorInstance, Option<CommandValue>) -> CommandResult + Send + Sync + 'static,
    {
        self.commands.write().define(name, recipe);
        self
    }

    /// Reopen this descriptor with the recipes `other` declares; names
    /// declared in both take `other`'s recipe
    pub(crate) fn merge(&self, other: &DescriptorType) {
        if std::ptr::eq(self, other) {
            return;
        }
        let incoming = other.commands.read().clone();
        self.commands.write().extend(&incoming);
    }

    /// Full identity, e.g. `my_app::redis::SidekiqRedis`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unqualified name
    pub fn simple_name(&self) -> &str {
        demodulize(&self.name)
    }

    /// Display identifier used in status lines
    pub fn tag(&self) -> &str {
        self.tag.get_or_init(|| derive_tag(&self.name))
    }

    /// Find the recipe for `operation`, preferring the descriptor's own
    pub fn resolve(&self, operation: &str) -> Option<Recipe> {
        self.commands
            .read()
            .get(operation)
            .or_else(|| command_map::defaults().get(operation))
    }

    pub fn responds_to(&self, operation: &str) -> bool {
        self.commands.read().contains(operation) || command_map::is_default_operation(operation)
    }

    /// Default names this descriptor replaces
    pub fn overrides(&self) -> Vec<String> {
        self.commands
            .read()
            .names()
            .into_iter()
            .filter(|name| command_map::is_default_operation(name))
            .collect()
    }

    /// Names this descriptor adds on top of the defaults
    pub fn custom_operations(&self) -> Vec<String> {
        self.commands
            .read()
            .names()
            .into_iter()
            .filter(|name| !command_map::is_default_operation(name))
            .collect()
    }

    /// Every operation name this descriptor responds to, sorted
    pub fn operations(&self) -> Vec<String> {
        let mut names = self.commands.read().names();
        names.extend(command_map::DEFAULT_OPERATIONS.iter().map(|s| s.to_string()));
        names.sort();
        names.dedup();
        names
    }

    /// Construct a fresh instance
    pub fn instantiate(self: &Arc<Self>, reporter: Arc<StatusReporter>) -> DescriptorInstance {
        DescriptorInstance::new(Arc::clone(self), reporter)
    }
}

impl std::fmt::Debug for DescriptorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorType")
            .field("name", &self.name)
            .field("commands", &*self.commands.read())
            .finish()
    }
}

/// Strip module path and generic arguments: `a::b::Foo<c::D>` -> `Foo`
fn demodulize(name: &str) -> &str {
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

/// Derive a display tag from a type name.
///
/// `CacheStoreGodredis` -> `cache_store`, `SidekiqRedis` -> `sidekiq`.
/// A bare `Redis` keeps its name, since the suffix only goes when something
/// is left in front of it.
pub fn derive_tag(type_name: &str) -> String {
    let simple = demodulize(type_name);
    let lower = simple.to_ascii_lowercase();

    let stem = ["godredis", "redis"]
        .iter()
        .find(|suffix| lower.len() > suffix.len() && lower.ends_with(*suffix))
        .map(|suffix| &simple[..simple.len() - suffix.len()])
        .unwrap_or(simple);

    underscore(stem)
}

/// CamelCase to snake_case, keeping acronym runs together (`HTTPCache` -> `http_cache`)
fn underscore(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        match c {
            '-' => out.push('_'),
            c => out.push(c.to_ascii_lowercase()),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ObjectsGodredis;
    impl Descriptor for ObjectsGodredis {}

    #[test]
    fn test_tag_strips_conventional_suffixes() {
        assert_eq!(derive_tag("CacheStoreGodredis"), "cache_store");
        assert_eq!(derive_tag("SidekiqRedis"), "sidekiq");
        assert_eq!(derive_tag("ObjectsGODREDIS"), "objects");
        assert_eq!(derive_tag("app::stores::SessionRedis"), "session");
        assert_eq!(derive_tag("Sessions"), "sessions");
    }

    #[test]
    fn test_tag_keeps_a_bare_suffix() {
        assert_eq!(derive_tag("Redis"), "redis");
        assert_eq!(derive_tag("Godredis"), "god");
        assert_eq!(derive_tag("GodRedis"), "god");
    }

    #[test]
    fn test_underscore_handles_acronyms_and_dashes() {
        assert_eq!(underscore("HTTPCache"), "http_cache");
        assert_eq!(underscore("Cache2Store"), "cache2_store");
        assert_eq!(underscore("rate-limiter"), "rate_limiter");
    }

    #[test]
    fn test_tag_is_stable() {
        let descriptor = DescriptorType::new("CacheStoreGodredis");
        let first = descriptor.tag().to_string();
        assert_eq!(descriptor.tag(), first);
        assert_eq!(descriptor.tag(), "cache_store");
    }

    #[test]
    fn test_descriptor_named_after_rust_type() {
        let descriptor = DescriptorType::of::<ObjectsGodredis>();
        assert!(descriptor.name().ends_with("::ObjectsGodredis"));
        assert_eq!(descriptor.simple_name(), "ObjectsGodredis");
        assert_eq!(descriptor.tag(), "objects");
    }

    #[test]
    fn test_overrides_and_custom_operations_are_split() {
        let descriptor = DescriptorType::new("SidekiqRedis")
            .with("quit", |_, _| Ok(CommandValue::Bool(true)))
            .with("del_some_key", |_, _| Ok(CommandValue::Integer(1)));

        assert_eq!(descriptor.overrides(), vec!["quit".to_string()]);
        assert_eq!(descriptor.custom_operations(), vec!["del_some_key".to_string()]);
        assert_eq!(descriptor.operations().len(), 6);
        assert!(descriptor.responds_to("del_some_key"));
        assert!(!descriptor.responds_to("flushall"));
        assert!(descriptor.resolve("flushall").is_none());
    }
}
