#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Godredis
//!
//! Bulk management of Redis connections that live in different subsystems,
//! each with its own way of reaching the connection.
//!
//! ## Overview
//!
//! A process often holds several Redis connections: a cache store, a job
//! queue, an object mapper. Each is reached differently, yet on events like a
//! server fork all of them need the same treatment. Godredis collects a
//! descriptor per connection and broadcasts operations across all of them:
//!
//! ```rust
//! use godredis::{CommandValue, DescriptorType};
//!
//! godredis::registry::register(
//!     DescriptorType::new("SessionsGodredis")
//!         .with("quit", |_, _| Ok(CommandValue::Bool(true))),
//! );
//!
//! // Silent: returns each result, stops at the first failure
//! let results = godredis::call("quit_all").unwrap();
//! assert_eq!(results, vec![CommandValue::Bool(true)]);
//!
//! // Reporting: prints "Redis [sessions]: quit... [OK]" and never stops early
//! godredis::call("quit_all!").unwrap();
//!
//! // Ad-hoc per-instance calls
//! for redis in godredis::redises() {
//!     let _ = redis.dispatch("quit!");
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`registry`] - Descriptor types, command maps and the registry
//! - [`dispatch`] - Request grammar, instances and bulk dispatch
//! - [`reporting`] - Status lines for reporting operations
//! - [`connection`] - Traits for the wrapped Redis client
//! - [`value`] - Values returned by recipes
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`error`] - Structured error handling

pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod registry;
pub mod reporting;
pub mod value;

pub use crate::config::{ConfigManager, GodredisConfig};
pub use connection::{RedisClient, RedisConnection};
pub use dispatch::{DescriptorInstance, Dispatcher, Instances, OperationRequest};
pub use error::{CommandError, CommandResult, ConnectionError, GodredisError, Result};
pub use registry::{Descriptor, DescriptorRegistry, DescriptorType};
pub use reporting::{Status, StatusReporter};
pub use value::CommandValue;

use std::path::PathBuf;

/// Load configuration from `config_directory` (or the default location),
/// install logging and configure the process-wide dispatcher.
///
/// Returns false when the dispatcher was already in use.
pub fn bootstrap(config_directory: Option<PathBuf>) -> Result<bool> {
    let manager = ConfigManager::load_from_directory(config_directory)?;
    logging::init_logging_with(&manager.config().logging);
    Ok(dispatch::init(manager.config()))
}

/// Fresh instances of every globally registered descriptor
pub fn redises() -> Instances {
    dispatch::global().instances()
}

/// Broadcast a `<name>_all` or `<name>_all!` token on the global registry
pub fn call(token: &str) -> CommandResult<Vec<CommandValue>> {
    dispatch::global().call(token)
}

/// Run `operation` on every globally registered descriptor
pub fn invoke_all(operation: &str) -> CommandResult<Vec<CommandValue>> {
    dispatch::global().invoke_all(operation)
}
