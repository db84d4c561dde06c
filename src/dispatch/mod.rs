//! # Dispatch
//!
//! Instance resolution and bulk command routing.
//!
//! ## Architecture
//!
//! ```text
//! "quit_all!" ─► OperationRequest::parse_bulk ─► Dispatcher::invoke_all("quit!")
//!                                                     │
//!                     for each registered type, in order ▼
//!                               DescriptorInstance::dispatch("quit!")
//!                                                     │
//!                          resolve "quit" (own recipe, else default)
//!                                                     ▼
//!                               StatusReporter ─► "Redis [tag]: quit... [OK]"
//! ```
//!
//! The process-wide dispatcher pairs the global registry with a stdout
//! reporter. Call [`init`] before first use to apply configuration.

pub mod dispatcher;
pub mod instance;
pub mod request;

pub use dispatcher::{Dispatcher, Instances};
pub use instance::DescriptorInstance;
pub use request::OperationRequest;

use crate::config::GodredisConfig;
use crate::registry;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

/// Configure the process-wide dispatcher. Returns false if it was already in use.
pub fn init(config: &GodredisConfig) -> bool {
    let mut installed = false;
    GLOBAL.get_or_init(|| {
        installed = true;
        Dispatcher::from_config(registry::global(), config)
    });

    if !installed {
        debug!("Global dispatcher already initialized - keeping existing configuration");
    }
    installed
}

/// The process-wide dispatcher
pub fn global() -> &'static Dispatcher {
    GLOBAL.get_or_init(|| Dispatcher::from_config(registry::global(), &GodredisConfig::default()))
}
