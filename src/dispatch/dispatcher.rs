//! # Dispatcher
//!
//! Turns a "do X to all" request into one call per registered descriptor, in
//! registration order, sequentially.
//!
//! Silent broadcasts stop at the first failure and return it. Reporting
//! broadcasts (`quit!`, or the `quit_all!` token) always complete the sweep,
//! since each instance's failure is absorbed by its status line.
//!
//! ## Usage
//!
//! ```rust
//! use godredis::dispatch::Dispatcher;
//! use godredis::registry::DescriptorRegistry;
//! use godredis::{CommandValue, DescriptorType, StatusReporter};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(DescriptorRegistry::new());
//! registry.register(
//!     DescriptorType::new("SidekiqRedis").with("queue_depth", |_, _| Ok(CommandValue::Integer(2))),
//! );
//!
//! let dispatcher = Dispatcher::new(registry, Arc::new(StatusReporter::stdout()));
//! let depths = dispatcher.call("queue_depth_all").unwrap();
//! assert_eq!(depths, vec![CommandValue::Integer(2)]);
//! assert_eq!(dispatcher.instances().count(), 1);
//! ```

use super::instance::DescriptorInstance;
use super::request::OperationRequest;
use crate::config::GodredisConfig;
use crate::error::CommandResult;
use crate::logging::log_dispatch_operation;
use crate::registry::{DescriptorRegistry, DescriptorType};
use crate::reporting::StatusReporter;
use crate::value::CommandValue;
use std::sync::Arc;
use std::vec;
use tracing::debug;

/// Bulk entry point over a descriptor registry
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<DescriptorRegistry>,
    reporter: Arc<StatusReporter>,
}

impl Dispatcher {
    pub fn new(registry: Arc<DescriptorRegistry>, reporter: Arc<StatusReporter>) -> Self {
        Self { registry, reporter }
    }

    /// Dispatcher over `registry` printing status lines to stdout as configured
    pub fn from_config(registry: Arc<DescriptorRegistry>, config: &GodredisConfig) -> Self {
        Self::new(registry, Arc::new(StatusReporter::from_config(&config.report)))
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    pub fn reporter(&self) -> &Arc<StatusReporter> {
        &self.reporter
    }

    /// Fresh instances of every registered type, built as the iterator advances.
    /// Call again to start over with new instances.
    pub fn instances(&self) -> Instances {
        Instances {
            types: self.registry.all_types().into_iter(),
            reporter: Arc::clone(&self.reporter),
        }
    }

    /// Alias of [`instances`](Self::instances)
    pub fn redises(&self) -> Instances {
        self.instances()
    }

    /// Run `f` against a fresh instance of every type and return the instances
    pub fn each<F>(&self, mut f: F) -> Vec<DescriptorInstance>
    where
        F: FnMut(&DescriptorInstance),
    {
        self.instances()
            .inspect(|instance| f(instance))
            .collect()
    }

    /// Run `operation` on every instance, in registration order.
    ///
    /// `operation` may be a reporting token (`quit!`).
    pub fn invoke_all(&self, operation: &str) -> CommandResult<Vec<CommandValue>> {
        self.invoke_all_with(operation, None)
    }

    /// Like [`invoke_all`](Self::invoke_all), passing `arg` to every recipe
    pub fn invoke_all_with(
        &self,
        operation: &str,
        arg: Option<CommandValue>,
    ) -> CommandResult<Vec<CommandValue>> {
        let instances = self.instances();
        let total = instances.len();

        log_dispatch_operation(operation, total, "started", None);

        let results = instances
            .map(|instance| {
                debug!(tag = instance.tag(), operation, "Dispatching to instance");
                instance.dispatch_with(operation, arg.clone())
            })
            .collect::<CommandResult<Vec<_>>>();

        match &results {
            Ok(_) => log_dispatch_operation(operation, total, "completed", None),
            Err(e) => log_dispatch_operation(operation, total, "failed", Some(&e.to_string())),
        }
        results
    }

    /// Resolve a `<name>_all` or `<name>_all!` token and broadcast it
    pub fn call(&self, token: &str) -> CommandResult<Vec<CommandValue>> {
        let request = OperationRequest::parse_bulk(token)?;
        self.invoke_all(&request.instance_token())
    }
}

/// Lazy sequence of fresh descriptor instances
#[derive(Debug)]
pub struct Instances {
    types: vec::IntoIter<Arc<DescriptorType>>,
    reporter: Arc<StatusReporter>,
}

impl Iterator for Instances {
    type Item = DescriptorInstance;

    fn next(&mut self) -> Option<Self::Item> {
        self.types
            .next()
            .map(|descriptor| descriptor.instantiate(Arc::clone(&self.reporter)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.types.size_hint()
    }
}

impl ExactSizeIterator for Instances {}
