//! # Descriptor Instances
//!
//! A fresh instance is built for every bulk call. It carries no state of its
//! own: recipes are resolved against its descriptor type each time they run,
//! so overrides declared after registration are picked up immediately.

use super::request::OperationRequest;
use crate::connection::{RedisClient, RedisConnection};
use crate::error::{CommandError, CommandResult};
use crate::registry::command_map::{CLIENT, CONNECTED, QUIT, RECONNECT, REDIS};
use crate::registry::DescriptorType;
use crate::reporting::StatusReporter;
use crate::value::CommandValue;
use std::sync::Arc;
use tracing::debug;

/// One live instance of a descriptor type
#[derive(Debug, Clone)]
pub struct DescriptorInstance {
    descriptor: Arc<DescriptorType>,
    reporter: Arc<StatusReporter>,
}

impl DescriptorInstance {
    pub fn new(descriptor: Arc<DescriptorType>, reporter: Arc<StatusReporter>) -> Self {
        Self {
            descriptor,
            reporter,
        }
    }

    pub fn descriptor(&self) -> &Arc<DescriptorType> {
        &self.descriptor
    }

    pub fn tag(&self) -> &str {
        self.descriptor.tag()
    }

    pub fn responds_to(&self, operation: &str) -> bool {
        self.descriptor.responds_to(operation)
    }

    /// Run a plain operation. Failures propagate.
    pub fn call(&self, operation: &str) -> CommandResult {
        self.call_with(operation, None)
    }

    /// Run a plain operation with an argument passed through to the recipe
    pub fn call_with(&self, operation: &str, arg: Option<CommandValue>) -> CommandResult {
        let recipe = self
            .descriptor
            .resolve(operation)
            .ok_or_else(|| CommandError::unsupported(self.descriptor.name(), operation))?;

        debug!(descriptor = self.descriptor.name(), operation, "Running recipe");
        recipe(self, arg)
    }

    /// Run a token that is either a declared name or `<action>!`
    pub fn dispatch(&self, token: &str) -> CommandResult {
        self.dispatch_with(token, None)
    }

    pub fn dispatch_with(&self, token: &str, arg: Option<CommandValue>) -> CommandResult {
        // Names declared verbatim, bang included, win over the reporting form
        if self.responds_to(token) {
            return self.call_with(token, arg);
        }

        let request = OperationRequest::parse_instance(token)
            .map_err(|_| CommandError::unsupported(self.descriptor.name(), token))?;

        if request.reporting {
            self.call_reporting_with(&request.name, arg)
        } else {
            self.call_with(&request.name, arg)
        }
    }

    /// Run `action`, print its status line and return its value.
    ///
    /// Failures of the action become `Nil`. The only error is for an action
    /// that does not exist or is a predicate.
    pub fn call_reporting(&self, action: &str) -> CommandResult {
        self.call_reporting_with(action, None)
    }

    pub fn call_reporting_with(&self, action: &str, arg: Option<CommandValue>) -> CommandResult {
        if action.ends_with('?') || !self.responds_to(action) {
            return Err(CommandError::unsupported(
                self.descriptor.name(),
                format!("{action}!"),
            ));
        }

        let outcome = self.call_with(action, arg);
        self.reporter.report(self.tag(), action, &outcome);

        Ok(outcome.unwrap_or_default())
    }

    /// Result of the `redis` recipe
    pub fn redis(&self) -> CommandResult<Arc<dyn RedisConnection>> {
        self.call(REDIS)?.as_connection(REDIS)
    }

    /// Result of the `client` recipe
    pub fn client(&self) -> CommandResult<Arc<dyn RedisClient>> {
        self.call(CLIENT)?.as_client(CLIENT)
    }

    pub fn is_connected(&self) -> CommandResult<bool> {
        self.call(CONNECTED)?.as_bool(CONNECTED)
    }

    pub fn reconnect(&self) -> CommandResult<bool> {
        self.call(RECONNECT)?.as_bool(RECONNECT)
    }

    pub fn quit(&self) -> CommandResult {
        self.call(QUIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection;
    use crate::error::ConnectionError;
    use parking_lot::Mutex;
    use serial_test::serial;
    use std::any::Any;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    #[derive(Default)]
    struct FakeClient {
        connected: AtomicBool,
    }

    impl RedisClient for FakeClient {
        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }

        fn reconnect(&self) -> Result<(), ConnectionError> {
            self.connected.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeConnection {
        client: Arc<FakeClient>,
    }

    impl RedisConnection for FakeConnection {
        fn client(&self) -> Arc<dyn RedisClient> {
            self.client.clone()
        }

        fn quit(&self) -> Result<(), ConnectionError> {
            self.client.connected.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn instance(descriptor: DescriptorType) -> (DescriptorInstance, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let reporter = Arc::new(StatusReporter::with_writer(buffer.clone()));
        (
            DescriptorInstance::new(Arc::new(descriptor), reporter),
            buffer,
        )
    }

    fn with_connection(descriptor: DescriptorType, conn: Arc<FakeConnection>) -> DescriptorType {
        descriptor.with(REDIS, move |_, _| Ok(CommandValue::Connection(conn.clone())))
    }

    #[test]
    fn test_default_lifecycle_through_overridden_redis() {
        let conn = Arc::new(FakeConnection::default());
        let (instance, _) = instance(with_connection(
            DescriptorType::new("CacheStoreGodredis"),
            conn.clone(),
        ));

        assert!(!instance.is_connected().unwrap());
        assert!(instance.reconnect().unwrap());
        assert!(instance.is_connected().unwrap());
        assert_eq!(instance.quit().unwrap(), CommandValue::Bool(true));
        assert!(!conn.client.is_connected());
    }

    #[test]
    fn test_connected_matches_client() {
        let conn = Arc::new(FakeConnection::default());
        conn.client.connected.store(true, Ordering::SeqCst);
        let (instance, _) = instance(with_connection(DescriptorType::new("ObjectsGodredis"), conn));

        assert_eq!(
            instance.is_connected().unwrap(),
            instance.client().unwrap().is_connected()
        );
    }

    #[test]
    fn test_unknown_operation_is_unsupported() {
        let (instance, _) = instance(DescriptorType::new("SidekiqRedis"));
        let err = instance.call("flushall").unwrap_err();
        assert_eq!(err, CommandError::unsupported("SidekiqRedis", "flushall"));
    }

    #[test]
    fn test_reporting_returns_raw_value_and_prints_status() {
        let (instance, buffer) = instance(
            DescriptorType::new("ObjectsGodredis")
                .with("del_some_key", |_, _| Ok(CommandValue::Integer(3))),
        );

        let value = instance.dispatch("del_some_key!").unwrap();
        assert_eq!(value, CommandValue::Integer(3));
        assert_eq!(buffer.contents(), "Redis [objects]: del_some_key... 3\n");
    }

    #[test]
    fn test_reporting_swallows_failures() {
        let (instance, buffer) = instance(
            DescriptorType::new("SidekiqRedis")
                .with(QUIT, |_, _| Err(ConnectionError::Closed.into())),
        );

        assert_eq!(instance.call_reporting(QUIT).unwrap(), CommandValue::Nil);
        assert_eq!(buffer.contents(), "Redis [sidekiq]: quit... [FAIL]\n");
        assert!(instance.quit().is_err());
    }

    #[test]
    fn test_reporting_rejects_predicates_and_unknown_actions() {
        let (instance, buffer) = instance(DescriptorType::new("SidekiqRedis"));

        assert!(instance.dispatch("connected?!").unwrap_err().is_unsupported());
        assert!(instance.dispatch("flushall!").unwrap_err().is_unsupported());
        assert!(instance.call_reporting("connected?").unwrap_err().is_unsupported());
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_verbatim_bang_name_is_not_reporting() {
        let (instance, buffer) = instance(
            DescriptorType::new("SidekiqRedis").with("reset!", |_, _| Ok(CommandValue::Integer(1))),
        );

        assert_eq!(instance.dispatch("reset!").unwrap(), CommandValue::Integer(1));
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_argument_is_passed_through() {
        let (instance, _) = instance(DescriptorType::new("SidekiqRedis").with(
            "echo",
            |_, arg| Ok(arg.unwrap_or_default()),
        ));

        assert_eq!(
            instance.call_with("echo", Some("hello".into())).unwrap(),
            CommandValue::from("hello")
        );
        assert_eq!(instance.call("echo").unwrap(), CommandValue::Nil);
    }

    #[test]
    #[serial]
    fn test_default_redis_uses_current_connection() {
        let (instance, buffer) = instance(DescriptorType::new("CacheStoreGodredis"));

        connection::clear_current();
        assert!(matches!(instance.redis(), Err(CommandError::NoCurrentConnection)));
        assert_eq!(instance.call_reporting(QUIT).unwrap(), CommandValue::Nil);

        connection::set_current(Arc::new(FakeConnection::default()));
        assert!(instance.reconnect().unwrap());
        assert_eq!(instance.call_reporting(RECONNECT).unwrap(), CommandValue::Bool(true));
        connection::clear_current();

        assert_eq!(
            buffer.contents(),
            "Redis [cache_store]: quit... [FAIL]\nRedis [cache_store]: reconnect... [OK]\n"
        );
    }
}
