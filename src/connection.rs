//! # Connection Seam
//!
//! The Redis client wrapped by godredis is an external collaborator. Descriptors
//! only ever talk to it through the two traits in this module, so any client
//! (a real driver, a pooled handle, a test fake) can be plugged in.
//!
//! The process-wide "current" connection backs the default `redis` recipe for
//! descriptors that do not override it.

use crate::error::ConnectionError;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// A Redis connection handle, as returned by the `redis` recipe
pub trait RedisConnection: Send + Sync {
    /// Lower-level client behind this connection
    fn client(&self) -> Arc<dyn RedisClient>;

    /// Terminate the connection
    fn quit(&self) -> Result<(), ConnectionError>;

    /// Access to the concrete type for custom recipes
    fn as_any(&self) -> &dyn Any;
}

/// The low-level client, as returned by the `client` recipe
pub trait RedisClient: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Drop the socket and connect again
    fn reconnect(&self) -> Result<(), ConnectionError>;
}

static CURRENT: RwLock<Option<Arc<dyn RedisConnection>>> = parking_lot::const_rwlock(None);

/// Install the process-wide current connection, returning the previous one
pub fn set_current(connection: Arc<dyn RedisConnection>) -> Option<Arc<dyn RedisConnection>> {
    debug!("Installing current Redis connection");
    CURRENT.write().replace(connection)
}

/// The process-wide current connection, if one is installed
pub fn current() -> Option<Arc<dyn RedisConnection>> {
    CURRENT.read().clone()
}

/// Remove the current connection
pub fn clear_current() -> Option<Arc<dyn RedisConnection>> {
    CURRENT.write().take()
}
