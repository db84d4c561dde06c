//! Shared fakes for integration tests: an in-memory Redis connection and a
//! capturing status sink.

#![allow(dead_code)]

pub mod strategies;

use godredis::registry::DescriptorRegistry;
use godredis::{
    CommandValue, ConnectionError, DescriptorType, Dispatcher, RedisClient, RedisConnection,
    StatusReporter,
};
use parking_lot::Mutex;
use std::any::Any;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory client that counts reconnects
#[derive(Debug, Default)]
pub struct FakeClient {
    connected: AtomicBool,
    reconnects: AtomicUsize,
    fail_reconnect: AtomicBool,
}

impl FakeClient {
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn fail_reconnects(&self) {
        self.fail_reconnect.store(true, Ordering::SeqCst);
    }

    pub fn reconnects(&self) -> usize {
        self.reconnects.load(Ordering::SeqCst)
    }
}

impl RedisClient for FakeClient {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn reconnect(&self) -> Result<(), ConnectionError> {
        self.reconnects.fetch_add(1, Ordering::SeqCst);
        if self.fail_reconnect.load(Ordering::SeqCst) {
            return Err(ConnectionError::io("connection refused"));
        }
        self.set_connected(true);
        Ok(())
    }
}

/// In-memory connection with a key count for custom recipes
#[derive(Debug, Default)]
pub struct FakeConnection {
    pub client: Arc<FakeClient>,
    quits: AtomicUsize,
    fail_quit: AtomicBool,
    pub keys: Mutex<Vec<String>>,
}

impl FakeConnection {
    pub fn connected() -> Arc<Self> {
        let conn = Arc::new(Self::default());
        conn.client.set_connected(true);
        conn
    }

    pub fn failing_quit() -> Arc<Self> {
        let conn = Self::connected();
        conn.fail_quit.store(true, Ordering::SeqCst);
        conn
    }

    pub fn quits(&self) -> usize {
        self.quits.load(Ordering::SeqCst)
    }

    /// Remove `key`, returning how many keys were removed
    pub fn del(&self, key: &str) -> i64 {
        let mut keys = self.keys.lock();
        let before = keys.len();
        keys.retain(|k| k != key);
        (before - keys.len()) as i64
    }
}

impl RedisConnection for FakeConnection {
    fn client(&self) -> Arc<dyn RedisClient> {
        self.client.clone()
    }

    fn quit(&self) -> Result<(), ConnectionError> {
        self.quits.fetch_add(1, Ordering::SeqCst);
        if self.fail_quit.load(Ordering::SeqCst) {
            return Err(ConnectionError::Closed);
        }
        self.client.set_connected(false);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Cloneable writer capturing status lines
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("status lines are utf-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Descriptor whose `redis` recipe returns `conn`
pub fn descriptor_for(name: &str, conn: &Arc<FakeConnection>) -> DescriptorType {
    let conn = Arc::clone(conn);
    DescriptorType::new(name).with("redis", move |_, _| {
        Ok(CommandValue::Connection(conn.clone()))
    })
}

/// Dispatcher over a fresh registry, capturing status lines
pub fn dispatcher() -> (Dispatcher, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let reporter = Arc::new(StatusReporter::with_writer(buffer.clone()));
    (
        Dispatcher::new(Arc::new(DescriptorRegistry::new()), reporter),
        buffer,
    )
}
