//! # Command Values
//!
//! Values produced by recipes. Lifecycle recipes return booleans, the handle
//! recipes (`redis`, `client`) return connection handles, and custom recipes
//! are free to return counts or identifiers.

use crate::connection::{RedisClient, RedisConnection};
use crate::error::{CommandError, CommandResult};
use std::fmt;
use std::sync::Arc;

/// Result of running a recipe
#[derive(Clone, Default)]
pub enum CommandValue {
    #[default]
    Nil,
    Bool(bool),
    Integer(i64),
    Text(String),
    Connection(Arc<dyn RedisConnection>),
    Client(Arc<dyn RedisClient>),
}

impl CommandValue {
    /// Short name of the variant, used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Connection(_) => "connection",
            Self::Client(_) => "client",
        }
    }

    /// Extract a boolean produced by `operation`
    pub fn as_bool(&self, operation: &str) -> CommandResult<bool> {
        match self {
            Self::Bool(value) => Ok(*value),
            other => Err(CommandError::type_mismatch(operation, "boolean", other.kind())),
        }
    }

    /// Extract the connection handle produced by `operation`
    pub fn as_connection(&self, operation: &str) -> CommandResult<Arc<dyn RedisConnection>> {
        match self {
            Self::Connection(conn) => Ok(Arc::clone(conn)),
            other => Err(CommandError::type_mismatch(
                operation,
                "connection",
                other.kind(),
            )),
        }
    }

    /// Extract the client handle produced by `operation`
    pub fn as_client(&self, operation: &str) -> CommandResult<Arc<dyn RedisClient>> {
        match self {
            Self::Client(client) => Ok(Arc::clone(client)),
            other => Err(CommandError::type_mismatch(operation, "client", other.kind())),
        }
    }
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Connection(_) => f.write_str("#<connection>"),
            Self::Client(_) => f.write_str("#<client>"),
        }
    }
}

impl fmt::Debug for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::Connection(_) => f.write_str("Connection(<Arc<dyn RedisConnection>>)"),
            Self::Client(_) => f.write_str("Client(<Arc<dyn RedisClient>>)"),
        }
    }
}

/// Handles compare by identity
impl PartialEq for CommandValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Connection(a), Self::Connection(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Self::Client(a), Self::Client(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl From<bool> for CommandValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CommandValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for CommandValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CommandValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<CommandValue>> From<Option<T>> for CommandValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
