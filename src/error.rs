//! # Error Types
//!
//! Structured error handling for godredis using thiserror.
//!
//! Errors are split by where they originate:
//!
//! - [`ConnectionError`] - failures raised by the wrapped Redis client itself
//! - [`CommandError`] - failures resolving or running a recipe
//! - [`ConfigurationError`](crate::config::ConfigurationError) - configuration loading
//!
//! [`GodredisError`] unifies all of them for callers that only want one type.

use crate::config::ConfigurationError;
use thiserror::Error;

/// Failures reported by the underlying Redis-like client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Connection closed")]
    Closed,

    #[error("Connection I/O error: {message}")]
    Io { message: String },

    #[error("Protocol error: {message}")]
    Protocol { message: String },
}

impl ConnectionError {
    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Failures resolving or executing a command against a descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unsupported operation '{operation}' for {descriptor}")]
    UnsupportedOperation {
        descriptor: String,
        operation: String,
    },

    #[error("No current Redis connection installed")]
    NoCurrentConnection,

    #[error("Operation '{operation}' expected {expected}, got {found}")]
    TypeMismatch {
        operation: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Recipe '{operation}' failed: {message}")]
    Recipe { operation: String, message: String },
}

impl CommandError {
    /// Create an unsupported operation error
    pub fn unsupported(descriptor: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            descriptor: descriptor.into(),
            operation: operation.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        operation: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            operation: operation.into(),
            expected,
            found,
        }
    }

    /// Create a recipe failure
    pub fn recipe(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Recipe {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True when the error means "no such operation" rather than a runtime failure
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum GodredisError {
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type CommandResult<T = crate::value::CommandValue> = std::result::Result<T, CommandError>;
pub type Result<T> = std::result::Result<T, GodredisError>;
