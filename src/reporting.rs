//! # Status Reporting
//!
//! Reporting ("banged") operations run a plain operation, never fail because of
//! it, and write one line describing the outcome:
//!
//! ```text
//! Redis [cache_store]: reconnect... [OK]
//! Redis [sidekiq]: quit... [FAIL]
//! Redis [objects]: del_some_key... 3
//! ```
//!
//! Booleans get `[OK]`/`[FAIL]` framing. Any other value prints its display
//! form, except `Nil` and failures which print `[FAIL]`.

use crate::config::ReportConfig;
use crate::error::CommandResult;
use crate::value::CommandValue;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use tracing::warn;

/// Short outcome token printed at the end of a status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
    Value(String),
}

impl Status {
    pub fn from_outcome(outcome: &CommandResult) -> Self {
        match outcome {
            Ok(CommandValue::Bool(true)) => Self::Ok,
            Ok(CommandValue::Bool(false)) | Ok(CommandValue::Nil) | Err(_) => Self::Fail,
            Ok(value) => Self::Value(value.to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("[OK]"),
            Self::Fail => f.write_str("[FAIL]"),
            Self::Value(value) => f.write_str(value),
        }
    }
}

/// Writes status lines to a sink, stdout by default
pub struct StatusReporter {
    label: String,
    enabled: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl StatusReporter {
    /// Reporter printing to stdout with the default label
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Reporter printing to any writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        let defaults = ReportConfig::default();
        Self {
            label: defaults.label,
            enabled: defaults.enabled,
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// Reporter printing to stdout, configured
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::stdout()
            .with_label(config.label.clone())
            .with_enabled(config.enabled)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn format_line(&self, tag: &str, action: &str, status: &Status) -> String {
        format!("{} [{}]: {}... {}", self.label, tag, action, status)
    }

    /// Write the status line for `outcome` and return the status it mapped to
    pub fn report(&self, tag: &str, action: &str, outcome: &CommandResult) -> Status {
        let status = Status::from_outcome(outcome);

        if self.enabled {
            let line = self.format_line(tag, action, &status);
            let mut sink = self.sink.lock();
            if let Err(e) = writeln!(sink, "{line}").and_then(|_| sink.flush()) {
                warn!(tag = tag, action = action, "Failed to write status line: {}", e);
            }
        }

        status
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for StatusReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusReporter")
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .finish()
    }
}
