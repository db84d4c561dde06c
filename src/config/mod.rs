//! # Godredis Configuration
//!
//! Small, layered configuration for the status reporter and logging.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. `config/godredis.yaml`
//! 3. `config/godredis.<environment>.yaml`
//! 4. `GODREDIS__*` environment variables, e.g. `GODREDIS__REPORT__LABEL=Cache`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use godredis::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! println!("status label: {}", manager.config().report.label);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GodredisConfig {
    /// Status line output
    pub report: ReportConfig,

    /// Diagnostic logging
    pub logging: LoggingConfig,
}

/// Status-reporting settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Leading word of every status line
    pub label: String,
    /// When false, reporting operations still run but print nothing
    pub enabled: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            label: "Redis".to_string(),
            enabled: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `godredis=debug`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GodredisConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.report.label.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "report.label",
                &self.report.label,
                "status label cannot be empty",
            ));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigurationError::invalid_value("logging.level", &self.logging.level, e.to_string())
        })?;

        Ok(())
    }
}
