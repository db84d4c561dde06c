//! # Structured Logging Module
//!
//! Environment-aware structured logging. Diagnostics go to stderr so that
//! stdout only carries status lines from reporting operations.

use crate::config::LoggingConfig;
use chrono::Utc;
use std::io;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific defaults
pub fn init_structured_logging() {
    let environment = get_environment();
    let config = LoggingConfig {
        level: get_log_level(&environment).to_string(),
        json: false,
    };
    init_logging_with(&config);
}

/// Initialize structured logging from configuration. Only the first call has any effect.
pub fn init_logging_with(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

        let (plain, json) = if config.json {
            (
                None,
                Some(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                ),
            )
        } else {
            (
                Some(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(true),
                ),
                None,
            )
        };

        // Another subscriber may already be installed by the host
        if tracing_subscriber::registry()
            .with(filter)
            .with(plain)
            .with(json)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            log_level = %config.level,
            json = config.json,
            "Structured logging initialized"
        );
    });
}

/// Current environment from environment variables
pub(crate) fn get_environment() -> String {
    std::env::var("GODREDIS_ENV")
        .or_else(|_| std::env::var("RAILS_ENV"))
        .or_else(|_| std::env::var("RACK_ENV"))
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Log level based on environment
pub(crate) fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for registry operations
pub fn log_registry_operation(
    operation: &str,
    descriptor: &str,
    tag: &str,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        descriptor = %descriptor,
        tag = %tag,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}

/// Log structured data for bulk dispatch
pub fn log_dispatch_operation(
    operation: &str,
    descriptors: usize,
    status: &str,
    details: Option<&str>,
) {
    tracing::debug!(
        operation = %operation,
        descriptors = descriptors,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "DISPATCH_OPERATION"
    );
}
