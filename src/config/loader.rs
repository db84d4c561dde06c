//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles YAML file discovery,
//! environment detection, and merging with environment variables.

use super::error::ConfigResult;
use super::GodredisConfig;
use ::config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const CONFIG_FILE_STEM: &str = "godredis";
const ENV_PREFIX: &str = "GODREDIS";

/// Loaded configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: GodredisConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, environment)?;
        config.validate()?;

        debug!(
            "Configuration loaded successfully: {}",
            serde_json::to_string(&config).unwrap_or_else(|_| "[serialization error]".to_string())
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Load configuration, falling back to defaults when loading fails
    pub fn load_or_default() -> Arc<ConfigManager> {
        Self::load().unwrap_or_else(|e| {
            warn!("Falling back to default configuration: {}", e);
            Arc::new(Self::fallback())
        })
    }

    pub fn config(&self) -> &GodredisConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// JSON view of the loaded configuration
    pub fn debug_config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn fallback() -> ConfigManager {
        ConfigManager {
            config: GodredisConfig::default(),
            environment: Self::detect_environment(),
            config_directory: Self::default_config_directory(),
        }
    }

    fn load_and_merge_config(
        config_directory: &Path,
        environment: &str,
    ) -> ConfigResult<GodredisConfig> {
        let base = config_directory.join(format!("{CONFIG_FILE_STEM}.yaml"));
        let overlay = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.yaml"));

        for path in [&base, &overlay] {
            if path.is_file() {
                debug!("Found configuration file: {}", path.display());
            }
        }

        let settings = Config::builder()
            .add_source(File::from(base).required(false))
            .add_source(File::from(overlay).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Detect current environment
    pub fn detect_environment() -> String {
        crate::logging::get_environment()
    }

    fn default_config_directory() -> PathBuf {
        PathBuf::from("config")
    }
}
