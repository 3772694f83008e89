use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::ConfigError;

// Configuration file name
pub const CONFIG_FILE_NAME: &str = "injection-kit.toml";

// Environment overrides
pub const ENV_LOG_OPERATIONS: &str = "INJECTION_KIT_LOG_OPERATIONS";
pub const ENV_WARN_ON_OVERWRITE: &str = "INJECTION_KIT_WARN_ON_OVERWRITE";
pub const ENV_COLLECT_STATS: &str = "INJECTION_KIT_COLLECT_STATS";

/// Configuration for a registry instance
///
/// Parsed through `PartialRegistryConfig`; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Emit a debug event for every register / resolve
    pub log_operations: bool,

    /// Emit a warning when a present value is replaced
    pub warn_on_overwrite: bool,

    /// Maintain registration / resolution counters
    pub collect_stats: bool,
}

/// Partial Registry Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialRegistryConfig {
    pub log_operations: Option<bool>,
    pub warn_on_overwrite: Option<bool>,
    pub collect_stats: Option<bool>,
}

/// The on-disk layout: settings live under a `[registry]` table
#[derive(Deserialize, Debug, Default)]
pub(crate) struct PartialConfigFile {
    pub registry: Option<PartialRegistryConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            log_operations: default_log_operations(),
            warn_on_overwrite: default_warn_on_overwrite(),
            collect_stats: default_collect_stats(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self, ConfigError> {
        super::ConfigLoader::new().load_config()
    }

    /// Create RegistryConfig from partial config with defaults
    pub fn from_partial(partial: Option<PartialRegistryConfig>) -> Self {
        let partial = partial.unwrap_or_default();

        Self {
            log_operations: partial.log_operations.unwrap_or_else(default_log_operations),
            warn_on_overwrite: partial
                .warn_on_overwrite
                .unwrap_or_else(default_warn_on_overwrite),
            collect_stats: partial.collect_stats.unwrap_or_else(default_collect_stats),
        }
    }

    /// Create RegistryConfig from partial config, then apply environment overrides
    pub fn from_partial_and_env(
        partial: Option<PartialRegistryConfig>,
        env_map: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::from_partial(partial);

        if let Some(value) = env_map.get(ENV_LOG_OPERATIONS) {
            config.log_operations = parse_bool(ENV_LOG_OPERATIONS, value)?;
        }
        if let Some(value) = env_map.get(ENV_WARN_ON_OVERWRITE) {
            config.warn_on_overwrite = parse_bool(ENV_WARN_ON_OVERWRITE, value)?;
        }
        if let Some(value) = env_map.get(ENV_COLLECT_STATS) {
            config.collect_stats = parse_bool(ENV_COLLECT_STATS, value)?;
        }

        Ok(config)
    }

    /// Quiet configuration used by tests and benchmarks
    pub fn quiet() -> Self {
        Self {
            log_operations: false,
            warn_on_overwrite: false,
            collect_stats: true,
        }
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

// Default functions
fn default_log_operations() -> bool {
    true
}

fn default_warn_on_overwrite() -> bool {
    false
}

fn default_collect_stats() -> bool {
    true
}
