use std::{collections::HashMap, env, fs, path::Path, path::PathBuf};

use crate::errors::ConfigError;

use super::registry_config::{
    PartialConfigFile, PartialRegistryConfig, RegistryConfig, CONFIG_FILE_NAME,
    ENV_COLLECT_STATS, ENV_LOG_OPERATIONS, ENV_WARN_ON_OVERWRITE,
};

const CONFIG_DIR_NAME: &str = "injection-kit";

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    base_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default paths
    pub fn new() -> Self {
        Self { base_path: None }
    }

    /// Create a config loader with custom base path (for testing)
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
        }
    }

    /// Load complete registry configuration
    pub fn load_config(&self) -> Result<RegistryConfig, ConfigError> {
        self.load_config_with_env(self.collect_env_vars())
    }

    /// Load configuration using an explicit environment map
    pub fn load_config_with_env(
        &self,
        env_map: HashMap<String, String>,
    ) -> Result<RegistryConfig, ConfigError> {
        let partial = match self.config_path() {
            Some(path) => self.load_partial_config(&path)?,
            None => None,
        };

        RegistryConfig::from_partial_and_env(partial, env_map)
    }

    /// Parse configuration from a TOML string (no environment overrides)
    pub fn load_from_str(&self, content: &str) -> Result<RegistryConfig, ConfigError> {
        let partial = parse_partial("<inline>", content)?;
        Ok(RegistryConfig::from_partial(partial))
    }

    /// Location of the configuration file, if one can be determined
    pub fn config_path(&self) -> Option<PathBuf> {
        match &self.base_path {
            Some(base_path) => Some(base_path.join(CONFIG_FILE_NAME)),
            None => dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
        }
    }

    /// Load the partial config; a missing file is not an error
    fn load_partial_config(
        &self,
        config_path: &Path,
    ) -> Result<Option<PartialRegistryConfig>, ConfigError> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No registry config file, using defaults");
            return Ok(None);
        }

        let display = config_path.to_string_lossy().to_string();
        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::FileRead(display.clone(), e))?;

        parse_partial(&display, &content)
    }

    /// Collect relevant environment variables
    fn collect_env_vars(&self) -> HashMap<String, String> {
        let env_keys = [ENV_LOG_OPERATIONS, ENV_WARN_ON_OVERWRITE, ENV_COLLECT_STATS];

        let mut env_map = HashMap::new();
        for key in &env_keys {
            if let Ok(value) = env::var(key) {
                env_map.insert(key.to_string(), value);
            }
        }
        env_map
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_partial(source: &str, content: &str) -> Result<Option<PartialRegistryConfig>, ConfigError> {
    let file: PartialConfigFile =
        toml::from_str(content).map_err(|e| ConfigError::TomlParse(source.to_string(), e))?;
    Ok(file.registry)
}
