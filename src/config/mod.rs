pub mod loader;
pub mod registry_config;

// Re-export commonly used types
pub use loader::ConfigLoader;
pub use registry_config::{PartialRegistryConfig, RegistryConfig};

pub use registry_config::{
    CONFIG_FILE_NAME, ENV_COLLECT_STATS, ENV_LOG_OPERATIONS, ENV_WARN_ON_OVERWRITE,
};
