//! 错误类型
//!
//! 默认的解析接口从不返回错误（缺失即 `None`），
//! 这里的类型服务于 `try_resolve*` 这一组快速失败接口以及配置加载。

use crate::infrastructure::container::Key;
use thiserror::Error;

/// 库的统一错误类型
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// 解析失败的具体原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// 键从未注册
    #[error("Nothing registered for {key}")]
    NotRegistered { key: Key },
    /// 键存在，但注册的是显式的空值
    #[error("{key} is registered with an empty value")]
    Empty { key: Key },
    /// 键存在，但实例类型与请求的类型不一致
    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: Key,
        expected: &'static str,
        actual: &'static str,
    },
    /// 名称为空
    #[error("Registration name must not be empty")]
    InvalidName,
}

impl ContainerError {
    /// 是否属于“找不到”一类（未注册或空值）
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            ContainerError::NotRegistered { .. } | ContainerError::Empty { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },
}
