//! 依赖注入容器
//!
//! - [`Registry`]：键到实例的并发映射
//! - [`Provided`] / [`Inject`]：提供方与使用方绑定
//! - [`global_registry`]：进程级的默认注册表

pub mod binding;
pub mod global;
pub mod key;
pub mod registry;

pub use binding::{Inject, Provided};
pub use global::{
    global_registry, register_global, register_global_named, resolve_global, resolve_global_named,
};
pub use key::{Key, TypeKey};
pub use registry::{Registry, RegistryStats};
