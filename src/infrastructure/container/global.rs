//! 全局注册表
//!
//! 首次访问时创建，进程结束前一直存在。需要隔离的场景（尤其是测试）
//! 应当自己创建 `Registry` 并显式传递。

use lazy_static::lazy_static;
use std::sync::Arc;

use super::registry::Registry;

lazy_static! {
    static ref GLOBAL_REGISTRY: Registry = Registry::new();
}

/// 获取全局注册表
pub fn global_registry() -> Registry {
    GLOBAL_REGISTRY.clone()
}

/// 在全局注册表中按类型注册
pub fn register_global<T: Send + Sync + 'static>(value: T) {
    GLOBAL_REGISTRY.register(value);
}

/// 在全局注册表中按名称注册
pub fn register_global_named<T: Send + Sync + 'static>(name: impl Into<String>, value: T) {
    GLOBAL_REGISTRY.register_named(name, value);
}

/// 从全局注册表按类型解析
pub fn resolve_global<T: Send + Sync + 'static>() -> Option<Arc<T>> {
    GLOBAL_REGISTRY.resolve()
}

/// 从全局注册表按名称解析
pub fn resolve_global_named<T: Send + Sync + 'static>(name: &str) -> Option<Arc<T>> {
    GLOBAL_REGISTRY.resolve_named(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct GlobalOnlyService {
        value: i32,
    }

    #[test]
    fn test_global_registry() {
        register_global(GlobalOnlyService { value: 100 });

        let service = resolve_global::<GlobalOnlyService>().unwrap();
        assert_eq!(service.value, 100);
        assert!(global_registry().is_registered::<GlobalOnlyService>());
    }

    #[test]
    fn test_global_named() {
        register_global_named("global-test-name", vec![1u8, 2]);

        let values = resolve_global_named::<Vec<u8>>("global-test-name").unwrap();
        assert_eq!(*values, vec![1, 2]);
        assert!(resolve_global_named::<Vec<u8>>("").is_none());
    }
}
