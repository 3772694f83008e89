//! 依赖注入注册表
//!
//! 以键（类型或名称）保存实例，供 `Provided` / `Inject` 以及直接调用方使用：
//! - 注册总是成功，同一个键的新值覆盖旧值
//! - 默认解析接口只返回 `Option`，缺失、空值、类型不符都表现为 `None`
//! - `try_resolve*` 区分上述三种情况，适合在组合根做快速失败校验

use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::key::{is_option_type_name, Key};
use crate::config::RegistryConfig;
use crate::errors::ContainerError;

type Instance = Arc<dyn Any + Send + Sync>;

/// 键对应的存储槽
#[derive(Clone)]
enum Slot {
    /// 已注册的实例
    Present {
        instance: Instance,
        type_name: &'static str,
    },
    /// 显式注册的空值：键存在，但没有实例
    Empty,
}

impl Slot {
    fn from_arc<T: Send + Sync + 'static>(value: Option<Arc<T>>) -> Self {
        match value {
            Some(instance) => Slot::Present {
                instance,
                type_name: std::any::type_name::<T>(),
            },
            None => Slot::Empty,
        }
    }

    fn is_present(&self) -> bool {
        matches!(self, Slot::Present { .. })
    }
}

/// 依赖注入注册表
///
/// 克隆开销很小，所有克隆共享同一张表。
#[derive(Clone)]
pub struct Registry {
    /// 键到实例的映射 - 使用DashMap提供并发安全
    entries: Arc<DashMap<Key, Slot>>,
    /// 统计信息（内部原子计数器）
    stats: Arc<InnerStats>,
    config: Arc<RegistryConfig>,
}

/// 内部统计信息（原子计数器）
#[derive(Default)]
struct InnerStats {
    registrations: AtomicUsize,
    total_resolutions: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Registry {
    /// 使用默认配置创建注册表
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// 使用给定配置创建注册表
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            stats: Arc::new(InnerStats::default()),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// 按值的类型注册实例，覆盖已有的同类型实例
    ///
    /// 传入 `Option<Foo>` 时键是 `Option<Foo>` 而不是 `Foo`，之后
    /// `resolve::<Foo>()` 找不到它（会记录一条警告）。可选值请用 `register_optional`。
    pub fn register<T: Send + Sync + 'static>(&self, value: T) {
        self.register_arc(Arc::new(value));
    }

    /// 按名称注册实例
    pub fn register_named<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) {
        self.register_named_arc(name, Arc::new(value));
    }

    /// 注册已共享的实例
    pub fn register_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        self.register_at(Key::of::<T>(), Some(value));
    }

    pub fn register_named_arc<T: Send + Sync + 'static>(
        &self,
        name: impl Into<String>,
        value: Arc<T>,
    ) {
        self.register_at(Key::named(name), Some(value));
    }

    /// 注册可选值，键取内部类型 `T`（`Option<T>` 的包装被剥离）
    ///
    /// `None` 会注册一个空值：键保留，解析结果为 `None`。
    pub fn register_optional<T: Send + Sync + 'static>(&self, value: Option<T>) {
        self.register_at(Key::of::<T>(), value.map(Arc::new));
    }

    pub fn register_named_optional<T: Send + Sync + 'static>(
        &self,
        name: impl Into<String>,
        value: Option<T>,
    ) {
        self.register_at(Key::named(name), value.map(Arc::new));
    }

    /// 在指定键上注册实例或空值
    pub fn register_at<T: Send + Sync + 'static>(&self, key: Key, value: Option<Arc<T>>) {
        let type_name = std::any::type_name::<T>();
        if matches!(&key, Key::Named(name) if name.is_empty()) {
            tracing::warn!(
                type_name,
                "Registering under an empty name; the entry cannot be resolved by name"
            );
        }

        if is_option_type_name(type_name) {
            tracing::warn!(
                key = %key,
                type_name,
                "Registering an Option value as-is; use register_optional to register under the inner type"
            );
        }

        let slot = Slot::from_arc(value);
        let present = slot.is_present();

        if self.config.log_operations {
            tracing::debug!(key = %key, present, "Registering instance");
        }

        let previous = self.entries.insert(key.clone(), slot);

        if self.config.warn_on_overwrite && previous.as_ref().is_some_and(Slot::is_present) {
            tracing::warn!(key = %key, "Replacing a registered instance");
        }

        if self.config.collect_stats {
            self.stats.registrations.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 按类型解析实例
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.try_resolve().ok()
    }

    /// 按名称解析实例；空名称直接返回 `None`
    pub fn resolve_named<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.try_resolve_named(name).ok()
    }

    pub fn resolve_key<T: Send + Sync + 'static>(&self, key: &Key) -> Option<Arc<T>> {
        self.try_resolve_key(key).ok()
    }

    /// 按类型解析并克隆出实例
    ///
    /// 以 `Arc<dyn Trait>` 注册的 trait 对象可以借此直接取回 `Arc<dyn Trait>`。
    pub fn resolve_cloned<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.resolve::<T>().map(|value| T::clone(&value))
    }

    pub fn resolve_named_cloned<T: Clone + Send + Sync + 'static>(&self, name: &str) -> Option<T> {
        self.resolve_named::<T>(name).map(|value| T::clone(&value))
    }

    /// 按类型解析，失败时给出原因
    pub fn try_resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
        self.try_resolve_key(&Key::of::<T>())
    }

    pub fn try_resolve_named<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Arc<T>, ContainerError> {
        if name.is_empty() {
            return Err(ContainerError::InvalidName);
        }
        self.try_resolve_key(&Key::named(name))
    }

    /// 按键解析 - 主要API
    pub fn try_resolve_key<T: Send + Sync + 'static>(
        &self,
        key: &Key,
    ) -> Result<Arc<T>, ContainerError> {
        if matches!(key, Key::Named(name) if name.is_empty()) {
            return Err(ContainerError::InvalidName);
        }

        // 只在锁内克隆 Arc，类型转换放到锁外
        let slot = self.entries.get(key).map(|entry| entry.value().clone());

        let result = match slot {
            None => Err(ContainerError::NotRegistered { key: key.clone() }),
            Some(Slot::Empty) => Err(ContainerError::Empty { key: key.clone() }),
            Some(Slot::Present {
                instance,
                type_name,
            }) => instance
                .downcast::<T>()
                .map_err(|_| ContainerError::TypeMismatch {
                    key: key.clone(),
                    expected: std::any::type_name::<T>(),
                    actual: type_name,
                }),
        };

        self.record_resolution(key, &result);
        result
    }

    fn record_resolution<T>(&self, key: &Key, result: &Result<Arc<T>, ContainerError>) {
        if self.config.collect_stats {
            self.stats.total_resolutions.fetch_add(1, Ordering::Relaxed);
            let counter = if result.is_ok() {
                &self.stats.hits
            } else {
                &self.stats.misses
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }

        if self.config.log_operations {
            match result {
                Ok(_) => tracing::debug!(key = %key, "Resolved instance"),
                Err(e) => tracing::debug!(key = %key, reason = %e, "Resolution yielded nothing"),
            }
        }
    }

    /// 键是否存在（包括注册为空值的键）
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// 类型 `T` 是否已注册
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.contains_key(&Key::of::<T>())
    }

    /// 移除键；返回键之前是否存在
    pub fn unregister(&self, key: &Key) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed && self.config.log_operations {
            tracing::debug!(key = %key, "Unregistered");
        }
        removed
    }

    /// 当前所有键（顺序不定）
    pub fn keys(&self) -> Vec<Key> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空所有注册项，统计信息保留
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> RegistryStats {
        RegistryStats {
            registrations: self.stats.registrations.load(Ordering::Relaxed),
            total_resolutions: self.stats.total_resolutions.load(Ordering::Relaxed),
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}

/// 注册表统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub registrations: usize,
    pub total_resolutions: usize,
    pub hits: usize,
    pub misses: usize,
}

impl RegistryStats {
    /// 获取总解析次数
    pub fn total(&self) -> usize {
        self.total_resolutions
    }

    /// 获取命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.hits as f64 / self.total() as f64
        }
    }
}
