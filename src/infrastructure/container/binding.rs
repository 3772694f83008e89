//! 提供方与使用方绑定
//!
//! `Provided<T>` 持有一个值，并在每次赋值后把它重新注册到固定的键上；
//! `Inject<T>` 只记住键，每次读取都重新解析，从不缓存。
//! 解析推迟到读取时，所以两个对象可以互相引用对方注册的名称，与构造顺序无关。

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::key::Key;
use super::registry::Registry;
use crate::errors::ContainerError;

/// 提供方绑定：值的每次变更都会写回注册表
pub struct Provided<T> {
    registry: Registry,
    key: Key,
    value: Option<Arc<T>>,
}

impl<T: Send + Sync + 'static> Provided<T> {
    /// 按类型绑定并立即注册初始值
    ///
    /// `T` 为 `Option<Foo>` 时键是 `Option<Foo>`，按 `Foo` 解析不到；
    /// 可选值请用 `Provided::optional`。
    pub fn new(registry: &Registry, value: T) -> Self {
        Self::bind(registry, Key::of::<T>(), Some(Arc::new(value)))
    }

    /// 按名称绑定并立即注册初始值
    pub fn named(registry: &Registry, name: impl Into<String>, value: T) -> Self {
        Self::bind(registry, Key::named(name), Some(Arc::new(value)))
    }

    /// 绑定可选值，键取内部类型 `T`
    pub fn optional(registry: &Registry, value: Option<T>) -> Self {
        Self::bind(registry, Key::of::<T>(), value.map(Arc::new))
    }

    pub fn named_optional(registry: &Registry, name: impl Into<String>, value: Option<T>) -> Self {
        Self::bind(registry, Key::named(name), value.map(Arc::new))
    }

    fn bind(registry: &Registry, key: Key, value: Option<Arc<T>>) -> Self {
        let provided = Self {
            registry: registry.clone(),
            key,
            value,
        };
        provided.publish();
        provided
    }

    /// 赋新值并重新注册
    pub fn set(&mut self, value: T) {
        self.replace(Some(value));
    }

    /// 替换当前值并重新注册，返回旧值；`None` 注册为空值
    pub fn replace(&mut self, value: Option<T>) -> Option<Arc<T>> {
        let previous = std::mem::replace(&mut self.value, value.map(Arc::new));
        self.publish();
        previous
    }

    /// 把绑定的值置空，键仍保留在注册表中
    pub fn clear(&mut self) -> Option<Arc<T>> {
        self.replace(None)
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_deref()
    }

    /// 当前值的共享引用，与注册表中保存的是同一个实例
    pub fn shared(&self) -> Option<Arc<T>> {
        self.value.clone()
    }

    /// 绑定时确定、之后不变的键
    pub fn key(&self) -> &Key {
        &self.key
    }

    fn publish(&self) {
        self.registry.register_at(self.key.clone(), self.value.clone());
    }
}

impl<T: fmt::Debug> fmt::Debug for Provided<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provided")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

/// 使用方绑定：每次读取都从注册表重新解析
pub struct Inject<T> {
    registry: Registry,
    key: Key,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: Send + Sync + 'static> Inject<T> {
    /// 按类型 `T` 解析
    pub fn by_type(registry: &Registry) -> Self {
        Self::with_key(registry, Key::of::<T>())
    }

    /// 按名称解析
    pub fn named(registry: &Registry, name: impl Into<String>) -> Self {
        Self::with_key(registry, Key::named(name))
    }

    /// 有名称时按名称解析，否则按类型
    pub fn with_name(registry: &Registry, name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::named(registry, name),
            None => Self::by_type(registry),
        }
    }

    pub fn with_key(registry: &Registry, key: Key) -> Self {
        Self {
            registry: registry.clone(),
            key,
            _marker: PhantomData,
        }
    }

    /// 读取当前注册的实例；缺失、空值或类型不符时返回 `None`
    pub fn get(&self) -> Option<Arc<T>> {
        self.registry.resolve_key(&self.key)
    }

    pub fn try_get(&self) -> Result<Arc<T>, ContainerError> {
        self.registry.try_resolve_key(&self.key)
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

impl<T: Clone + Send + Sync + 'static> Inject<T> {
    /// 读取并克隆当前实例
    pub fn get_cloned(&self) -> Option<T> {
        self.get().map(|value| T::clone(&value))
    }
}

impl<T> Clone for Inject<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;

    #[derive(Debug, Clone, PartialEq)]
    struct StructB {
        result: String,
    }

    fn registry() -> Registry {
        Registry::with_config(RegistryConfig::quiet())
    }

    #[test]
    fn test_provided_registers_on_bind() {
        let registry = registry();
        let provided = Provided::new(
            &registry,
            StructB {
                result: "B".to_string(),
            },
        );

        assert_eq!(provided.key(), &Key::of::<StructB>());
        assert_eq!(provided.get().unwrap().result, "B");
        assert_eq!(registry.resolve::<StructB>().unwrap().result, "B");
    }

    #[test]
    fn test_provided_shares_instance_with_registry() {
        let registry = registry();
        let provided = Provided::named(&registry, "answer", 42u32);

        let resolved = registry.resolve_named::<u32>("answer").unwrap();
        assert!(Arc::ptr_eq(&resolved, &provided.shared().unwrap()));
    }

    #[test]
    fn test_inject_reads_latest_value() {
        let registry = registry();
        let mut provided = Provided::new(
            &registry,
            StructB {
                result: "B".to_string(),
            },
        );
        let injected = Inject::<StructB>::by_type(&registry);

        assert_eq!(injected.get().unwrap().result, "B");

        provided.set(StructB {
            result: "UpdatedB".to_string(),
        });
        assert_eq!(injected.get().unwrap().result, "UpdatedB");
    }

    #[test]
    fn test_replace_returns_previous() {
        let registry = registry();
        let mut provided = Provided::named(&registry, "n", 1i32);

        let previous = provided.replace(Some(2));
        assert_eq!(previous.as_deref(), Some(&1));
        assert_eq!(provided.get(), Some(&2));
    }

    #[test]
    fn test_clear_registers_absence() {
        let registry = registry();
        let mut provided = Provided::optional(&registry, Some(5u16));
        let injected = Inject::<u16>::by_type(&registry);
        assert_eq!(injected.get_cloned(), Some(5));

        provided.clear();
        assert!(provided.get().is_none());
        assert!(injected.get().is_none());
        assert!(matches!(injected.try_get(), Err(ContainerError::Empty { .. })));
    }

    #[test]
    fn test_provided_new_with_option_keeps_wrapper() {
        let registry = registry();
        let provided = Provided::new(&registry, Some(2u64));

        assert_eq!(provided.key(), &Key::of::<Option<u64>>());
        assert!(registry.resolve::<u64>().is_none());
        assert_eq!(*registry.resolve::<Option<u64>>().unwrap(), Some(2));

        let _inner = Provided::optional(&registry, Some(3u64));
        assert_eq!(registry.resolve_cloned::<u64>(), Some(3));
    }

    #[test]
    fn test_named_optional_binding() {
        let registry = registry();
        let mut provided = Provided::<String>::named_optional(&registry, "maybe", None);
        let injected = Inject::<String>::named(&registry, "maybe");

        assert_eq!(provided.key(), &Key::named("maybe"));
        assert!(registry.contains_key(&Key::named("maybe")));
        assert!(matches!(injected.try_get(), Err(ContainerError::Empty { .. })));

        provided.set("now".to_string());
        assert_eq!(injected.get_cloned().as_deref(), Some("now"));
    }

    #[test]
    fn test_inject_with_name_falls_back_to_type() {
        let registry = registry();
        registry.register(3u8);
        registry.register_named("three", 30u8);

        assert_eq!(Inject::<u8>::with_name(&registry, None).get_cloned(), Some(3));
        assert_eq!(
            Inject::<u8>::with_name(&registry, Some("three")).get_cloned(),
            Some(30)
        );
        assert!(Inject::<u8>::with_name(&registry, Some("")).get().is_none());
    }

    #[test]
    fn test_inject_before_provide() {
        let registry = registry();
        let injected = Inject::<String>::named(&registry, "late");
        assert!(injected.get().is_none());

        let _provided = Provided::named(&registry, "late", "here".to_string());
        assert_eq!(injected.get_cloned().as_deref(), Some("here"));
    }
}
