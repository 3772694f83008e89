//! 注册表的键
//!
//! 类型键以 `TypeId` 作为身份，`type_name` 仅用于日志和错误信息；
//! 命名键由调用方提供。两者位于不同的命名空间，不会相互遮蔽。

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 由类型推导出的键
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// 推导 `T` 的类型键
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// 完整的类型名称（含模块路径）
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// 是否为 `Option<_>`；这类键通常意味着调用方应改用 `*_optional` 接口
    pub fn is_option(&self) -> bool {
        is_option_type_name(self.name)
    }
}

pub(crate) fn is_option_type_name(name: &str) -> bool {
    name.starts_with("core::option::Option<")
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

/// 注册表键：类型键或命名键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Type(TypeKey),
    Named(String),
}

impl Key {
    /// `T` 的类型键
    ///
    /// 可选包装需要由调用方剥离：`Option<Foo>` 的值应通过
    /// `register_optional` 注册，从而落在 `Key::of::<Foo>()` 上。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Key::Type(TypeKey::of::<T>())
    }

    /// 命名键，不做任何规范化（不转换大小写，不加前缀）
    pub fn named(name: impl Into<String>) -> Self {
        Key::Named(name.into())
    }

    /// 从可选名称构造命名键；`None` 或空字符串返回 `None`
    pub fn from_name(name: Option<&str>) -> Option<Self> {
        match name {
            Some(name) if !name.is_empty() => Some(Key::named(name)),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Key::Named(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Key::Named(name) => Some(name),
            Key::Type(_) => None,
        }
    }

    /// 用于日志的简短描述
    pub fn describe(&self) -> &str {
        match self {
            Key::Type(key) => key.type_name(),
            Key::Named(name) => name,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Type(key) => write!(f, "type '{}'", key.type_name()),
            Key::Named(name) => write!(f, "name '{}'", name),
        }
    }
}

impl From<TypeKey> for Key {
    fn from(key: TypeKey) -> Self {
        Key::Type(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Foo;
    trait Greeter {}

    #[test]
    fn test_type_key_is_stable() {
        assert_eq!(Key::of::<Foo>(), Key::of::<Foo>());
        assert_ne!(Key::of::<Foo>(), Key::of::<Option<Foo>>());
        assert_ne!(Key::of::<Vec<i32>>(), Key::of::<Vec<i64>>());
    }

    #[test]
    fn test_trait_object_keys() {
        let key = Key::of::<std::sync::Arc<dyn Greeter + Send + Sync>>();
        assert!(key.describe().contains("Greeter"));
        assert!(!key.is_named());
    }

    #[test]
    fn test_named_and_type_keys_do_not_collide() {
        let type_key = Key::of::<Foo>();
        let named = Key::named(type_key.describe().to_string());

        let mut set = HashSet::new();
        set.insert(type_key);
        set.insert(named);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_option_type_detection() {
        assert!(TypeKey::of::<Option<Foo>>().is_option());
        assert!(TypeKey::of::<Option<Vec<i32>>>().is_option());
        assert!(!TypeKey::of::<Foo>().is_option());
        assert!(!TypeKey::of::<Vec<Option<Foo>>>().is_option());
    }

    #[test]
    fn test_from_name_rejects_empty() {
        assert_eq!(Key::from_name(None), None);
        assert_eq!(Key::from_name(Some("")), None);
        assert_eq!(Key::from_name(Some("C")), Some(Key::named("C")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::named("X").to_string(), "name 'X'");
        assert_eq!(Key::of::<u32>().to_string(), "type 'u32'");
        assert_eq!(Key::named("X").name(), Some("X"));
        assert_eq!(Key::of::<u32>().name(), None);
    }
}
