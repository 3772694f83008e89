//! injection-kit: a small dependency-injection registry.
//!
//! Instances are registered under their type or under an explicit name and
//! resolved again later. `Provided<T>` re-registers its value on every
//! assignment; `Inject<T>` resolves on every read.
//!
//! ```
//! use injection_kit::{Inject, Provided, Registry};
//!
//! let registry = Registry::new();
//! let mut numbers = Provided::named(&registry, "luckynumbers", vec![1, 2, 3, 4]);
//! let injected = Inject::<Vec<i32>>::named(&registry, "luckynumbers");
//!
//! assert_eq!(injected.get_cloned(), Some(vec![1, 2, 3, 4]));
//! numbers.set(vec![5, 6, 7, 8]);
//! assert_eq!(injected.get_cloned(), Some(vec![5, 6, 7, 8]));
//! ```

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::{ConfigLoader, RegistryConfig};
pub use errors::{ContainerError, InjectionError};
pub use infrastructure::container::{
    global_registry, register_global, register_global_named, resolve_global, resolve_global_named,
};
pub use infrastructure::{Inject, Key, Provided, Registry, RegistryStats};
