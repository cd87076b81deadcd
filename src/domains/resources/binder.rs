//! Dependency binder used for assisted parameters and resource construction.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::object::Instance;
use crate::core::{Error, Result};

/// Resolves a key to an instance.
pub trait Binder: Send + Sync {
    /// Resolve `key`, failing with [`Error::Unbound`] when no binding exists.
    fn resolve(&self, key: &str) -> Result<Instance>;
}

type Provider = Arc<dyn Fn(&Injector) -> Result<Instance> + Send + Sync>;

#[derive(Clone)]
enum Binding {
    Instance(Instance),
    Provider(Provider),
}

/// A small string-keyed binder.
///
/// Bindings are set up while building the injector and never change after it
/// is shared.
#[derive(Clone, Default)]
pub struct Injector {
    bindings: HashMap<String, Binding>,
}

impl Injector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to a shared instance.
    pub fn bind_instance<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.bindings
            .insert(key.into(), Binding::Instance(Arc::new(value)));
        self
    }

    /// Bind `key` to a provider invoked on every resolution.
    pub fn bind_provider<T, F>(mut self, key: impl Into<String>, provider: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Injector) -> Result<T> + Send + Sync + 'static,
    {
        let provider: Provider =
            Arc::new(move |injector| provider(injector).map(|v| Arc::new(v) as Instance));
        self.bindings.insert(key.into(), Binding::Provider(provider));
        self
    }

    /// Whether `key` has a binding.
    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Resolve and downcast `key`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        self.resolve(key)?
            .downcast::<T>()
            .map_err(|_| Error::unbound(format!("{} as {}", key, std::any::type_name::<T>())))
    }
}

impl Binder for Injector {
    fn resolve(&self, key: &str) -> Result<Instance> {
        match self.bindings.get(key) {
            Some(Binding::Instance(instance)) => Ok(instance.clone()),
            Some(Binding::Provider(provider)) => {
                debug!("Providing instance for {}", key);
                provider(self)
            }
            None => Err(Error::unbound(key)),
        }
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.bindings.keys().collect();
        keys.sort();
        f.debug_struct("Injector").field("bindings", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_instance_is_shared() {
        let injector = Injector::new().bind_instance("dsn", "sqlite::memory:".to_string());
        let a = injector.resolve("dsn").unwrap();
        let b = injector.resolve("dsn").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*injector.get::<String>("dsn").unwrap(), "sqlite::memory:");
    }

    #[test]
    fn test_provider_can_use_other_bindings() {
        let injector = Injector::new()
            .bind_instance("prefix", "user".to_string())
            .bind_provider("table", |injector| {
                let prefix = injector.get::<String>("prefix")?;
                Ok(format!("{}_table", prefix))
            });
        assert_eq!(*injector.get::<String>("table").unwrap(), "user_table");
    }

    #[test]
    fn test_missing_binding_is_unbound() {
        let injector = Injector::new();
        assert!(!injector.contains("db"));
        match injector.resolve("db") {
            Err(Error::Unbound { key }) => assert_eq!(key, "db"),
            _ => panic!("Expected unbound error"),
        }
    }

    #[test]
    fn test_type_mismatch_is_unbound() {
        let injector = Injector::new().bind_instance("port", 8080_u16);
        assert!(matches!(
            injector.get::<String>("port"),
            Err(Error::Unbound { .. })
        ));
    }
}
