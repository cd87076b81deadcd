//! Adapters turning a URI into a resource instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::uri::ResourceUri;
use crate::core::{Error, Result};
use crate::domains::resources::{Binder, ResourceDefinition, ResourceObject};

/// Produces the resource object for a URI within one (scheme, host).
pub trait Adapter: Send + Sync {
    fn get(&self, uri: &ResourceUri) -> Result<Arc<dyn ResourceObject>>;
}

type Constructor = Arc<dyn Fn(&dyn Binder) -> Result<Arc<dyn ResourceObject>> + Send + Sync>;

/// Registry of constructible resource types by fully qualified name.
#[derive(Clone, Default)]
pub struct ResourceCatalog {
    constructors: HashMap<String, Constructor>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `R` under [`ResourceDefinition::NAME`].
    pub fn add<R: ResourceDefinition>(self) -> Self {
        self.register(R::NAME, |binder| {
            Ok(Arc::new(R::build(binder)?) as Arc<dyn ResourceObject>)
        })
    }

    /// Register an arbitrary constructor under `name`.
    pub fn register<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&dyn Binder) -> Result<Arc<dyn ResourceObject>> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct `name`; `None` if no such type is registered.
    pub fn build(&self, name: &str, binder: &dyn Binder) -> Option<Result<Arc<dyn ResourceObject>>> {
        self.constructors.get(name).map(|constructor| constructor(binder))
    }
}

impl fmt::Debug for ResourceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCatalog")
            .field("names", &self.names())
            .finish()
    }
}

/// Maps a URI path onto a type name under `namespace` and constructs it
/// through the binder.
pub struct AppAdapter {
    binder: Arc<dyn Binder>,
    catalog: Arc<ResourceCatalog>,
    namespace: String,
}

impl AppAdapter {
    pub fn new(binder: Arc<dyn Binder>, catalog: Arc<ResourceCatalog>, namespace: impl Into<String>) -> Self {
        Self {
            binder,
            catalog,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fully qualified type name for `uri`.
    pub fn type_name(&self, uri: &ResourceUri) -> String {
        format!("{}::{}", self.namespace, uri.type_path())
    }
}

impl Adapter for AppAdapter {
    fn get(&self, uri: &ResourceUri) -> Result<Arc<dyn ResourceObject>> {
        let name = self.type_name(uri);
        debug!("Resolving {} to {}", uri, name);
        self.catalog
            .build(&name, self.binder.as_ref())
            .unwrap_or_else(|| Err(Error::not_found(uri.as_str())))
    }
}

type Provider = Arc<dyn Fn(&ResourceUri) -> Result<Arc<dyn ResourceObject>> + Send + Sync>;

/// Delegates construction to a provider, ignoring the path.
#[derive(Clone)]
pub struct ProviderAdapter {
    provider: Provider,
}

impl ProviderAdapter {
    /// Always hand out the same instance.
    pub fn instance(resource: Arc<dyn ResourceObject>) -> Self {
        Self::from_fn(move |_| Ok(resource.clone()))
    }

    /// Call `provider` for every lookup.
    pub fn from_fn<F>(provider: F) -> Self
    where
        F: Fn(&ResourceUri) -> Result<Arc<dyn ResourceObject>> + Send + Sync + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }
}

impl Adapter for ProviderAdapter {
    fn get(&self, uri: &ResourceUri) -> Result<Arc<dyn ResourceObject>> {
        (self.provider)(uri)
    }
}
