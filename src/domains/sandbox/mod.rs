//! Sandbox application.
//!
//! A small resource application used by the CLI and the test suite. It
//! registers `app://self` and `page://self` through [`AppAdapter`] plus two
//! provider schemes, `nop://self` and `prov://self`.
//!
//! ## Adding a New Resource
//!
//! 1. Implement `ResourceObject` and `ResourceDefinition` in the file of its namespace
//! 2. Name it `Sandbox::Resource::App::...` or `Sandbox::Resource::Page::...`
//!    after the URI path it answers
//! 3. Add it to [`catalog`]

mod app;
mod page;
mod provider;
mod rparam;

use std::sync::Arc;

use crate::core::Result;
use crate::domains::factory::{AppAdapter, ProviderAdapter, ResourceCatalog, SchemeCollection};
use crate::domains::resources::{Binder, ResourceObject};

pub use app::{Account, Blog, Book, Database, FactoryNews, Order, Session, User};
pub use page::{HelloWorld, Index, PageNews, STORAGE_KEY, Storage, Unbound};
pub use provider::{NopResource, ProvidedResource};
pub use rparam::{Cycle, Greeting, Login};

/// Type namespace of `app://self`.
pub const APP_NAMESPACE: &str = "Sandbox::Resource::App";

/// Type namespace of `page://self`.
pub const PAGE_NAMESPACE: &str = "Sandbox::Resource::Page";

/// Every constructible sandbox resource.
pub fn catalog() -> ResourceCatalog {
    ResourceCatalog::new()
        .add::<User>()
        .add::<Order>()
        .add::<Book>()
        .add::<Blog>()
        .add::<FactoryNews>()
        .add::<Account>()
        .add::<Session>()
        .add::<Login>()
        .add::<Greeting>()
        .add::<Cycle>()
        .add::<Index>()
        .add::<PageNews>()
        .add::<HelloWorld>()
        .add::<Unbound>()
}

/// The sandbox's scheme table, constructing app and page resources through `binder`.
pub fn schemes(binder: Arc<dyn Binder>) -> Result<SchemeCollection> {
    let catalog = Arc::new(catalog());
    let nop: Arc<dyn ResourceObject> = Arc::new(NopResource);

    SchemeCollection::new()
        .register(
            "app",
            "self",
            Arc::new(AppAdapter::new(binder.clone(), catalog.clone(), APP_NAMESPACE)),
        )?
        .register(
            "page",
            "self",
            Arc::new(AppAdapter::new(binder, catalog, PAGE_NAMESPACE)),
        )?
        .register("nop", "self", Arc::new(ProviderAdapter::instance(nop)))?
        .register(
            "prov",
            "self",
            Arc::new(ProviderAdapter::from_fn(|uri| {
                Ok(Arc::new(ProvidedResource::new(uri.path())) as Arc<dyn ResourceObject>)
            })),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_live_under_namespaces() {
        let catalog = catalog();
        for name in catalog.names() {
            assert!(
                name.starts_with(APP_NAMESPACE) || name.starts_with(PAGE_NAMESPACE),
                "{} is outside the sandbox namespaces",
                name
            );
        }
        assert!(catalog.contains("Sandbox::Resource::App::Rparam::Greeting"));
    }

    #[test]
    fn test_schemes_registered() {
        let binder: Arc<dyn Binder> = Arc::new(crate::domains::resources::Injector::new());
        let pairs = schemes(binder).unwrap().schemes();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("prov".to_string(), "self".to_string())));
    }
}
