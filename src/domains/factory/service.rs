//! Resource factory service.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::scheme::SchemeCollection;
use super::uri::ResourceUri;
use crate::core::{Error, Result};
use crate::domains::resources::ResourceObject;

/// Creates resource instances from URIs.
#[derive(Debug, Clone)]
pub struct Factory {
    schemes: SchemeCollection,
}

impl Factory {
    pub fn new(schemes: SchemeCollection) -> Self {
        Self { schemes }
    }

    pub fn schemes(&self) -> &SchemeCollection {
        &self.schemes
    }

    /// Parse `uri` and build the resource it names.
    #[instrument(skip(self))]
    pub fn new_instance(&self, uri: &str) -> Result<Arc<dyn ResourceObject>> {
        self.instance_for(&ResourceUri::parse(uri)?)
    }

    /// Like [`Factory::new_instance`] for an untyped value; only strings are URIs.
    pub fn new_instance_from_value(&self, uri: &Value) -> Result<Arc<dyn ResourceObject>> {
        match uri {
            Value::String(uri) => self.new_instance(uri),
            other => Err(Error::uri(other.to_string(), "a resource URI must be a string")),
        }
    }

    /// Build the resource for an already parsed URI.
    pub fn instance_for(&self, uri: &ResourceUri) -> Result<Arc<dyn ResourceObject>> {
        self.schemes.lookup(uri.scheme(), uri.host())?.get(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::{Binder, Injector};
    use crate::domains::sandbox::{self, NopResource, ProvidedResource};
    use serde_json::json;
    use std::any::type_name;

    fn factory() -> Factory {
        let binder: Arc<dyn Binder> = Arc::new(Injector::new());
        Factory::new(sandbox::schemes(binder).unwrap())
    }

    fn type_of(uri: &str) -> String {
        factory().new_instance(uri).unwrap().type_name().to_string()
    }

    #[test]
    fn test_new_instance_nop() {
        assert_eq!(type_of("nop://self/path/to/dummy"), type_name::<NopResource>());
    }

    #[test]
    fn test_new_instance_provider() {
        assert_eq!(type_of("prov://self/path/to/dummy"), type_name::<ProvidedResource>());
    }

    #[test]
    fn test_new_instance_app() {
        assert_eq!(
            type_of("app://self/factory/news"),
            type_name::<sandbox::FactoryNews>()
        );
    }

    #[test]
    fn test_new_instance_page() {
        assert_eq!(type_of("page://self/news"), type_name::<sandbox::PageNews>());
    }

    #[test]
    fn test_new_instance_index() {
        assert_eq!(type_of("page://self/"), type_name::<sandbox::Index>());
    }

    #[test]
    fn test_new_instance_hyphenated_path() {
        assert_eq!(type_of("page://self/hello-world"), type_name::<sandbox::HelloWorld>());
    }

    #[test]
    fn test_new_instance_scheme_exception() {
        assert!(matches!(
            factory().new_instance("bad://self/news"),
            Err(Error::Scheme(_))
        ));
    }

    #[test]
    fn test_new_instance_invalid_host() {
        assert!(matches!(
            factory().new_instance("app://invalid_host/news"),
            Err(Error::Scheme(_))
        ));
    }

    #[test]
    fn test_invalid_uri() {
        assert!(matches!(
            factory().new_instance("invalid_uri"),
            Err(Error::Uri { .. })
        ));
    }

    #[test]
    fn test_invalid_object_uri() {
        assert!(matches!(
            factory().new_instance_from_value(&json!(["page://self/news"])),
            Err(Error::Uri { .. })
        ));
        assert!(factory().new_instance_from_value(&json!("page://self/news")).is_ok());
    }

    #[test]
    fn test_resource_not_found() {
        match factory().new_instance("page://self/not_found_XXXX") {
            Err(Error::ResourceNotFound { uri }) => assert_eq!(uri, "page://self/not_found_XXXX"),
            _ => panic!("Expected resource not found"),
        }
    }

    #[test]
    fn test_unbound_dependency() {
        assert!(matches!(
            factory().new_instance("page://self/unbound"),
            Err(Error::Unbound { .. })
        ));
    }

    #[test]
    fn test_query_does_not_affect_type() {
        assert_eq!(type_of("app://self/user?id=1#name"), type_name::<sandbox::User>());
    }
}
