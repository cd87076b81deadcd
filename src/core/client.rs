//! Resource client.
//!
//! The client is the entry point applications use: it resolves a URI through
//! the [`Factory`], builds a [`Request`] and hands it to the [`Invoker`]. It
//! also serves the nested `GET`s that resource-bound parameters issue.

use std::sync::{Arc, Weak};

use tracing::{debug, info};

use super::config::ResourcesConfig;
use super::error::{Error, Result};
use crate::domains::factory::{Factory, ResourceUri};
use crate::domains::invoker::Invoker;
use crate::domains::params::{
    ArrayCache, DeclaredMetadataReader, MetadataReader, NamedParameter, ParamCache, SubRequest,
    VoidCache,
};
use crate::domains::resources::{
    Binder, Query, Request, ResourceObject, Response, Verb, WebContext,
};

/// Facade combining the factory and the invoker.
pub struct ResourceClient {
    factory: Factory,
    invoker: Invoker,
    max_depth: usize,
}

impl ResourceClient {
    /// Create a client with the stock metadata reader and the cache chosen by
    /// `config.cache_metadata`.
    pub fn new(factory: Factory, binder: Arc<dyn Binder>, config: &ResourcesConfig) -> Arc<Self> {
        let cache: Arc<dyn ParamCache> = if config.cache_metadata {
            Arc::new(ArrayCache::new())
        } else {
            Arc::new(VoidCache)
        };
        Self::with_collaborators(factory, binder, cache, Arc::new(DeclaredMetadataReader), config)
    }

    /// Create a client with an explicit spec cache and metadata reader.
    pub fn with_collaborators(
        factory: Factory,
        binder: Arc<dyn Binder>,
        cache: Arc<dyn ParamCache>,
        reader: Arc<dyn MetadataReader>,
        config: &ResourcesConfig,
    ) -> Arc<Self> {
        info!(
            "Resource client ready ({} scheme(s), sub-request depth {})",
            factory.schemes().schemes().len(),
            config.max_sub_request_depth
        );
        let max_depth = config.max_sub_request_depth;
        Arc::new_cyclic(|client: &Weak<Self>| {
            let sub_request: Weak<dyn SubRequest> = client.clone();
            let params = NamedParameter::new(cache, reader, binder).with_sub_request(sub_request);
            Self {
                factory,
                invoker: Invoker::new(params),
                max_depth,
            }
        })
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    pub fn new_instance(&self, uri: &str) -> Result<Arc<dyn ResourceObject>> {
        self.factory.new_instance(uri)
    }

    pub fn get(&self, uri: &str) -> Result<Response> {
        self.request(Verb::Get, uri)
    }

    pub fn options(&self, uri: &str) -> Result<Response> {
        self.request(Verb::Options, uri)
    }

    /// Issue `verb` on `uri` with only the URI's own query and no ambient context.
    pub fn request(&self, verb: Verb, uri: &str) -> Result<Response> {
        self.request_with(verb, uri, Query::new(), Arc::new(WebContext::new()))
    }

    /// Issue `verb` on `uri`. `query` is merged over the URI's query string.
    pub fn request_with(
        &self,
        verb: Verb,
        uri: &str,
        query: Query,
        context: Arc<WebContext>,
    ) -> Result<Response> {
        self.dispatch(verb, uri, query, context, &[])
    }

    fn dispatch(
        &self,
        verb: Verb,
        uri: &str,
        query: Query,
        context: Arc<WebContext>,
        enclosing: &[String],
    ) -> Result<Response> {
        let parsed = ResourceUri::parse(uri)?;
        let target = self.factory.instance_for(&parsed)?;

        let mut merged = parsed.query().clone();
        merged.extend(query);

        let mut trail = enclosing.to_vec();
        trail.push(uri.to_string());

        let request = Request::new(target, verb, merged)
            .with_context(context)
            .with_trail(trail);
        self.invoker.invoke(&request)
    }
}

impl SubRequest for ResourceClient {
    fn get(&self, uri: &str, origin: &Request) -> Result<Response> {
        let trail = origin.trail();
        if trail.iter().any(|enclosing| enclosing == uri) || trail.len() >= self.max_depth {
            return Err(Error::CyclicRequest {
                uri: uri.to_string(),
            });
        }

        debug!("Sub-request GET {} at depth {}", uri, trail.len());
        self.dispatch(
            Verb::Get,
            uri,
            Query::new(),
            origin.shared_context().clone(),
            trail,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::{
        ContextSource, Injector, InterceptedResource, TracingInterceptor,
    };
    use crate::domains::sandbox::{self, Database, STORAGE_KEY, Storage};
    use serde_json::{Value, json};

    fn client_with(binder: Injector, config: ResourcesConfig) -> Arc<ResourceClient> {
        let binder: Arc<dyn Binder> = Arc::new(binder);
        let factory = Factory::new(sandbox::schemes(binder.clone()).unwrap());
        ResourceClient::new(factory, binder, &config)
    }

    fn client() -> Arc<ResourceClient> {
        client_with(Injector::new(), ResourcesConfig::default())
    }

    fn query(value: Value) -> Query {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_get_with_uri_query() {
        let response = client().get("app://self/user?id=1").unwrap();
        assert_eq!(
            response.body,
            json!({"id": 2, "name": "Aramis", "age": 16, "blog_id": 12})
        );
    }

    #[test]
    fn test_explicit_query_wins_over_uri_query() {
        let response = client()
            .request_with(
                Verb::Post,
                "app://self/user?id=1&name=uri",
                query(json!({"name": "explicit"})),
                Arc::new(WebContext::new()),
            )
            .unwrap();
        assert_eq!(response.body, json!("post user[1 explicit 99]"));
    }

    #[test]
    fn test_resource_param() {
        let response = client().get("app://self/rparam/greeting").unwrap();
        assert_eq!(response.body, json!({"name": "guest"}));
    }

    #[test]
    fn test_templated_resource_param() {
        let response = client()
            .request(Verb::Post, "app://self/rparam/greeting?name=koriym")
            .unwrap();
        assert_eq!(response.body, json!({"id": "nick:koriym", "name": "koriym"}));
    }

    #[test]
    fn test_cyclic_resource_param() {
        match client().get("app://self/rparam/cycle") {
            Err(Error::CyclicRequest { uri }) => assert_eq!(uri, "app://self/rparam/cycle"),
            other => panic!("Expected cyclic request, got {:?}", other),
        }
    }

    #[test]
    fn test_sub_request_depth_limit() {
        let config = ResourcesConfig {
            max_sub_request_depth: 1,
            ..ResourcesConfig::default()
        };
        // greeting -> login needs a trail of two URIs.
        let err = client_with(Injector::new(), config)
            .get("app://self/rparam/greeting")
            .unwrap_err();
        assert!(matches!(err, Error::CyclicRequest { .. }));
    }

    #[test]
    fn test_options() {
        let response = client().options("app://self/restbucks/order").unwrap();
        assert_eq!(response.header("allow"), Some("get, post"));
    }

    #[test]
    fn test_created_status_and_header() {
        let response = client()
            .request(Verb::Post, "app://self/restbucks/order?drink=latte")
            .unwrap();
        assert_eq!(response.code, 201);
        assert_eq!(response.header("location"), Some("app://self/restbucks/order?id=1"));
    }

    #[test]
    fn test_assisted_parameter_from_binder() {
        let binder = Injector::new().bind_instance(
            "db",
            Database {
                dsn: "sqlite::memory:".to_string(),
            },
        );
        let response = client_with(binder, ResourcesConfig::default())
            .get("app://self/account?id=7")
            .unwrap();
        assert_eq!(response.body, json!({"id": 7, "dsn": "sqlite::memory:"}));
    }

    #[test]
    fn test_assisted_parameter_unbound() {
        let err = client().get("app://self/account?id=7&db=x").unwrap_err();
        assert!(matches!(err, Error::Unbound { ref key } if key == "db"));
        assert_eq!(err.code(), 500);
    }

    #[test]
    fn test_web_context_parameters() {
        let context = WebContext::new().with(ContextSource::Cookie, "token", json!("abc"));
        let response = client()
            .request_with(Verb::Get, "app://self/session", Query::new(), Arc::new(context))
            .unwrap();
        assert_eq!(response.body, json!({"token": "abc", "lang": "en"}));

        let err = client().get("app://self/session").unwrap_err();
        assert!(matches!(err, Error::Parameter { ref name, .. } if name == "token"));
    }

    #[test]
    fn test_unbound_resource_construction() {
        assert!(matches!(
            client().get("page://self/unbound"),
            Err(Error::Unbound { .. })
        ));

        let binder = Injector::new().bind_instance(
            STORAGE_KEY,
            Storage {
                label: "memory".to_string(),
            },
        );
        let response = client_with(binder, ResourcesConfig::default())
            .get("page://self/unbound")
            .unwrap();
        assert_eq!(response.body, json!({"storage": "memory"}));
    }

    #[test]
    fn test_uncached_client_behaves_the_same() {
        let config = ResourcesConfig {
            cache_metadata: false,
            ..ResourcesConfig::default()
        };
        let client = client_with(Injector::new(), config);
        for _ in 0..2 {
            let response = client.get("app://self/rparam/greeting").unwrap();
            assert_eq!(response.body, json!({"name": "guest"}));
        }
    }

    #[test]
    fn test_method_not_allowed() {
        let err = client().request(Verb::Delete, "app://self/user?id=1").unwrap_err();
        assert_eq!(err.code(), 405);
    }

    #[test]
    fn test_page_index() {
        let response = client().get("page://self/").unwrap();
        assert_eq!(response.body, json!({"greeting": "welcome"}));
    }

    #[test]
    fn test_traced_resource_through_invoker() {
        let book = InterceptedResource::new(Arc::new(sandbox::Book))
            .bind_all(vec![Arc::new(TracingInterceptor)]);
        assert_eq!(book.methods().len(), 1);
        let request = Request::new(Arc::new(book), Verb::Get, query(json!({"id": 3})));
        let response = client().invoker().invoke(&request).unwrap();
        assert_eq!(response.body, json!("book id[3]"));
    }
}
