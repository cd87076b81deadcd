//! Resources under `page://self`.

use std::sync::Arc;

use serde_json::json;

use crate::core::{Error, Result};
use crate::domains::resources::{
    Args, Binder, MethodSignature, ResourceDefinition, ResourceObject, Response, Verb,
};

/// Implements a page whose only method is a `GET` returning `$body`.
macro_rules! static_page {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl ResourceObject for $ty {
            fn methods(&self) -> Vec<MethodSignature> {
                vec![MethodSignature::new(Verb::Get)]
            }

            fn call(&self, verb: Verb, _args: &Args) -> Result<Response> {
                match verb {
                    Verb::Get => Ok($body.into()),
                    _ => Err(Error::method_not_allowed(verb, self.type_name())),
                }
            }
        }

        impl ResourceDefinition for $ty {
            const NAME: &'static str = $name;

            fn build(_binder: &dyn Binder) -> Result<Self> {
                Ok($ty)
            }
        }
    };
}

static_page!(
    /// `page://self/` and `page://self/index`
    Index,
    "Sandbox::Resource::Page::Index",
    json!({"greeting": "welcome"})
);

static_page!(
    /// `page://self/news`
    PageNews,
    "Sandbox::Resource::Page::News",
    json!({"headline": "page news"})
);

static_page!(
    /// `page://self/hello-world`
    HelloWorld,
    "Sandbox::Resource::Page::HelloWorld",
    json!("Hello World")
);

/// Storage service a page may depend on.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    pub label: String,
}

/// `page://self/unbound`: cannot be built unless the binder provides `Sandbox::Storage`.
#[derive(Debug, Clone)]
pub struct Unbound {
    storage: Arc<Storage>,
}

impl ResourceObject for Unbound {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![MethodSignature::new(Verb::Get)]
    }

    fn call(&self, verb: Verb, _args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!({"storage": self.storage.label}).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Unbound {
    const NAME: &'static str = "Sandbox::Resource::Page::Unbound";

    fn build(binder: &dyn Binder) -> Result<Self> {
        let storage = binder
            .resolve(STORAGE_KEY)?
            .downcast::<Storage>()
            .map_err(|_| Error::unbound(STORAGE_KEY))?;
        Ok(Self { storage })
    }
}

/// Binder key [`Unbound`] depends on.
pub const STORAGE_KEY: &str = "Sandbox::Storage";
