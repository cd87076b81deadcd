//! The named-parameter resolver.
//!
//! Derives a [`ParamSpecs`] list per (type, verb) once, memoizes it, and
//! evaluates it against each request to produce positional arguments.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};

use tracing::{debug, trace};

use super::cache::{CacheKey, ParamCache};
use super::metadata::{MetadataReader, ParamMetadata};
use super::spec::{EvalScope, ParamSpec, ParamSpecs};
use crate::core::Result;
use crate::domains::resources::{Args, Binder, MethodSignature, Request, ResourceObject, Response};

/// Issues the nested GET requests resource-bound parameters depend on.
pub trait SubRequest: Send + Sync {
    /// GET `uri` on behalf of `origin`, sharing its web context.
    fn get(&self, uri: &str, origin: &Request) -> Result<Response>;
}

/// Resolves method arguments from the query, the binder, the web context and
/// other resources.
pub struct NamedParameter {
    cache: Arc<dyn ParamCache>,
    reader: Arc<dyn MetadataReader>,
    binder: Arc<dyn Binder>,
    sub_request: Option<Weak<dyn SubRequest>>,
}

impl NamedParameter {
    pub fn new(
        cache: Arc<dyn ParamCache>,
        reader: Arc<dyn MetadataReader>,
        binder: Arc<dyn Binder>,
    ) -> Self {
        Self {
            cache,
            reader,
            binder,
            sub_request: None,
        }
    }

    /// Enable resource-bound parameters.
    ///
    /// Held weakly: the sub-request handler usually owns the invoker that owns
    /// this resolver.
    pub fn with_sub_request(mut self, sub_request: Weak<dyn SubRequest>) -> Self {
        self.sub_request = Some(sub_request);
        self
    }

    /// Evaluate the arguments of `method` on `request.target()` against the request.
    pub fn get_parameters(&self, request: &Request, method: &MethodSignature) -> Result<Args> {
        let specs = self.param_specs(request.target().as_ref(), method);
        let sub_request = self.sub_request.as_ref().and_then(Weak::upgrade);
        let scope = EvalScope {
            request,
            binder: self.binder.as_ref(),
            sub_request: sub_request.as_deref(),
        };

        specs
            .iter()
            .map(|(name, spec)| Ok((name.clone(), spec.evaluate(name, &scope)?)))
            .collect::<Result<Vec<_>>>()
            .map(Args::new)
    }

    /// Memoized specs for `method` on `target`.
    pub fn param_specs(&self, target: &dyn ResourceObject, method: &MethodSignature) -> Arc<ParamSpecs> {
        let key = CacheKey::new(target.type_name(), method.verb());
        if let Some(specs) = self.cache.fetch(&key) {
            trace!("Parameter specs cache hit for {}::{}", key.type_name, method.verb().handler_name());
            return specs;
        }

        debug!("Deriving parameter specs for {}::{}", key.type_name, method.verb().handler_name());
        let specs = Arc::new(self.derive(target, method));
        self.cache.save(key, specs.clone());
        specs
    }

    fn derive(&self, target: &dyn ResourceObject, method: &MethodSignature) -> ParamSpecs {
        let mut resources = HashMap::new();
        let mut assisted = HashSet::new();
        let mut web_context = HashMap::new();
        for record in self.reader.read(target, method) {
            match record {
                ParamMetadata::ResourceBinding(param) => {
                    resources.insert(param.param.clone(), param);
                }
                ParamMetadata::Assisted(names) => assisted.extend(names),
                ParamMetadata::WebContext { param, key } => {
                    web_context.insert(param, key);
                }
            }
        }

        method
            .params()
            .iter()
            .map(|decl| {
                let spec = if let Some(param) = resources.remove(&decl.name) {
                    ParamSpec::AssistedResource(param)
                } else if assisted.contains(&decl.name) {
                    ParamSpec::AssistedMarker
                } else if let Some(key) = web_context.remove(&decl.name) {
                    ParamSpec::AssistedWebContext {
                        key,
                        fallback: decl.default.clone(),
                    }
                } else if let Some(default) = &decl.default {
                    ParamSpec::Optional(default.clone())
                } else {
                    ParamSpec::Required
                };
                (decl.name.clone(), spec)
            })
            .collect()
    }
}
