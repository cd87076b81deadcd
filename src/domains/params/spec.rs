//! Strategies producing one argument value each.

use serde_json::Value;
use tracing::debug;

use super::metadata::ResourceParam;
use super::resolver::SubRequest;
use super::template;
use crate::core::{Error, Result};
use crate::domains::resources::{Arg, Binder, ContextKey, Request};

/// How one parameter's value is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSpec {
    /// Must come from the query.
    Required,

    /// Query value, else the declared default.
    Optional(Value),

    /// Supplied by the binder under the parameter name.
    AssistedMarker,

    /// A field of another resource's response body.
    AssistedResource(ResourceParam),

    /// An ambient context value, else `fallback`; `None` means no default.
    AssistedWebContext {
        key: ContextKey,
        fallback: Option<Value>,
    },
}

/// Parameter specs of one method, in parameter order.
pub type ParamSpecs = Vec<(String, ParamSpec)>;

/// Everything a spec may draw a value from.
pub struct EvalScope<'a> {
    pub request: &'a Request,
    pub binder: &'a dyn Binder,
    pub sub_request: Option<&'a dyn SubRequest>,
}

impl EvalScope<'_> {
    /// Query value for `name`; `null` counts as absent.
    fn query_value(&self, name: &str) -> Option<&Value> {
        self.request.query().get(name).filter(|value| !value.is_null())
    }
}

impl ParamSpec {
    /// Produce the argument for parameter `name`.
    pub fn evaluate(&self, name: &str, scope: &EvalScope<'_>) -> Result<Arg> {
        match self {
            ParamSpec::Required => scope
                .query_value(name)
                .cloned()
                .map(Arg::Value)
                .ok_or_else(|| Error::parameter(name, "required parameter is missing")),
            ParamSpec::Optional(default) => Ok(Arg::Value(
                scope.query_value(name).unwrap_or(default).clone(),
            )),
            ParamSpec::AssistedMarker => scope.binder.resolve(name).map(Arg::Instance),
            ParamSpec::AssistedResource(param) => resource_value(name, param, scope).map(Arg::Value),
            ParamSpec::AssistedWebContext { key, fallback } => scope
                .request
                .context()
                .get(key)
                .or(fallback.as_ref())
                .cloned()
                .map(Arg::Value)
                .ok_or_else(|| Error::parameter(name, format!("no value for {} in context", key))),
        }
    }
}

fn resource_value(name: &str, param: &ResourceParam, scope: &EvalScope<'_>) -> Result<Value> {
    let uri = if param.templated {
        template::expand(&param.uri, scope.request.query())
    } else {
        param.uri.clone()
    };
    let sub_request = scope
        .sub_request
        .ok_or_else(|| Error::unbound("SubRequest"))?;

    debug!("Resolving parameter {} from {}", name, uri);
    let body = sub_request.get(&uri, scope.request)?.body;
    match &param.fragment {
        Some(field) => body.get(field).cloned().ok_or_else(|| {
            Error::parameter(name, format!("{} has no field '{}'", uri, field))
        }),
        None => Ok(body),
    }
}
