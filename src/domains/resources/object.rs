//! The resource object model.
//!
//! A resource declares its verb handlers up front as [`MethodSignature`]s:
//! the ordered parameter list, which parameters carry a default, and the
//! binding metadata attached to the method. The resolver derives parameter
//! specs from that description instead of inspecting the method at runtime.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::binder::Binder;
use super::context::ContextKey;
use super::request::{Response, Verb};
use crate::core::{Error, Result};
use crate::domains::params::{ParamMetadata, ResourceParam};

/// A value provided by a binder.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// An addressable object exposing verb-named methods.
pub trait ResourceObject: Send + Sync {
    /// Stable identity of the concrete type.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Declared verb handlers, in declaration order.
    fn methods(&self) -> Vec<MethodSignature>;

    /// The handler declared for `verb`, if any.
    fn method(&self, verb: Verb) -> Option<MethodSignature> {
        self.methods().into_iter().find(|m| m.verb() == verb)
    }

    /// Run the handler for `verb` with positional arguments.
    fn call(&self, verb: Verb, args: &Args) -> Result<Response>;
}

/// A resource type that can be constructed by an adapter.
///
/// `NAME` is the conventional type name the adapter derives from a URI path,
/// e.g. `Sandbox::Resource::Page::HelloWorld` for `page://self/hello-world`.
pub trait ResourceDefinition: ResourceObject + Sized + 'static {
    /// Fully qualified conventional type name.
    const NAME: &'static str;

    /// Build an instance, pulling dependencies from the binder.
    fn build(binder: &dyn Binder) -> Result<Self>;
}

/// One declared parameter of a verb handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub default: Option<Value>,
}

/// Description of one verb handler.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    verb: Verb,
    params: Vec<ParamDecl>,
    metadata: Vec<ParamMetadata>,
}

impl MethodSignature {
    /// Start describing the handler for `verb`.
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            params: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Add a parameter without a default.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Add a parameter with a default value.
    pub fn optional(mut self, name: impl Into<String>, default: Value) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            default: Some(default),
        });
        self
    }

    /// Attach a metadata record.
    pub fn with_metadata(mut self, metadata: ParamMetadata) -> Self {
        self.metadata.push(metadata);
        self
    }

    /// Bind `param` to a field of another resource, e.g. `app://self/login#login_id`.
    pub fn resource_param(self, param: impl Into<String>, uri: impl Into<String>) -> Self {
        self.with_metadata(ParamMetadata::ResourceBinding(ResourceParam::new(param, uri)))
    }

    /// Like [`resource_param`](Self::resource_param), expanding `{?var}`-style
    /// placeholders from the current query first.
    pub fn templated_resource_param(
        self,
        param: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        self.with_metadata(ParamMetadata::ResourceBinding(
            ResourceParam::new(param, uri).templated(),
        ))
    }

    /// Mark parameters whose values come from the binder.
    pub fn assisted<I, S>(self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_metadata(ParamMetadata::Assisted(
            params.into_iter().map(Into::into).collect(),
        ))
    }

    /// Read `param` from the ambient web context.
    pub fn web_context(self, param: impl Into<String>, key: ContextKey) -> Self {
        self.with_metadata(ParamMetadata::WebContext {
            param: param.into(),
            key,
        })
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    pub fn metadata(&self) -> &[ParamMetadata] {
        &self.metadata
    }
}

/// One positional argument.
#[derive(Clone)]
pub enum Arg {
    /// A plain value from the query, a default, the context or a sub-request.
    Value(Value),

    /// An instance supplied by the binder.
    Instance(Instance),
}

impl Arg {
    /// The plain value, or `None` for binder instances.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Arg::Value(value) => Some(value),
            Arg::Instance(_) => None,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => write!(f, "{}", value),
            Arg::Instance(_) => f.write_str("<instance>"),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Value(a), Arg::Value(b)) => a == b,
            (Arg::Instance(a), Arg::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The evaluated argument list of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    names: Vec<String>,
    values: Vec<Arg>,
}

impl Args {
    /// Build from `(name, value)` pairs in parameter order.
    pub fn new(pairs: Vec<(String, Arg)>) -> Self {
        let (names, values) = pairs.into_iter().unzip();
        Self { names, values }
    }

    /// Build from plain values; names are positional (`$0`, `$1`, ...).
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            names: (0..values.len()).map(|i| format!("${}", i)).collect(),
            values: values.into_iter().map(Arg::Value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.values.iter()
    }

    /// Parameter name at `index`.
    pub fn name(&self, index: usize) -> &str {
        self.names
            .get(index)
            .map(String::as_str)
            .unwrap_or("<missing>")
    }

    fn arg(&self, index: usize) -> Result<&Arg> {
        self.values
            .get(index)
            .ok_or_else(|| Error::parameter(self.name(index), format!("no argument at {}", index)))
    }

    /// The plain value at `index`.
    pub fn value(&self, index: usize) -> Result<&Value> {
        self.arg(index)?
            .as_value()
            .ok_or_else(|| Error::parameter(self.name(index), "expected a value, got an instance"))
    }

    /// Deserialize the value at `index`.
    ///
    /// Query values arrive as strings, so a string that fails to deserialize
    /// directly is retried as a JSON literal (`"1"` satisfies an integer).
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let value = self.value(index)?;
        match serde_json::from_value(value.clone()) {
            Ok(typed) => Ok(typed),
            Err(err) => match value {
                Value::String(raw) => serde_json::from_str(raw)
                    .map_err(|_| Error::parameter(self.name(index), err.to_string())),
                _ => Err(Error::parameter(self.name(index), err.to_string())),
            },
        }
    }

    /// Downcast the binder instance at `index`.
    pub fn instance<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        match self.arg(index)? {
            Arg::Instance(instance) => instance.clone().downcast::<T>().map_err(|_| {
                Error::parameter(
                    self.name(index),
                    format!("expected an instance of {}", std::any::type_name::<T>()),
                )
            }),
            Arg::Value(_) => Err(Error::parameter(
                self.name(index),
                "expected an instance, got a value",
            )),
        }
    }

    /// Plain values for display; binder instances show as `null`.
    pub fn to_values(&self) -> Vec<Value> {
        self.values
            .iter()
            .map(|arg| arg.as_value().cloned().unwrap_or(Value::Null))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signature_builder_keeps_order() {
        let signature = MethodSignature::new(Verb::Post)
            .required("id")
            .optional("name", json!("default_name"))
            .optional("age", json!(99));

        let names: Vec<_> = signature.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "age"]);
        assert_eq!(signature.params()[0].default, None);
        assert_eq!(signature.params()[2].default, Some(json!(99)));
    }

    #[test]
    fn test_args_get_coerces_query_strings() {
        let args = Args::from_values(vec![json!("1"), json!("Aramis")]);
        assert_eq!(args.get::<usize>(0).unwrap(), 1);
        assert_eq!(args.get::<String>(1).unwrap(), "Aramis");
    }

    #[test]
    fn test_args_get_type_mismatch_is_parameter_error() {
        let args = Args::new(vec![("id".to_string(), Arg::Value(json!("abc")))]);
        match args.get::<u32>(0) {
            Err(Error::Parameter { name, .. }) => assert_eq!(name, "id"),
            other => panic!("Expected parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_args_instance_downcast() {
        let instance: Instance = Arc::new(42_u8);
        let args = Args::new(vec![("db".to_string(), Arg::Instance(instance))]);
        assert_eq!(*args.instance::<u8>(0).unwrap(), 42);
        assert!(args.instance::<String>(0).is_err());
        assert!(args.value(0).is_err());
        assert_eq!(args.to_values(), vec![Value::Null]);
    }
}
