//! Resources handed out by provider adapters.

use serde_json::{Value, json};

use crate::core::{Error, Result};
use crate::domains::resources::{Args, MethodSignature, ResourceObject, Response, Verb};

/// Resource with no methods; only `OPTIONS` succeeds on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopResource;

impl ResourceObject for NopResource {
    fn methods(&self) -> Vec<MethodSignature> {
        Vec::new()
    }

    fn call(&self, verb: Verb, _args: &Args) -> Result<Response> {
        Err(Error::method_not_allowed(verb, self.type_name()))
    }
}

/// Built afresh by the `prov` provider for every lookup, remembering its path.
#[derive(Debug, Clone, Default)]
pub struct ProvidedResource {
    path: String,
}

impl ProvidedResource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl ResourceObject for ProvidedResource {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![MethodSignature::new(Verb::Get).optional("echo", Value::Null)]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!({"path": self.path, "echo": args.value(0)?}).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}
