//! Interception around resource method calls.
//!
//! An [`InterceptedResource`] wraps a target and runs a chain of
//! [`Interceptor`]s around the handlers bound to it. The wrapper is itself a
//! [`ResourceObject`] reporting the inner type and signatures, so the invoker
//! and the parameter cache treat it exactly like the original target.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info_span};

use super::object::{Args, MethodSignature, ResourceObject};
use super::request::{Response, Verb};
use crate::core::Result;

/// Logic run before and/or after a method call.
pub trait Interceptor: Send + Sync {
    /// Handle the call; use [`Invocation::proceed`] to reach the original method.
    fn invoke(&self, invocation: &Invocation<'_>) -> Result<Response>;
}

/// One intercepted call in flight.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    target: &'a dyn ResourceObject,
    verb: Verb,
    args: &'a Args,
    chain: &'a [Arc<dyn Interceptor>],
}

impl<'a> Invocation<'a> {
    /// Run the remaining interceptors, then the original method, with the same arguments.
    pub fn proceed(&self) -> Result<Response> {
        match self.chain.split_first() {
            Some((next, rest)) => next.invoke(&Invocation { chain: rest, ..*self }),
            None => self.target.call(self.verb, self.args),
        }
    }

    pub fn target(&self) -> &'a dyn ResourceObject {
        self.target
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn arguments(&self) -> &'a Args {
        self.args
    }
}

/// A target with interceptor chains bound per verb.
pub struct InterceptedResource {
    inner: Arc<dyn ResourceObject>,
    bindings: HashMap<Verb, Vec<Arc<dyn Interceptor>>>,
}

impl InterceptedResource {
    pub fn new(inner: Arc<dyn ResourceObject>) -> Self {
        Self {
            inner,
            bindings: HashMap::new(),
        }
    }

    /// Append interceptors to the chain of `verb`.
    pub fn bind(mut self, verb: Verb, interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        self.bindings.entry(verb).or_default().extend(interceptors);
        self
    }

    /// Append interceptors to every handler the target declares.
    pub fn bind_all(self, interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        let verbs: Vec<Verb> = self.inner.methods().iter().map(|m| m.verb()).collect();
        verbs.into_iter().fold(self, |wrapped, verb| {
            wrapped.bind(verb, interceptors.clone())
        })
    }

    pub fn inner(&self) -> &Arc<dyn ResourceObject> {
        &self.inner
    }
}

impl ResourceObject for InterceptedResource {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn methods(&self) -> Vec<MethodSignature> {
        self.inner.methods()
    }

    fn method(&self, verb: Verb) -> Option<MethodSignature> {
        self.inner.method(verb)
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        let chain = self.bindings.get(&verb).map(Vec::as_slice).unwrap_or(&[]);
        Invocation {
            target: self.inner.as_ref(),
            verb,
            args,
            chain,
        }
        .proceed()
    }
}

impl fmt::Debug for InterceptedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<_> = self
            .bindings
            .iter()
            .map(|(verb, chain)| (*verb, chain.len()))
            .collect();
        bound.sort();
        f.debug_struct("InterceptedResource")
            .field("inner", &self.inner.type_name())
            .field("bindings", &bound)
            .finish()
    }
}

/// Emits `tracing` events around each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInterceptor;

impl Interceptor for TracingInterceptor {
    fn invoke(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let span = info_span!(
            "resource_call",
            resource = invocation.target().type_name(),
            verb = %invocation.verb()
        );
        let _enter = span.enter();
        debug!(args = ?invocation.arguments().to_values(), "calling");
        let result = invocation.proceed();
        match &result {
            Ok(response) => debug!(code = response.code, "returned"),
            Err(err) => debug!(error = %err, "failed"),
        }
        result
    }
}
