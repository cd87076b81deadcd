//! Request dispatch.

use tracing::{debug, instrument};

use crate::core::{Error, Result};
use crate::domains::params::NamedParameter;
use crate::domains::resources::{Code, Request, ResourceObject, Response, Verb};

/// Dispatches requests to resource methods.
///
/// The invoker keeps no per-call state; calls are single-attempt and every
/// error reaches the caller unchanged.
pub struct Invoker {
    params: NamedParameter,
}

impl Invoker {
    pub fn new(params: NamedParameter) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &NamedParameter {
        &self.params
    }

    /// Resolve arguments for `request` and call the matching handler.
    #[instrument(skip_all, fields(resource = request.target().type_name(), verb = %request.verb()))]
    pub fn invoke(&self, request: &Request) -> Result<Response> {
        let target = request.target();
        if request.verb() == Verb::Options {
            return Ok(Self::options(target.as_ref()));
        }

        let method = target
            .method(request.verb())
            .ok_or_else(|| Error::method_not_allowed(request.verb(), target.type_name()))?;
        let args = self.params.get_parameters(request, &method)?;
        debug!("Calling {} with {} argument(s)", request.verb().handler_name(), args.len());
        target.call(request.verb(), &args)
    }

    /// Describe the verbs `target` implements without calling any of them.
    pub fn options(target: &dyn ResourceObject) -> Response {
        let allow: Vec<String> = target
            .methods()
            .iter()
            .map(|m| m.verb())
            .filter(|verb| *verb != Verb::Options)
            .map(|verb| verb.as_str().to_ascii_lowercase())
            .collect();
        Response::new(Code::OK).with_header("allow", allow.join(", "))
    }
}
