//! Requests, responses and the verbs that connect them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::context::WebContext;
use super::object::ResourceObject;
use crate::core::{Error, Result};

/// Caller-supplied key/value parameters of a request.
pub type Query = Map<String, Value>;

/// An invocation mode of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Verb {
    /// All verbs, in canonical order.
    pub const ALL: [Verb; 7] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Patch,
        Verb::Delete,
        Verb::Head,
        Verb::Options,
    ];

    /// The upper-case request token, e.g. `GET`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
        }
    }

    /// Conventional handler name, e.g. `onGet`.
    pub fn handler_name(&self) -> &'static str {
        match self {
            Verb::Get => "onGet",
            Verb::Post => "onPost",
            Verb::Put => "onPut",
            Verb::Patch => "onPatch",
            Verb::Delete => "onDelete",
            Verb::Head => "onHead",
            Verb::Options => "onOptions",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::parameter("method", format!("unknown verb '{}'", s)))
    }
}

/// Status codes used by responses and mapped from errors.
pub struct Code;

impl Code {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const ACCEPTED: u16 = 202;
    pub const NO_CONTENT: u16 = 204;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const ERROR: u16 = 500;
    pub const SERVICE_UNAVAILABLE: u16 = 503;

    /// Reason phrase for a status code.
    pub fn reason(code: u16) -> &'static str {
        match code {
            Self::OK => "OK",
            Self::CREATED => "Created",
            Self::ACCEPTED => "Accepted",
            Self::NO_CONTENT => "No Content",
            Self::BAD_REQUEST => "Bad Request",
            Self::NOT_FOUND => "Not Found",
            Self::METHOD_NOT_ALLOWED => "Method Not Allowed",
            Self::ERROR => "Internal Server Error",
            Self::SERVICE_UNAVAILABLE => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

/// One invocation intent: a target, a verb and a query.
///
/// A request is never mutated after construction; the builder methods consume
/// and return it.
#[derive(Clone)]
pub struct Request {
    target: Arc<dyn ResourceObject>,
    verb: Verb,
    query: Query,
    context: Arc<WebContext>,
    trail: Vec<String>,
}

impl Request {
    /// Create a request with an empty web context.
    pub fn new(target: Arc<dyn ResourceObject>, verb: Verb, query: Query) -> Self {
        Self {
            target,
            verb,
            query,
            context: Arc::new(WebContext::default()),
            trail: Vec::new(),
        }
    }

    /// Create a request without query parameters.
    pub fn bare(target: Arc<dyn ResourceObject>, verb: Verb) -> Self {
        Self::new(target, verb, Query::new())
    }

    /// Attach the ambient context web-context parameters are read from.
    pub fn with_context(mut self, context: Arc<WebContext>) -> Self {
        self.context = context;
        self
    }

    /// Record the URIs of the enclosing requests this one was issued from.
    pub fn with_trail(mut self, trail: Vec<String>) -> Self {
        self.trail = trail;
        self
    }

    pub fn target(&self) -> &Arc<dyn ResourceObject> {
        &self.target
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn context(&self) -> &WebContext {
        &self.context
    }

    pub fn shared_context(&self) -> &Arc<WebContext> {
        &self.context
    }

    /// URIs of the requests enclosing this one, outermost first.
    pub fn trail(&self) -> &[String] {
        &self.trail
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("target", &self.target.type_name())
            .field("verb", &self.verb)
            .field("query", &self.query)
            .field("trail", &self.trail)
            .finish()
    }
}

/// The uniform result of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Status code; `200` unless the method says otherwise.
    pub code: u16,

    /// Response headers, keyed by lower-case name.
    pub headers: BTreeMap<String, String>,

    /// The representation returned by the method.
    pub body: Value,
}

impl Response {
    /// Create an empty response with the given status code.
    pub fn new(code: u16) -> Self {
        Self {
            code,
            headers: BTreeMap::new(),
            body: Value::Null,
        }
    }

    /// Create a `200 OK` response carrying `body`.
    pub fn ok(body: Value) -> Self {
        Self::new(Code::OK).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl From<Value> for Response {
    fn from(body: Value) -> Self {
        Self::ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verb_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("Patch".parse::<Verb>().unwrap(), Verb::Patch);
        assert_eq!("OPTIONS".parse::<Verb>().unwrap(), Verb::Options);
        assert!("fetch".parse::<Verb>().is_err());
    }

    #[test]
    fn test_verb_handler_name() {
        assert_eq!(Verb::Get.handler_name(), "onGet");
        assert_eq!(Verb::Delete.handler_name(), "onDelete");
        assert_eq!(Verb::Post.to_string(), "POST");
    }

    #[test]
    fn test_response_from_value() {
        let response: Response = json!({"id": 1}).into();
        assert_eq!(response.code, Code::OK);
        assert_eq!(response.body, json!({"id": 1}));
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_response_headers_are_lower_cased() {
        let response = Response::new(Code::CREATED).with_header("Location", "app://self/user?id=3");
        assert_eq!(response.header("location"), Some("app://self/user?id=3"));
        assert_eq!(response.header("LOCATION"), Some("app://self/user?id=3"));
    }
}
