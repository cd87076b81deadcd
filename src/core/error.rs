//! Error types and handling for resource resolution and invocation.
//!
//! This module defines the error taxonomy shared by the factory, the parameter
//! resolver and the invoker. Each kind carries the URI, parameter name or verb
//! it was raised for so hosts can build an actionable message.

use thiserror::Error;

use crate::domains::resources::{Code, Verb};

/// A specialized Result type for resource operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for resource operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a string or is not a well-formed resource URI.
    #[error("Invalid URI '{uri}': {reason}")]
    Uri { uri: String, reason: String },

    /// The scheme is not registered, or the host is not registered under it.
    #[error("Scheme error: {0}")]
    Scheme(String),

    /// The adapter has no resource for the given URI.
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },

    /// The binder has no binding for the requested key.
    #[error("Unbound dependency: {key}")]
    Unbound { key: String },

    /// A parameter could not be produced from the query or the context.
    #[error("Invalid parameter '{name}': {reason}")]
    Parameter { name: String, reason: String },

    /// The target has no handler for the requested verb.
    #[error("Method not allowed: {verb} on {resource}")]
    MethodNotAllowed { verb: Verb, resource: String },

    /// A resource-bound parameter re-entered a URI already being requested.
    #[error("Cyclic sub-request: {uri}")]
    CyclicRequest { uri: String },

    /// Error raised by a resource method or an interceptor, passed through as-is.
    #[error(transparent)]
    Application(Box<dyn std::error::Error + Send + Sync>),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new URI error.
    pub fn uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Uri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Create a new scheme error.
    pub fn scheme(msg: impl Into<String>) -> Self {
        Self::Scheme(msg.into())
    }

    /// Create a new "resource not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::ResourceNotFound { uri: uri.into() }
    }

    /// Create a new "unbound dependency" error.
    pub fn unbound(key: impl Into<String>) -> Self {
        Self::Unbound { key: key.into() }
    }

    /// Create a new parameter error.
    pub fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "method not allowed" error.
    pub fn method_not_allowed(verb: Verb, resource: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            verb,
            resource: resource.into(),
        }
    }

    /// Wrap an application-level error raised inside a resource method.
    pub fn application(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Application(err.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Status code a host would map this error to.
    pub fn code(&self) -> u16 {
        match self {
            Self::Uri { .. } | Self::Parameter { .. } => Code::BAD_REQUEST,
            Self::Scheme(_) | Self::ResourceNotFound { .. } => Code::NOT_FOUND,
            Self::MethodNotAllowed { .. } => Code::METHOD_NOT_ALLOWED,
            Self::Unbound { .. }
            | Self::CyclicRequest { .. }
            | Self::Application(_)
            | Self::Config(_) => Code::ERROR,
        }
    }

    /// Whether the failure was caused by the caller's input (4xx class).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_is_bad_request() {
        let err = Error::parameter("id", "missing");
        assert_eq!(err.code(), Code::BAD_REQUEST);
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Invalid parameter 'id': missing");
    }

    #[test]
    fn test_unbound_is_not_client_error() {
        let err = Error::unbound("db");
        assert_eq!(err.code(), Code::ERROR);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_method_not_allowed_message() {
        let err = Error::method_not_allowed(Verb::Delete, "Order");
        assert_eq!(err.code(), Code::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_string(), "Method not allowed: DELETE on Order");
    }

    #[test]
    fn test_application_error_is_transparent() {
        let io = std::io::Error::other("disk on fire");
        let err = Error::application(io);
        assert_eq!(err.to_string(), "disk on fire");
    }
}
