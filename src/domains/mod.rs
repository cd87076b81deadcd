//! Domains module containing the resource-invocation logic, organized by
//! bounded contexts.
//!
//! - **resources**: the resource object model, requests, responses and interception
//! - **params**: resolution of method arguments
//! - **invoker**: dispatch of a request to its handler
//! - **factory**: URI to resource-object construction
//! - **sandbox**: a small resource application for the CLI and tests

pub mod factory;
pub mod invoker;
pub mod params;
pub mod resources;
pub mod sandbox;
