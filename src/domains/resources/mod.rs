//! Resources domain module.
//!
//! This module holds the resource object model shared by the factory, the
//! parameter resolver and the invoker.
//!
//! ## Architecture
//!
//! - `request.rs` - Verbs, requests, responses and status codes
//! - `object.rs` - The `ResourceObject` trait, method signatures and arguments
//! - `binder.rs` - Dependency binder for assisted parameters and construction
//! - `context.rs` - Ambient web context read by web-context parameters
//! - `weave.rs` - Interceptor chains wrapped around a target
//!
//! ## Adding a New Resource
//!
//! 1. Implement `ResourceObject`, declaring each handler as a `MethodSignature`
//! 2. Implement `ResourceDefinition` so an adapter can construct it
//! 3. Add it to a `ResourceCatalog`

mod binder;
mod context;
mod object;
mod request;
mod weave;

pub use binder::{Binder, Injector};
pub use context::{ContextKey, ContextSource, WebContext};
pub use object::{Arg, Args, Instance, MethodSignature, ParamDecl, ResourceDefinition, ResourceObject};
pub use request::{Code, Query, Request, Response, Verb};
pub use weave::{InterceptedResource, Interceptor, Invocation, TracingInterceptor};
