//! Params domain module.
//!
//! This module turns a request's query, ambient context and binder into the
//! positional argument list of a resource method.
//!
//! ## Architecture
//!
//! - `metadata.rs` - Binding records attached to a method and the reader trait
//! - `spec.rs` - The `ParamSpec` strategies and their evaluation
//! - `cache.rs` - Memoization of derived specs per (type, verb)
//! - `template.rs` - URI template expansion for templated resource parameters
//! - `resolver.rs` - `NamedParameter`, tying the above together

mod cache;
mod metadata;
mod resolver;
mod spec;
pub mod template;

pub use cache::{ArrayCache, CacheKey, ParamCache, VoidCache};
pub use metadata::{DeclaredMetadataReader, MetadataReader, ParamMetadata, ResourceParam};
pub use resolver::{NamedParameter, SubRequest};
pub use spec::{EvalScope, ParamSpec, ParamSpecs};
