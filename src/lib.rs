//! Resource Invoker Library
//!
//! This crate addresses resource objects by URI (`app://self/user?id=1`) and
//! invokes their verb-named methods, resolving each method argument from the
//! request query, declared defaults, a dependency binder, ambient web context,
//! or the response of another resource.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **core**: Configuration, error handling and the [`ResourceClient`] facade
//! - **domains**: Business logic organized by bounded contexts
//!   - **resources**: Resource objects, requests, responses and interceptors
//!   - **params**: Named-parameter resolution and its spec cache
//!   - **invoker**: Request dispatch and `OPTIONS`
//!   - **factory**: URI parsing, scheme table and adapters
//!   - **sandbox**: Demonstration resources
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use resource_invoker::core::{Config, ResourceClient};
//! use resource_invoker::domains::factory::Factory;
//! use resource_invoker::domains::resources::{Binder, Injector};
//! use resource_invoker::domains::sandbox;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let binder: Arc<dyn Binder> = Arc::new(Injector::new());
//!     let factory = Factory::new(sandbox::schemes(binder.clone())?);
//!     let client = ResourceClient::new(factory, binder, &config.resources);
//!     let response = client.get("app://self/user?id=1")?;
//!     println!("{}", response.body);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, ResourceClient, Result};
