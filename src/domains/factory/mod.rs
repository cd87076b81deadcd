//! Factory domain module.
//!
//! This module turns a resource URI into a live resource object.
//!
//! ## Architecture
//!
//! - `uri.rs` - Parsing and path-to-type naming of resource URIs
//! - `adapter.rs` - The `Adapter` trait, the type catalog and the stock adapters
//! - `scheme.rs` - The (scheme, host) to adapter table
//! - `service.rs` - The `Factory` service tying them together

mod adapter;
mod scheme;
mod service;
pub mod uri;

pub use adapter::{Adapter, AppAdapter, ProviderAdapter, ResourceCatalog};
pub use scheme::SchemeCollection;
pub use service::Factory;
pub use uri::ResourceUri;
