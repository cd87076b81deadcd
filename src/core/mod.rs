//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks of the resource
//! invoker: error handling, configuration, and the [`ResourceClient`] that
//! wires the factory and the invoker together.

pub mod client;
pub mod config;
pub mod error;

pub use client::ResourceClient;
pub use config::Config;
pub use error::{Error, Result};
