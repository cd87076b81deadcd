//! Invoker domain module.
//!
//! Dispatches a [`Request`](crate::domains::resources::Request) to the
//! handler its verb names, resolving the arguments through the params domain
//! and answering `OPTIONS` from the declared signatures alone.

mod dispatch;

pub use dispatch::Invoker;
