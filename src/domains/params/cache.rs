//! Memoization of derived parameter specs.
//!
//! Specs are a pure function of a method's declared signature and metadata,
//! so concurrent misses may both derive and save the same key; the second
//! write replaces an equal value.

use std::sync::Arc;

use dashmap::DashMap;

use super::spec::ParamSpecs;
use crate::domains::resources::Verb;

/// Identity of one handler: runtime type plus verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub type_name: String,
    pub verb: Verb,
}

impl CacheKey {
    pub fn new(type_name: impl Into<String>, verb: Verb) -> Self {
        Self {
            type_name: type_name.into(),
            verb,
        }
    }
}

/// Store backing the resolver's memoized specs.
pub trait ParamCache: Send + Sync {
    fn fetch(&self, key: &CacheKey) -> Option<Arc<ParamSpecs>>;

    fn save(&self, key: CacheKey, specs: Arc<ParamSpecs>);
}

/// In-memory cache living as long as the resolver; never evicted.
#[derive(Debug, Default)]
pub struct ArrayCache {
    entries: DashMap<CacheKey, Arc<ParamSpecs>>,
}

impl ArrayCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParamCache for ArrayCache {
    fn fetch(&self, key: &CacheKey) -> Option<Arc<ParamSpecs>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn save(&self, key: CacheKey, specs: Arc<ParamSpecs>) {
        self.entries.insert(key, specs);
    }
}

/// Cache that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoidCache;

impl ParamCache for VoidCache {
    fn fetch(&self, _key: &CacheKey) -> Option<Arc<ParamSpecs>> {
        None
    }

    fn save(&self, _key: CacheKey, _specs: Arc<ParamSpecs>) {}
}
