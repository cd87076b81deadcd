//! The (scheme, host) to adapter table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use super::adapter::Adapter;
use crate::core::{Error, Result};

/// Adapters keyed by scheme, then host.
#[derive(Clone, Default)]
pub struct SchemeCollection {
    adapters: HashMap<String, HashMap<String, Arc<dyn Adapter>>>,
}

impl SchemeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `adapter` for `scheme://host`.
    ///
    /// Registering the same pair twice is an error.
    pub fn register(
        mut self,
        scheme: impl Into<String>,
        host: impl Into<String>,
        adapter: Arc<dyn Adapter>,
    ) -> Result<Self> {
        let (scheme, host) = (scheme.into(), host.into());
        let hosts = self.adapters.entry(scheme.clone()).or_default();
        if hosts.contains_key(&host) {
            return Err(Error::scheme(format!("{}://{} is already registered", scheme, host)));
        }
        info!("Registered adapter for {}://{}", scheme, host);
        hosts.insert(host, adapter);
        Ok(self)
    }

    /// The adapter for `scheme://host`.
    pub fn lookup(&self, scheme: &str, host: &str) -> Result<&Arc<dyn Adapter>> {
        let hosts = self
            .adapters
            .get(scheme)
            .ok_or_else(|| Error::scheme(format!("Unknown scheme: {}", scheme)))?;
        hosts
            .get(host)
            .ok_or_else(|| Error::scheme(format!("Unknown host '{}' for scheme {}", host, scheme)))
    }

    /// Registered (scheme, host) pairs, sorted.
    pub fn schemes(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .adapters
            .iter()
            .flat_map(|(scheme, hosts)| hosts.keys().map(move |host| (scheme.clone(), host.clone())))
            .collect();
        pairs.sort();
        pairs
    }
}

impl fmt::Debug for SchemeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeCollection")
            .field("schemes", &self.schemes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::factory::ProviderAdapter;
    use crate::domains::sandbox::NopResource;

    fn nop() -> Arc<dyn Adapter> {
        Arc::new(ProviderAdapter::instance(Arc::new(NopResource)))
    }

    #[test]
    fn test_register_and_lookup() {
        let schemes = SchemeCollection::new()
            .register("app", "self", nop())
            .unwrap()
            .register("page", "self", nop())
            .unwrap();
        assert!(schemes.lookup("app", "self").is_ok());
        assert_eq!(
            schemes.schemes(),
            vec![
                ("app".to_string(), "self".to_string()),
                ("page".to_string(), "self".to_string())
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let err = SchemeCollection::new()
            .register("app", "self", nop())
            .unwrap()
            .register("app", "self", nop())
            .unwrap_err();
        assert!(matches!(err, Error::Scheme(ref msg) if msg.contains("app://self")));
    }

    #[test]
    fn test_unknown_scheme_and_host() {
        let schemes = SchemeCollection::new().register("app", "self", nop()).unwrap();
        match schemes.lookup("bad", "self") {
            Err(Error::Scheme(msg)) => assert!(msg.contains("scheme")),
            _ => panic!("Expected scheme error"),
        }
        match schemes.lookup("app", "invalid_host") {
            Err(Error::Scheme(msg)) => assert!(msg.contains("invalid_host")),
            _ => panic!("Expected scheme error"),
        }
    }
}
