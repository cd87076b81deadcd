//! Ambient request context read by web-context parameters.
//!
//! The host populates a [`WebContext`] before invocation and attaches it to
//! the [`Request`](super::Request); nothing here reads process-wide state
//! except the explicit [`WebContext::from_env`] constructor.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Error, Result};

/// Where a context value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    Cookie,
    Env,
    FormData,
    Query,
    Server,
    Files,
}

impl ContextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextSource::Cookie => "cookie",
            ContextSource::Env => "env",
            ContextSource::FormData => "form_data",
            ContextSource::Query => "query",
            ContextSource::Server => "server",
            ContextSource::Files => "files",
        }
    }
}

impl FromStr for ContextSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cookie" => Ok(ContextSource::Cookie),
            "env" => Ok(ContextSource::Env),
            "form_data" | "form" => Ok(ContextSource::FormData),
            "query" => Ok(ContextSource::Query),
            "server" => Ok(ContextSource::Server),
            "files" => Ok(ContextSource::Files),
            other => Err(Error::parameter("source", format!("unknown context source '{}'", other))),
        }
    }
}

/// Address of one context value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextKey {
    pub source: ContextSource,
    pub name: String,
}

impl ContextKey {
    pub fn new(source: ContextSource, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
        }
    }

    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(ContextSource::Cookie, name)
    }

    pub fn env(name: impl Into<String>) -> Self {
        Self::new(ContextSource::Env, name)
    }

    pub fn form(name: impl Into<String>) -> Self {
        Self::new(ContextSource::FormData, name)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(ContextSource::Query, name)
    }

    pub fn server(name: impl Into<String>) -> Self {
        Self::new(ContextSource::Server, name)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.as_str(), self.name)
    }
}

/// Per-request ambient values, grouped by source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebContext {
    values: HashMap<ContextSource, Map<String, Value>>,
}

impl WebContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding the current process environment under [`ContextSource::Env`].
    pub fn from_env() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .fold(Self::new(), |ctx, (name, value)| {
                ctx.with(ContextSource::Env, name, Value::String(value))
            })
    }

    /// Set one value.
    pub fn with(mut self, source: ContextSource, name: impl Into<String>, value: Value) -> Self {
        self.values
            .entry(source)
            .or_default()
            .insert(name.into(), value);
        self
    }

    /// Look up a value; `null` counts as absent.
    pub fn get(&self, key: &ContextKey) -> Option<&Value> {
        self.values
            .get(&key.source)
            .and_then(|values| values.get(&key.name))
            .filter(|value| !value.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(Map::is_empty)
    }
}
