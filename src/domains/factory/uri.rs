//! Resource URIs.
//!
//! A resource URI has the shape `scheme://host/path?query#fragment`. The
//! scheme and host select an adapter; the path names a resource type; the
//! query carries request parameters.

use std::fmt;

use url::Url;

use crate::core::{Error, Result};
use crate::domains::resources::Query;

/// Path segment appended when a URI path is empty or ends with `/`.
pub const INDEX: &str = "index";

/// A parsed, validated resource URI.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUri {
    raw: String,
    scheme: String,
    host: String,
    path: String,
    query: Query,
    fragment: Option<String>,
}

impl ResourceUri {
    /// Parse `input`, rejecting anything without both a scheme and a host.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| Error::uri(input, e.to_string()))?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::uri(input, "missing host"))?
            .to_string();

        let path = match url.path() {
            "" => format!("/{}", INDEX),
            path if path.ends_with('/') => format!("{}{}", path, INDEX),
            path => path.to_string(),
        };
        let query = match url.query() {
            Some(raw) => parse_query(raw).map_err(|e| Error::uri(input, e.to_string()))?,
            None => Query::new(),
        };

        Ok(Self {
            raw: input.to_string(),
            scheme: url.scheme().to_string(),
            host,
            path,
            query,
            fragment: url.fragment().map(str::to_string),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Normalized path, always starting with `/` and never ending with one.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The URI exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Relative type name the path maps to, e.g. `/hello-world` to `HelloWorld`.
    pub fn type_path(&self) -> String {
        type_path(&self.path)
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Map a URI path to a relative type name.
///
/// Each `/`-separated segment is split on `-`, every word gets an uppercase
/// first letter and the words are concatenated; segments are joined by `::`.
pub fn type_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| segment.split('-').map(upper_first).collect::<String>())
        .collect::<Vec<_>>()
        .join("::")
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Decode an `application/x-www-form-urlencoded` query into string values.
///
/// Repeated keys keep the last value.
pub fn parse_query(raw: &str) -> std::result::Result<Query, serde_urlencoded::de::Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)?;
    Ok(pairs
        .into_iter()
        .map(|(key, value)| (key, serde_json::Value::String(value)))
        .collect())
}
