//! Parameter-binding metadata attached to a method.

use crate::domains::resources::{ContextKey, MethodSignature, ResourceObject};

/// One binding record for a method.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamMetadata {
    /// Fill `param` from a field of another resource.
    ResourceBinding(ResourceParam),

    /// Parameters whose values come from the binder.
    Assisted(Vec<String>),

    /// Fill `param` from the ambient web context.
    WebContext { param: String, key: ContextKey },
}

/// A resource-bound parameter: `uri` is requested and `fragment` picked from its body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceParam {
    pub param: String,
    pub uri: String,
    pub fragment: Option<String>,
    pub templated: bool,
}

impl ResourceParam {
    /// Split `uri#fragment`; a `{#var}` template expression is not a fragment.
    pub fn new(param: impl Into<String>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let split = uri
            .char_indices()
            .find(|&(i, c)| c == '#' && !uri[..i].ends_with('{'))
            .map(|(i, _)| i);
        let (uri, fragment) = match split {
            Some(i) => {
                let fragment = &uri[i + 1..];
                (
                    uri[..i].to_string(),
                    (!fragment.is_empty()).then(|| fragment.to_string()),
                )
            }
            None => (uri, None),
        };
        Self {
            param: param.into(),
            uri,
            fragment,
            templated: false,
        }
    }

    /// Expand the URI against the current query before requesting it.
    pub fn templated(mut self) -> Self {
        self.templated = true;
        self
    }
}

/// Reads the binding metadata of a method.
pub trait MetadataReader: Send + Sync {
    fn read(&self, target: &dyn ResourceObject, method: &MethodSignature) -> Vec<ParamMetadata>;
}

/// Returns the records declared on the method signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredMetadataReader;

impl MetadataReader for DeclaredMetadataReader {
    fn read(&self, _target: &dyn ResourceObject, method: &MethodSignature) -> Vec<ParamMetadata> {
        method.metadata().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_param_splits_fragment() {
        let param = ResourceParam::new("name", "app://self/rparam/login#login_id");
        assert_eq!(param.uri, "app://self/rparam/login");
        assert_eq!(param.fragment.as_deref(), Some("login_id"));
        assert!(!param.templated);
    }

    #[test]
    fn test_resource_param_without_fragment() {
        let param = ResourceParam::new("user", "app://self/user?id=1");
        assert_eq!(param.uri, "app://self/user?id=1");
        assert_eq!(param.fragment, None);

        let empty = ResourceParam::new("user", "app://self/user#");
        assert_eq!(empty.uri, "app://self/user");
        assert_eq!(empty.fragment, None);
    }

    #[test]
    fn test_templated_uri_keeps_expressions() {
        let param =
            ResourceParam::new("id", "app://self/rparam/login{?name}#nickname").templated();
        assert_eq!(param.uri, "app://self/rparam/login{?name}");
        assert_eq!(param.fragment.as_deref(), Some("nickname"));
        assert!(param.templated);

        let fragment_expr = ResourceParam::new("id", "app://self/doc{#section}").templated();
        assert_eq!(fragment_expr.uri, "app://self/doc{#section}");
        assert_eq!(fragment_expr.fragment, None);
    }
}
