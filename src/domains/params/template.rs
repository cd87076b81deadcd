//! URI template expansion for templated resource parameters.
//!
//! Supports the RFC 6570 expressions resource URIs use in practice: simple
//! `{var}`, reserved `{+var}`, fragment `{#var}`, path `{/var}`, label
//! `{.var}` and form-style `{?a,b}` / `{&a}`. Undefined and `null` variables
//! expand to nothing.

use serde_json::Value;
use url::form_urlencoded;

use crate::domains::resources::Query;

/// Expand every `{...}` expression in `template` against `vars`.
pub fn expand(template: &str, vars: &Query) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let Some(len) = rest[open..].find('}') else {
            // unterminated expression is kept literally
            out.push_str(&rest[open..]);
            return out;
        };
        out.push_str(&expand_expression(&rest[open + 1..open + len], vars));
        rest = &rest[open + len + 1..];
    }
    out.push_str(rest);
    out
}

fn expand_expression(expression: &str, vars: &Query) -> String {
    let (operator, names) = match expression.chars().next() {
        Some(op @ ('+' | '#' | '/' | '.' | '?' | '&')) => (Some(op), &expression[1..]),
        _ => (None, expression),
    };
    let reserved = matches!(operator, Some('+' | '#'));
    let encode = |raw: String| {
        if reserved {
            raw
        } else {
            form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>()
        }
    };

    let defined: Vec<(&str, String)> = names
        .split(',')
        .map(str::trim)
        .filter_map(|name| Some((name, encode(render(vars.get(name)?)?))))
        .collect();
    if defined.is_empty() {
        return String::new();
    }

    let values = || defined.iter().map(|(_, v)| v.as_str()).collect::<Vec<_>>();
    match operator {
        Some(op @ ('?' | '&')) => {
            let pairs: Vec<String> = defined.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}{}", op, pairs.join("&"))
        }
        Some('/') => format!("/{}", values().join("/")),
        Some('.') => format!(".{}", values().join(".")),
        Some('#') => format!("#{}", values().join(",")),
        _ => values().join(","),
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().filter_map(render).collect();
            (!rendered.is_empty()).then(|| rendered.join(","))
        }
        Value::Object(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Query {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_form_query_expansion() {
        let q = vars(json!({"name": "koriym", "page": 2}));
        assert_eq!(
            expand("app://self/login{?name,page}", &q),
            "app://self/login?name=koriym&page=2"
        );
        assert_eq!(expand("app://self/login?a=1{&name}", &q), "app://self/login?a=1&name=koriym");
    }

    #[test]
    fn test_undefined_variables_vanish() {
        let q = vars(json!({"other": 1, "gone": null}));
        assert_eq!(expand("app://self/login{?name,gone}", &q), "app://self/login");
        assert_eq!(expand("app://self/user/{id}", &q), "app://self/user/");
    }

    #[test]
    fn test_simple_and_path_expansion_encode_values() {
        let q = vars(json!({"id": 10, "tag": "a b/c"}));
        assert_eq!(expand("app://self/user/{id}", &q), "app://self/user/10");
        assert_eq!(expand("app://self/tag{/tag}", &q), "app://self/tag/a+b%2Fc");
        assert_eq!(expand("app://self/raw/{+tag}", &q), "app://self/raw/a b/c");
    }

    #[test]
    fn test_unterminated_expression_kept() {
        let q = vars(json!({"id": 1}));
        assert_eq!(expand("app://self/user{?id", &q), "app://self/user{?id");
    }
}
