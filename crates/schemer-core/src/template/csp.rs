//! Content Security Policy flattening.
//!
//! Schemes may describe the policy as a mapping of directive to sources:
//!
//! ```yaml
//! CONTENT_SECURITY_POLICY:
//!   default_src: ["'self'"]
//!   script_src: ["'self'", "https://cdn.example.com"]
//! ```
//!
//! which renders as `default-src 'self'; script-src 'self' https://cdn.example.com`.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use super::value::value_to_string;

/// Variable name holding the policy.
pub const CSP_KEY: &str = "CONTENT_SECURITY_POLICY";

/// Emission order for known directives. Anything else follows alphabetically.
pub const DIRECTIVE_ORDER: [&str; 15] = [
    "default-src",
    "script-src",
    "style-src",
    "img-src",
    "connect-src",
    "font-src",
    "object-src",
    "media-src",
    "frame-src",
    "child-src",
    "worker-src",
    "manifest-src",
    "form-action",
    "frame-ancestors",
    "base-uri",
];

/// Flatten a directive mapping into a single header value.
///
/// Directives with no sources are omitted; the result never depends on the
/// input key order.
pub fn flatten_csp(directives: &Mapping) -> String {
    let mut sources: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (name, value) in directives {
        let name = normalize_directive(&value_to_string(name));
        let entry = sources.entry(name).or_default();
        match value {
            Value::Sequence(items) => {
                entry.extend(
                    items
                        .iter()
                        .map(value_to_string)
                        .filter(|source| !source.is_empty()),
                );
            }
            Value::Null => {}
            scalar => {
                let source = value_to_string(scalar);
                if !source.is_empty() {
                    entry.push(source);
                }
            }
        }
    }

    let known = DIRECTIVE_ORDER
        .iter()
        .filter_map(|name| sources.get(*name).map(|list| (*name, list)));
    let unknown = sources
        .iter()
        .filter(|(name, _)| !DIRECTIVE_ORDER.contains(&name.as_str()))
        .map(|(name, list)| (name.as_str(), list));

    known
        .chain(unknown)
        .filter(|(_, list)| !list.is_empty())
        .map(|(name, list)| format!("{} {}", name, list.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `script_src` and `Script-Src` both become `script-src`.
fn normalize_directive(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(src: &str) -> Mapping {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn empty_directives_are_omitted() {
        let csp = mapping(r#"{script_src: ["'self'", "https://a.com"], img_src: []}"#);
        assert_eq!(flatten_csp(&csp), "script-src 'self' https://a.com");
    }

    #[test]
    fn order_is_fixed_regardless_of_input() {
        let csp = mapping(
            r#"
img_src: ["*"]
connect_src: ["https://api"]
default_src: ["'none'"]
"#,
        );
        assert_eq!(
            flatten_csp(&csp),
            "default-src 'none'; img-src *; connect-src https://api"
        );
    }

    #[test]
    fn unknown_directives_follow_known_ones_alphabetically() {
        let csp = mapping(
            r#"
upgrade_insecure_requests: ["x"]
report_uri: ["/csp"]
style_src: ["'unsafe-inline'"]
"#,
        );
        assert_eq!(
            flatten_csp(&csp),
            "style-src 'unsafe-inline'; report-uri /csp; upgrade-insecure-requests x"
        );
    }

    #[test]
    fn hyphenated_names_are_accepted() {
        let csp = mapping(r#"{"script-src": ["'self'"], media_src: ~}"#);
        assert_eq!(flatten_csp(&csp), "script-src 'self'");
    }

    #[test]
    fn empty_policy_is_empty_string() {
        assert_eq!(flatten_csp(&Mapping::new()), "");
    }
}
