//! Conversion of replacement values to substitution text.

use std::collections::BTreeMap;

use serde_yaml::Value;

use super::csp::{CSP_KEY, flatten_csp};
use crate::scheme::Variables;

/// Variables converted to the exact text that replaces each `${KEY}`.
pub type RenderedVariables = BTreeMap<String, String>;

/// Render every variable to its substitution text.
///
/// A structured `CONTENT_SECURITY_POLICY` is flattened into a header string.
pub fn render_variables(variables: &Variables) -> RenderedVariables {
    variables
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Mapping(directives) if key == CSP_KEY => flatten_csp(directives),
                other => value_to_string(other),
            };
            (key.clone(), text)
        })
        .collect()
}

/// Convert a YAML value to text.
///
/// Strings are kept verbatim, null becomes empty, and sequences or mappings
/// are written as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .or_else(|_| serde_yaml::to_string(value).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
    }
}
