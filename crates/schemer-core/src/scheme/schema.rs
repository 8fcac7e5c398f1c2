//! Schema for the schemes document (`schemes.yml`).
//!
//! ```yaml
//! default: dev
//! schemes:
//!   base:
//!     replacements:
//!       API_URL: https://api.example.com
//!   dev:
//!     base: base
//!     debug: true
//!     replacements:
//!       API_URL: http://localhost:8100
//! overrides:
//!   device:
//!     API_URL: http://192.168.0.10:8100
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat variable map: name to scalar or structured YAML value.
pub type Variables = BTreeMap<String, serde_yaml::Value>;

/// Root of the schemes document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemesDocument {
    /// Scheme used when none is requested explicitly.
    #[serde(default)]
    pub default: Option<String>,

    /// Named schemes. `None` when the section is missing entirely.
    #[serde(default)]
    pub schemes: Option<BTreeMap<String, Scheme>>,

    /// Named flat override fragments, selected with `scheme,override`.
    #[serde(default)]
    pub overrides: Option<BTreeMap<String, Variables>>,
}

/// A single named build profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheme {
    /// Parent scheme to inherit replacements from.
    #[serde(default)]
    pub base: Option<String>,

    /// Debug builds skip bundling and keep individual asset references.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub replacements: Option<Variables>,
}

/// Scheme after walking its base chain and applying any override.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScheme {
    /// Name of the requested scheme (without the override suffix).
    pub name: String,
    /// Override applied on top, if any.
    pub override_name: Option<String>,
    /// Debug flag of the requested scheme; ancestors never contribute it.
    pub debug: bool,
    /// Scheme names visited, starting with the requested one.
    pub chain: Vec<String>,
    pub variables: Variables,
}

impl ResolvedScheme {
    /// `name` or `name,override` as it would be requested.
    pub fn selector(&self) -> String {
        match &self.override_name {
            Some(over) => format!("{},{}", self.name, over),
            None => self.name.clone(),
        }
    }
}

/// A requested scheme name split into scheme and optional override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSelection {
    pub scheme: String,
    pub override_name: Option<String>,
}

impl SchemeSelection {
    /// Split `scheme[,override]` at the first comma. An empty override
    /// suffix (`dev,`) selects no override.
    pub fn parse(requested: &str) -> Self {
        match requested.split_once(',') {
            Some((scheme, over)) => {
                let over = over.trim();
                Self {
                    scheme: scheme.trim().to_string(),
                    override_name: (!over.is_empty()).then(|| over.to_string()),
                }
            }
            None => Self {
                scheme: requested.trim().to_string(),
                override_name: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_without_override() {
        let selection = SchemeSelection::parse("dev");
        assert_eq!(selection.scheme, "dev");
        assert_eq!(selection.override_name, None);
    }

    #[test]
    fn selection_with_override() {
        let selection = SchemeSelection::parse("dev, device");
        assert_eq!(selection.scheme, "dev");
        assert_eq!(selection.override_name.as_deref(), Some("device"));
    }

    #[test]
    fn selection_with_empty_override() {
        let selection = SchemeSelection::parse("dev,");
        assert_eq!(selection.override_name, None);
    }

    #[test]
    fn selector_includes_override() {
        let resolved = ResolvedScheme {
            name: "prod".into(),
            override_name: Some("staging".into()),
            debug: false,
            chain: vec!["prod".into()],
            variables: Variables::new(),
        };
        assert_eq!(resolved.selector(), "prod,staging");
    }
}
