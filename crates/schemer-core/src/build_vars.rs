//! Runtime build variables script (`build-vars.js`).
//!
//! The application reads `window.buildVars` at startup to learn which scheme
//! it was built with.

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue, json};
use serde_yaml::Value as YamlValue;
use std::path::Path;

use crate::scheme::ResolvedScheme;
use crate::template::{CSP_KEY, flatten_csp};
use crate::version::short_revision;

/// Global the generated script assigns.
pub const BUILD_VARS_GLOBAL: &str = "window.buildVars";

/// Facts about the build itself, independent of the scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInfo {
    pub timestamp: DateTime<Utc>,
    /// Short source revision, when building from a git checkout.
    pub revision: Option<String>,
}

impl BuildInfo {
    /// Current time plus the revision of the repository containing `project_root`.
    pub fn capture(project_root: &Path) -> Self {
        Self {
            timestamp: Utc::now(),
            revision: short_revision(project_root),
        }
    }
}

/// Render the build variables script for `resolved`.
pub fn render_build_vars(resolved: &ResolvedScheme, info: &BuildInfo) -> anyhow::Result<String> {
    let mut properties = Map::new();
    for (key, value) in &resolved.variables {
        let json_value = match value {
            YamlValue::Mapping(directives) if key == CSP_KEY => {
                JsonValue::String(flatten_csp(directives))
            }
            other => serde_json::to_value(other)
                .with_context(|| format!("Variable '{}' cannot be exported to JSON", key))?,
        };
        properties.insert(key.clone(), json_value);
    }

    let vars = json!({
        "scheme": resolved.selector(),
        "debug": resolved.debug,
        "buildTimestamp": info.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        "commitShortSha": info.revision,
        "properties": properties,
    });

    let body = serde_json::to_string_pretty(&vars).context("Failed to serialize build variables")?;
    Ok(format!("{BUILD_VARS_GLOBAL} = {body};\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::Variables;
    use chrono::TimeZone;

    fn resolved(variables: Variables) -> ResolvedScheme {
        ResolvedScheme {
            name: "dev".into(),
            override_name: None,
            debug: true,
            chain: vec!["dev".into()],
            variables,
        }
    }

    fn parse_body(script: &str) -> JsonValue {
        let body = script
            .strip_prefix("window.buildVars = ")
            .and_then(|s| s.strip_suffix(";\n"))
            .unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn script_assigns_global_object() {
        let mut variables = Variables::new();
        variables.insert("API_URL".into(), YamlValue::String("http://base".into()));
        variables.insert("RETRIES".into(), YamlValue::from(3));
        let info = BuildInfo {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            revision: Some("abc1234".into()),
        };

        let script = render_build_vars(&resolved(variables), &info).unwrap();
        let vars = parse_body(&script);

        assert_eq!(vars["scheme"], "dev");
        assert_eq!(vars["debug"], true);
        assert_eq!(vars["buildTimestamp"], "2024-05-01T12:30:00Z");
        assert_eq!(vars["commitShortSha"], "abc1234");
        assert_eq!(vars["properties"]["API_URL"], "http://base");
        assert_eq!(vars["properties"]["RETRIES"], 3);
    }

    #[test]
    fn missing_revision_is_null() {
        let info = BuildInfo {
            timestamp: Utc::now(),
            revision: None,
        };
        let vars = parse_body(&render_build_vars(&resolved(Variables::new()), &info).unwrap());
        assert!(vars["commitShortSha"].is_null());
    }

    #[test]
    fn csp_is_exported_flattened() {
        let mut variables = Variables::new();
        variables.insert(
            CSP_KEY.into(),
            serde_yaml::from_str("{default_src: [\"'self'\"]}").unwrap(),
        );
        let info = BuildInfo {
            timestamp: Utc::now(),
            revision: None,
        };
        let vars = parse_body(&render_build_vars(&resolved(variables), &info).unwrap());
        assert_eq!(vars["properties"][CSP_KEY], "default-src 'self'");
    }
}
