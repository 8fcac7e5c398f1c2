//! Scheme resolution: base chain walk plus override application.

use std::path::Path;

use tracing::debug;

use super::error::{Result, SchemeError};
use super::parser::parse_schemes_file;
use super::schema::{ResolvedScheme, SchemeSelection, SchemesDocument};

/// Resolve a scheme from the document at `path`.
///
/// The file is read and parsed on every call.
pub fn resolve_scheme(path: &Path, requested: &str) -> Result<ResolvedScheme> {
    parse_schemes_file(path)?.resolve(requested)
}

impl SchemesDocument {
    /// Resolve `scheme[,override]` into a flat variable map.
    ///
    /// Replacements closer to the requested scheme win over inherited ones.
    /// Override values win over everything.
    pub fn resolve(&self, requested: &str) -> Result<ResolvedScheme> {
        let schemes = self.schemes.as_ref().ok_or(SchemeError::MissingSchemes)?;
        let selection = SchemeSelection::parse(requested);

        let scheme = schemes
            .get(&selection.scheme)
            .ok_or_else(|| SchemeError::UnknownScheme(selection.scheme.clone()))?;

        let mut variables = scheme.replacements.clone().unwrap_or_default();
        let mut chain = vec![selection.scheme.clone()];
        let mut current = scheme;

        while let Some(base_name) = current.base.as_deref() {
            if chain.iter().any(|seen| seen == base_name) {
                chain.push(base_name.to_string());
                return Err(SchemeError::CyclicBase { chain });
            }

            let base = schemes
                .get(base_name)
                .ok_or_else(|| SchemeError::UnknownBase {
                    scheme: chain.last().cloned().unwrap_or_default(),
                    base: base_name.to_string(),
                })?;

            if let Some(inherited) = &base.replacements {
                for (key, value) in inherited {
                    variables
                        .entry(key.clone())
                        .or_insert_with(|| value.clone());
                }
            }

            chain.push(base_name.to_string());
            current = base;
        }

        if let Some(override_name) = &selection.override_name {
            let overrides = self
                .overrides
                .as_ref()
                .ok_or_else(|| SchemeError::MissingOverrides(override_name.clone()))?;
            let fragment = overrides
                .get(override_name)
                .ok_or_else(|| SchemeError::UnknownOverride(override_name.clone()))?;

            for (key, value) in fragment {
                variables.insert(key.clone(), value.clone());
            }
        }

        debug!(
            scheme = %selection.scheme,
            override_name = ?selection.override_name,
            chain = %chain.join(" -> "),
            variables = variables.len(),
            "resolved scheme"
        );

        Ok(ResolvedScheme {
            name: selection.scheme,
            override_name: selection.override_name,
            debug: scheme.debug,
            chain,
            variables,
        })
    }

    /// Resolve `requested`, falling back to the document's `default`.
    pub fn resolve_or_default(&self, requested: Option<&str>) -> Result<ResolvedScheme> {
        match requested {
            Some(name) => self.resolve(name),
            None => {
                let default = self.default.as_deref().ok_or(SchemeError::NoDefault)?;
                self.resolve(default)
            }
        }
    }

    /// Resolve the default selector and every scheme, returning the first
    /// failure.
    pub fn validate(&self) -> Result<()> {
        let schemes = self.schemes.as_ref().ok_or(SchemeError::MissingSchemes)?;

        if let Some(default) = &self.default {
            self.resolve(default)?;
        }

        for name in schemes.keys() {
            self.resolve(name)?;
        }
        Ok(())
    }

    /// Scheme names in sorted order.
    pub fn scheme_names(&self) -> Vec<&str> {
        self.schemes
            .as_ref()
            .map(|schemes| schemes.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_schemes_str;
    use super::*;
    use serde_yaml::Value;

    fn doc(yaml: &str) -> SchemesDocument {
        parse_schemes_str(yaml).unwrap()
    }

    fn string(value: &Value) -> &str {
        value.as_str().unwrap()
    }

    #[test]
    fn scheme_without_base_is_identity() {
        let document = doc(r#"
schemes:
  prod:
    replacements:
      API_URL: https://api
      RETRIES: 3
"#);
        let resolved = document.resolve("prod").unwrap();
        let own = document.schemes.as_ref().unwrap()["prod"]
            .replacements
            .clone()
            .unwrap();
        assert_eq!(resolved.variables, own);
        assert_eq!(resolved.chain, vec!["prod"]);
    }

    #[test]
    fn closer_ancestor_wins() {
        let document = doc(r#"
schemes:
  c:
    replacements:
      ONLY_C: c
      SHARED: c
      AB: c
  b:
    base: c
    replacements:
      ONLY_B: b
      SHARED: b
  a:
    base: b
    replacements:
      ONLY_A: a
      AB: a
"#);
        let resolved = document.resolve("a").unwrap();
        let vars = &resolved.variables;
        assert_eq!(vars.len(), 5);
        assert_eq!(string(&vars["ONLY_A"]), "a");
        assert_eq!(string(&vars["ONLY_B"]), "b");
        assert_eq!(string(&vars["ONLY_C"]), "c");
        assert_eq!(string(&vars["SHARED"]), "b");
        assert_eq!(string(&vars["AB"]), "a");
        assert_eq!(resolved.chain, vec!["a", "b", "c"]);
    }

    #[test]
    fn debug_comes_from_requested_scheme() {
        let document = doc(r#"
schemes:
  base:
    debug: true
  release:
    base: base
"#);
        assert!(!document.resolve("release").unwrap().debug);
        assert!(document.resolve("base").unwrap().debug);
    }

    #[test]
    fn override_wins_over_chain() {
        let document = doc(r#"
schemes:
  base:
    replacements:
      API_URL: http://base
      NAME: base
  dev:
    base: base
    replacements:
      API_URL: http://dev
overrides:
  device:
    API_URL: http://device
    EXTRA: yes
"#);
        let resolved = document.resolve("dev,device").unwrap();
        assert_eq!(string(&resolved.variables["API_URL"]), "http://device");
        assert_eq!(string(&resolved.variables["NAME"]), "base");
        assert!(resolved.variables.contains_key("EXTRA"));
        assert_eq!(resolved.override_name.as_deref(), Some("device"));
    }

    #[test]
    fn unknown_scheme_fails() {
        let document = doc("schemes:\n  dev: {}\n");
        assert!(matches!(
            document.resolve("prod"),
            Err(SchemeError::UnknownScheme(name)) if name == "prod"
        ));
    }

    #[test]
    fn unknown_base_fails() {
        let document = doc("schemes:\n  dev:\n    base: ghost\n");
        match document.resolve("dev") {
            Err(SchemeError::UnknownBase { scheme, base }) => {
                assert_eq!(scheme, "dev");
                assert_eq!(base, "ghost");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_overrides_section_fails() {
        let document = doc("schemes:\n  dev: {}\n");
        assert!(matches!(
            document.resolve("dev,device"),
            Err(SchemeError::MissingOverrides(_))
        ));
    }

    #[test]
    fn unknown_override_fails() {
        let document = doc("schemes:\n  dev: {}\noverrides:\n  other: {}\n");
        assert!(matches!(
            document.resolve("dev,device"),
            Err(SchemeError::UnknownOverride(name)) if name == "device"
        ));
    }

    #[test]
    fn cyclic_base_chain_fails_fast() {
        let document = doc(r#"
schemes:
  a:
    base: b
  b:
    base: c
  c:
    base: a
"#);
        match document.resolve("a") {
            Err(SchemeError::CyclicBase { chain }) => {
                assert_eq!(chain, vec!["a", "b", "c", "a"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn self_referencing_base_is_a_cycle() {
        let document = doc("schemes:\n  a:\n    base: a\n");
        assert!(matches!(
            document.resolve("a"),
            Err(SchemeError::CyclicBase { .. })
        ));
    }

    #[test]
    fn default_is_used_when_nothing_requested() {
        let document = doc("default: dev\nschemes:\n  dev:\n    debug: true\n");
        let resolved = document.resolve_or_default(None).unwrap();
        assert_eq!(resolved.name, "dev");
        assert!(resolved.debug);
    }

    #[test]
    fn missing_default_fails() {
        let document = doc("schemes:\n  dev: {}\n");
        assert!(matches!(
            document.resolve_or_default(None),
            Err(SchemeError::NoDefault)
        ));
    }

    #[test]
    fn validate_reports_broken_scheme() {
        let document = doc("schemes:\n  ok: {}\n  broken:\n    base: ghost\n");
        assert!(matches!(
            document.validate(),
            Err(SchemeError::UnknownBase { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_default() {
        let document = doc("default: ghost\nschemes:\n  ok: {}\n");
        assert!(matches!(
            document.validate(),
            Err(SchemeError::UnknownScheme(_))
        ));
    }

    #[test]
    fn validate_rejects_unknown_default_override() {
        let document = doc("default: dev,ghost\nschemes:\n  dev: {}\n");
        assert!(matches!(
            document.validate(),
            Err(SchemeError::MissingOverrides(name)) if name == "ghost"
        ));

        let document =
            doc("default: dev,ghost\nschemes:\n  dev: {}\noverrides:\n  device: {}\n");
        assert!(matches!(
            document.validate(),
            Err(SchemeError::UnknownOverride(name)) if name == "ghost"
        ));
    }
}
