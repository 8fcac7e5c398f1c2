//! List and check commands over the schemes document.

use anyhow::Context;

use crate::context::BuildContext;
use crate::scheme::{SchemeSelection, SchemesDocument};

/// One row of `schemer list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSummary {
    pub name: String,
    pub base: Option<String>,
    pub debug: bool,
    /// Whether this is the document's default scheme
    pub is_default: bool,
    /// Replacements declared directly on the scheme (not inherited)
    pub own_variables: usize,
}

/// Report from a list operation
#[derive(Debug, Clone)]
pub struct ListReport {
    pub schemes: Vec<SchemeSummary>,
    pub overrides: Vec<String>,
}

/// Report from a check operation
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub schemes: usize,
    pub overrides: usize,
    pub default: Option<String>,
}

#[derive(Debug)]
pub struct SchemesCommand {
    context: BuildContext,
}

impl SchemesCommand {
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(BuildContext::with_defaults()?))
    }

    fn load(&self) -> anyhow::Result<SchemesDocument> {
        let store = self.context.scheme_store();
        store
            .load()
            .with_context(|| format!("Failed to load schemes: {}", store.path().display()))
    }

    /// Summarise every scheme and override, sorted by name.
    pub fn list(&self) -> anyhow::Result<ListReport> {
        let document = self.load()?;
        let default = document
            .default
            .as_deref()
            .map(|d| SchemeSelection::parse(d).scheme);

        let schemes = document
            .schemes
            .iter()
            .flatten()
            .map(|(name, scheme)| SchemeSummary {
                name: name.clone(),
                base: scheme.base.clone(),
                debug: scheme.debug,
                is_default: default.as_deref() == Some(name.as_str()),
                own_variables: scheme.replacements.as_ref().map_or(0, |r| r.len()),
            })
            .collect();

        let overrides = document
            .overrides
            .iter()
            .flatten()
            .map(|(name, _)| name.clone())
            .collect();

        Ok(ListReport { schemes, overrides })
    }

    /// Resolve every scheme; the first failure is returned as the error.
    pub fn check(&self) -> anyhow::Result<CheckReport> {
        let document = self.load()?;
        document.validate()?;

        Ok(CheckReport {
            schemes: document.scheme_names().len(),
            overrides: document.overrides.as_ref().map_or(0, |o| o.len()),
            default: document.default.clone(),
        })
    }
}
