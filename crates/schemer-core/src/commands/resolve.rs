//! Resolve command: show the effective variables of a scheme.

use anyhow::Context;

use crate::context::BuildContext;
use crate::scheme::ResolvedScheme;
use crate::template::{RenderedVariables, render_variables};

/// Report from a resolve operation
#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub resolved: ResolvedScheme,
    /// Variables as they would be substituted into masters
    pub rendered: RenderedVariables,
}

#[derive(Debug)]
pub struct ResolveCommand {
    context: BuildContext,
}

impl ResolveCommand {
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(BuildContext::with_defaults()?))
    }

    /// Resolve `scheme`, or the document default when `None`.
    pub fn execute(&self, scheme: Option<&str>) -> anyhow::Result<ResolveReport> {
        let resolved = self
            .context
            .scheme_store()
            .resolve(scheme)
            .with_context(|| {
                format!(
                    "Failed to resolve scheme from {}",
                    self.context.schemes_path().display()
                )
            })?;
        let rendered = render_variables(&resolved.variables);
        Ok(ResolveReport { resolved, rendered })
    }
}
