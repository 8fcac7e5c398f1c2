//! Configure command implementation.
//!
//! Resolves a scheme, renders every master file that applies to the selected
//! platform, and writes the runtime build variables script.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};

use crate::build_vars::{BuildInfo, render_build_vars};
use crate::config::MasterEntry;
use crate::context::BuildContext;
use crate::fs::stage_output;
use crate::references::{InjectOptions, ResourceManifest, inject_references};
use crate::template::{render_variables, substitute, unresolved_tokens};
use crate::types::Platform;

/// Options for the configure command
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// `scheme[,override]`; the document default when `None`
    pub scheme: Option<String>,
    /// Platform whose master set is rendered
    pub platform: Platform,
    /// Force bundled (`Some(true)`) or unbundled references; follows `!debug` when `None`
    pub bundled: Option<bool>,
    /// Fixed build facts instead of capturing the clock and git revision
    pub build_info: Option<BuildInfo>,
}

impl ConfigureOptions {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// Set the scheme selector
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Override the bundling decision
    pub fn with_bundled(mut self, bundled: bool) -> Self {
        self.bundled = Some(bundled);
        self
    }

    pub fn with_build_info(mut self, info: BuildInfo) -> Self {
        self.build_info = Some(info);
        self
    }
}

/// Report from a configure run
#[derive(Debug, Clone)]
pub struct ConfigureReport {
    /// Resolved selector (`scheme` or `scheme,override`)
    pub scheme: String,
    pub debug: bool,
    pub bundled: bool,
    pub platform: Platform,
    pub revision: Option<String>,
    /// Files written, in write order; the build variables script is last
    pub written: Vec<PathBuf>,
    /// Unresolved tokens and similar non-fatal findings
    pub warnings: Vec<String>,
}

/// Master read from disk and rendered in memory, not yet written
struct RenderedMaster {
    output: PathBuf,
    content: String,
}

/// Configure command orchestrator
#[derive(Debug)]
pub struct ConfigureCommand {
    context: BuildContext,
}

impl ConfigureCommand {
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    /// Create with the current directory as project root
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(BuildContext::with_defaults()?))
    }

    /// Render everything, stage every output, then move them into place.
    /// A failure while loading, rendering or staging leaves every output
    /// untouched.
    pub fn execute(&self, options: &ConfigureOptions) -> anyhow::Result<ConfigureReport> {
        let ctx = &self.context;
        let config = ctx.config();

        let resolved = ctx
            .scheme_store()
            .resolve(options.scheme.as_deref())
            .with_context(|| {
                format!(
                    "Failed to resolve scheme from {}",
                    ctx.schemes_path().display()
                )
            })?;
        let bundled = options.bundled.unwrap_or(!resolved.debug);
        let build_info = options
            .build_info
            .clone()
            .unwrap_or_else(|| BuildInfo::capture(ctx.project_root()));

        info!(
            scheme = %resolved.selector(),
            platform = %options.platform,
            debug = resolved.debug,
            bundled,
            "configuring"
        );
        if build_info.revision.is_none() && bundled {
            warn!("no git revision available, bundle references will not be cache-busted");
        }

        let masters: Vec<&MasterEntry> = config.masters_for(options.platform).collect();
        let manifest = if masters.iter().any(|m| m.inject_references) {
            Some(ResourceManifest::load(&ctx.resources_path())?)
        } else {
            None
        };

        let rendered_vars = render_variables(&resolved.variables);
        let inject_options = InjectOptions {
            bundled,
            bundles: &config.bundles,
            revision: build_info.revision.as_deref(),
        };

        let mut warnings = Vec::new();
        let mut rendered = Vec::with_capacity(masters.len() + 1);
        for master in masters {
            let source = ctx.resolve_path(&master.source);
            let mut text = std::fs::read_to_string(&source)
                .with_context(|| format!("Failed to read master file: {}", source.display()))?;

            if let Some(manifest) = manifest.as_ref().filter(|_| master.inject_references) {
                text = inject_references(&text, manifest, &inject_options);
            }

            let missing = unresolved_tokens(&rendered_vars, &text);
            if !missing.is_empty() {
                warnings.push(format!(
                    "{}: no value for {}",
                    master.source,
                    missing
                        .iter()
                        .map(|key| format!("${{{key}}}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }

            rendered.push(RenderedMaster {
                output: ctx.resolve_path(&master.output),
                content: substitute(&rendered_vars, &text),
            });
        }

        rendered.push(RenderedMaster {
            output: ctx.build_vars_path(),
            content: render_build_vars(&resolved, &build_info)?,
        });

        let staged = rendered
            .iter()
            .map(|item| stage_output(&item.output, &item.content))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(staged.len());
        for output in staged {
            let path = output.commit()?;
            info!(path = %path.display(), "wrote");
            written.push(path);
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(ConfigureReport {
            scheme: resolved.selector(),
            debug: resolved.debug,
            bundled,
            platform: options.platform,
            revision: build_info.revision,
            written,
            warnings,
        })
    }
}
