//! Schemer - build scheme resolver and master-file renderer
//!
//! Usage:
//!   schemer configure --scheme dev --prepare cordova
//!   schemer resolve --scheme prod,staging
//!   schemer list
//!   schemer check

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schemer_core::commands::{
    ConfigureCommand, ConfigureOptions, ConfigureReport, ResolveCommand, SchemesCommand,
};
use schemer_core::context::BuildContext;
use schemer_core::types::Platform;

#[derive(Parser)]
#[command(name = "schemer")]
#[command(about = "Build scheme resolver and master-file renderer", long_about = None)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render master files and build variables for a scheme
    Configure {
        /// Scheme to build, optionally with an override (`dev,device`)
        #[arg(long, short)]
        scheme: Option<String>,

        /// Platform whose master files are rendered
        #[arg(long, short, default_value = "web")]
        prepare: PlatformArg,

        /// Reference bundles instead of individual assets
        #[arg(long, conflicts_with = "no_bundle")]
        bundle: bool,

        /// Reference individual assets even for release schemes
        #[arg(long)]
        no_bundle: bool,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the resolved variables of a scheme
    Resolve {
        /// Scheme to resolve, optionally with an override (`prod,staging`)
        #[arg(long, short)]
        scheme: Option<String>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: ReportFormat,
    },

    /// List schemes and overrides
    List {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: ReportFormat,
    },

    /// Verify every scheme resolves
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No output unless something fails
    Quiet,
}

/// Formats for commands that only report and write nothing
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Default)]
enum ReportFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Cordova,
    Chrome,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Cordova => Platform::Cordova,
            PlatformArg::Chrome => Platform::Chrome,
            PlatformArg::Web => Platform::Web,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "schemer=debug,schemer_core=debug,info"
    } else {
        "schemer=info,schemer_core=info,warn"
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let context = match cli.project {
        Some(root) => BuildContext::load(root)?,
        None => BuildContext::with_defaults()?,
    };
    tracing::debug!(root = %context.project_root().display(), "project loaded");

    match cli.command {
        Commands::Configure {
            scheme,
            prepare,
            bundle,
            no_bundle,
            format,
        } => {
            let mut options = ConfigureOptions::new(prepare.into());
            if let Some(s) = scheme {
                options = options.with_scheme(s);
            }
            if bundle {
                options = options.with_bundled(true);
            } else if no_bundle {
                options = options.with_bundled(false);
            }

            let report = ConfigureCommand::new(context).execute(&options)?;
            print_configure_report(&report, format)?;
        }
        Commands::Resolve { scheme, format } => {
            run_resolve(context, scheme, format)?;
        }
        Commands::List { format } => {
            run_list(context, format)?;
        }
        Commands::Check => {
            let report = SchemesCommand::new(context).check()?;
            println!(
                "{} {} schemes and {} overrides resolve",
                style("✓").green(),
                report.schemes,
                report.overrides
            );
            if let Some(default) = report.default {
                println!("  default: {}", style(default).green());
            }
        }
    }

    Ok(())
}

fn print_configure_report(report: &ConfigureReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!(
                "✓ Configured scheme '{}' for {}",
                style(&report.scheme).green(),
                style(report.platform).cyan()
            );
            println!(
                "  Mode:     {}{}",
                if report.debug { "debug" } else { "release" },
                if report.bundled { ", bundled" } else { "" }
            );
            if let Some(rev) = &report.revision {
                println!("  Revision: {}", rev);
            }
            for path in &report.written {
                println!("  wrote {}", path.display());
            }
            for warning in &report.warnings {
                println!("  {} {}", style("⚠").yellow(), warning);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "scheme": report.scheme,
                "platform": report.platform.as_str(),
                "debug": report.debug,
                "bundled": report.bundled,
                "revision": report.revision,
                "written": report.written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                "warnings": report.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn run_resolve(context: BuildContext, scheme: Option<String>, format: ReportFormat) -> Result<()> {
    let report = ResolveCommand::new(context).execute(scheme.as_deref())?;

    match format {
        ReportFormat::Table => {
            println!(
                "{} {}",
                style(report.resolved.selector()).bold(),
                if report.resolved.debug { "(debug)" } else { "" }
            );
            println!("  chain: {}", report.resolved.chain.join(" -> "));
            let width = report.rendered.keys().map(String::len).max().unwrap_or(0);
            for (key, value) in &report.rendered {
                println!("  {:width$}  {}", style(key).cyan(), value, width = width);
            }
        }
        ReportFormat::Json => {
            let output = serde_json::json!({
                "scheme": report.resolved.selector(),
                "debug": report.resolved.debug,
                "chain": report.resolved.chain,
                "variables": report.rendered,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_list(context: BuildContext, format: ReportFormat) -> Result<()> {
    let report = SchemesCommand::new(context).list()?;

    match format {
        ReportFormat::Table => {
            for scheme in &report.schemes {
                let marker = if scheme.is_default { "*" } else { " " };
                let base = scheme
                    .base
                    .as_deref()
                    .map(|b| format!(" <- {}", b))
                    .unwrap_or_default();
                println!(
                    "{} {}{}{} ({} variables)",
                    marker,
                    style(&scheme.name).green(),
                    base,
                    if scheme.debug { " [debug]" } else { "" },
                    scheme.own_variables
                );
            }
            if !report.overrides.is_empty() {
                println!("overrides: {}", report.overrides.join(", "));
            }
        }
        ReportFormat::Json => {
            let schemes: Vec<_> = report
                .schemes
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "base": s.base,
                        "debug": s.debug,
                        "default": s.is_default,
                        "variables": s.own_variables,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "schemes": schemes,
                "overrides": report.overrides,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_flag_uses_short_o() {
        let cli = Cli::try_parse_from(["schemer", "resolve", "-o", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Resolve {
                format: ReportFormat::Json,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["schemer", "list", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                format: ReportFormat::Json
            }
        ));

        let cli = Cli::try_parse_from(["schemer", "configure", "-o", "quiet"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Configure {
                format: OutputFormat::Quiet,
                ..
            }
        ));
    }

    #[test]
    fn report_commands_reject_quiet() {
        assert!(Cli::try_parse_from(["schemer", "resolve", "-o", "quiet"]).is_err());
        assert!(Cli::try_parse_from(["schemer", "list", "-o", "quiet"]).is_err());
    }

    #[test]
    fn configure_flags_parse() {
        let cli = Cli::try_parse_from([
            "schemer", "-C", "app", "configure", "-s", "dev,device", "-p", "cordova", "--bundle",
        ])
        .unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("app")));
        match cli.command {
            Commands::Configure {
                scheme,
                prepare,
                bundle,
                no_bundle,
                format,
            } => {
                assert_eq!(scheme.as_deref(), Some("dev,device"));
                assert_eq!(Platform::from(prepare), Platform::Cordova);
                assert!(bundle);
                assert!(!no_bundle);
                assert_eq!(format, OutputFormat::Table);
            }
            _ => panic!("expected configure"),
        }

        assert!(
            Cli::try_parse_from(["schemer", "configure", "--bundle", "--no-bundle"]).is_err()
        );
    }
}
