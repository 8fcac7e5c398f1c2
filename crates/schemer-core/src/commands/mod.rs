//! High-level commands for schemer operations.
//!
//! These are the entry points the CLI calls; each owns a [`BuildContext`]
//! and returns a report for the frontend to print.
//!
//! [`BuildContext`]: crate::context::BuildContext

pub mod configure;
pub mod list;
pub mod resolve;

pub use configure::{ConfigureCommand, ConfigureOptions, ConfigureReport};
pub use list::{CheckReport, ListReport, SchemeSummary, SchemesCommand};
pub use resolve::{ResolveCommand, ResolveReport};
