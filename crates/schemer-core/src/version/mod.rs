//! Source revision helpers.

pub mod git;

pub use git::{head_short_id, short_revision};
