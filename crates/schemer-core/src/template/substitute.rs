//! `${KEY}` substitution.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::value::{RenderedVariables, render_variables};
use crate::scheme::Variables;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^{}]*)\}").expect("token pattern is valid"));

/// Replace every `${KEY}` with the rendered value of `KEY`.
///
/// Tokens without a matching variable are left as they are. Replacement text
/// is never rescanned, so values containing `${...}` come through literally.
pub fn apply_replacements(variables: &Variables, source: &str) -> String {
    substitute(&render_variables(variables), source)
}

/// Substitute pre-rendered values into `source`.
pub fn substitute(rendered: &RenderedVariables, source: &str) -> String {
    TOKEN
        .replace_all(source, |caps: &Captures<'_>| match rendered.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Keys referenced in `source` that have no rendered value.
pub fn unresolved_tokens<'a>(rendered: &RenderedVariables, source: &'a str) -> Vec<&'a str> {
    let mut missing: Vec<&str> = TOKEN
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|key| !rendered.contains_key(*key))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    missing
}
