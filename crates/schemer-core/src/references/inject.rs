//! Replacement of `<!-- references:KIND -->` markers with asset tags.

use std::sync::LazyLock;

use regex::Regex;

use super::manifest::{ResourceManifest, is_live_url};
use crate::config::BundlesConfig;
use crate::types::ResourceKind;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*references:([A-Za-z]+)\s*-->").expect("marker pattern is valid")
});

/// Appends a stylesheet link to `<head>` without blocking rendering.
const CSS_LOADER: &str = "(function(h){var l=document.createElement('link');l.rel='stylesheet';l.href=h;document.getElementsByTagName('head')[0].appendChild(l);})";

/// Appends a script that downloads in parallel but executes in insertion order.
const SCRIPT_LOADER: &str = "(function(s){var e=document.createElement('script');e.src=s;e.async=false;document.getElementsByTagName('head')[0].appendChild(e);})";

/// How references are emitted.
#[derive(Debug, Clone, Copy)]
pub struct InjectOptions<'a> {
    /// Reference bundles instead of individual files.
    pub bundled: bool,
    pub bundles: &'a BundlesConfig,
    /// Short revision appended as `?v=` to bundle references.
    pub revision: Option<&'a str>,
}

/// Replace every known reference marker in `source`.
///
/// A marker alone on its line is replaced line by line, keeping its
/// indentation; with nothing to emit the line disappears entirely. Unknown
/// `references:*` markers are kept.
pub fn inject_references(
    source: &str,
    manifest: &ResourceManifest,
    options: &InjectOptions<'_>,
) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in MARKER.captures_iter(source) {
        let Some(kind) = ResourceKind::from_marker_name(&caps[1]) else {
            continue;
        };
        let Some(marker) = caps.get(0) else {
            continue;
        };
        let tags = reference_tags(kind, manifest, options);

        let line_start = source[..marker.start()].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[marker.end()..]
            .find('\n')
            .map_or(source.len(), |i| marker.end() + i + 1);
        let indent = &source[line_start..marker.start()];
        let trailing = &source[marker.end()..line_end];

        let own_line =
            line_start >= last && indent.trim().is_empty() && trailing.trim().is_empty();

        if own_line {
            out.push_str(&source[last..line_start]);
            let newline = if trailing.ends_with("\r\n") {
                "\r\n"
            } else if trailing.ends_with('\n') {
                "\n"
            } else {
                ""
            };
            if !tags.is_empty() {
                let separator = if newline.is_empty() { "\n" } else { newline };
                let lines: Vec<String> = tags.iter().map(|tag| format!("{indent}{tag}")).collect();
                out.push_str(&lines.join(separator));
                out.push_str(newline);
            }
            last = line_end;
        } else {
            out.push_str(&source[last..marker.start()]);
            out.push_str(&tags.concat());
            last = marker.end();
        }
    }

    out.push_str(&source[last..]);
    out
}

/// Tags emitted for one resource kind.
pub fn reference_tags(
    kind: ResourceKind,
    manifest: &ResourceManifest,
    options: &InjectOptions<'_>,
) -> Vec<String> {
    let entries = manifest.entries(kind);

    if !options.bundled {
        return entries
            .iter()
            .map(|entry| plain_tag(kind, entry, is_live_url(entry)))
            .collect();
    }

    let mut tags: Vec<String> = entries
        .iter()
        .filter(|entry| is_live_url(entry))
        .map(|entry| plain_tag(kind, entry, true))
        .collect();

    let bundle = bundle_href(options.bundles.path_for(kind), options.revision);
    match kind {
        ResourceKind::Css => {
            tags.push(format!("<script>{CSS_LOADER}('{}');</script>", js_string(&bundle)));
            tags.push(format!(
                "<noscript><link rel=\"stylesheet\" href=\"{}\"></noscript>",
                html_attr(&bundle)
            ));
        }
        ResourceKind::Lib | ResourceKind::Js => {
            tags.push(format!("<script>{SCRIPT_LOADER}('{}');</script>", js_string(&bundle)));
        }
    }
    tags
}

fn plain_tag(kind: ResourceKind, href: &str, live: bool) -> String {
    let async_attr = if live { " async" } else { "" };
    match kind {
        ResourceKind::Css => format!(
            "<link rel=\"stylesheet\" href=\"{}\"{}>",
            html_attr(href),
            async_attr
        ),
        ResourceKind::Lib | ResourceKind::Js => {
            format!("<script src=\"{}\"{}></script>", html_attr(href), async_attr)
        }
    }
}

fn bundle_href(path: &str, revision: Option<&str>) -> String {
    match revision {
        Some(rev) if !rev.is_empty() => {
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{path}{separator}v={rev}")
        }
        _ => path.to_string(),
    }
}

fn html_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
