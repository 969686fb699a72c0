//! Placeholder syntax: `{{name}}` markers inside fragment bodies.
//!
//! Build-tool property references such as `${scala.version}` are plain text
//! here and pass through untouched.

use crate::constants::{PLACEHOLDER_CLOSE, PLACEHOLDER_NAME, PLACEHOLDER_OPEN};
use regex::Regex;
use std::sync::LazyLock;

/// Matches a well-formed placeholder; group 1 is the name.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{\{{\s*({PLACEHOLDER_NAME})\s*\}}\}}")).unwrap()
});

/// Matches anything that looks like a marker, well-formed or not.
static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").unwrap());

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{PLACEHOLDER_NAME}$")).unwrap());

/// Returns true if `name` can be used as a placeholder name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Returns true if `text` contains an opening or closing delimiter.
pub fn contains_delimiter(text: &str) -> bool {
    text.contains(PLACEHOLDER_OPEN) || text.contains(PLACEHOLDER_CLOSE)
}

/// Returns every marker still present in `text`, e.g. `{{version}}`.
pub fn leftover_markers(text: &str) -> Vec<&str> {
    MARKER_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Substitutes every placeholder in `text` using `lookup`.
///
/// Single pass: inserted values are not scanned again.
///
/// # Errors
/// Returns the name of the first placeholder `lookup` cannot resolve.
pub fn substitute<'a, F>(text: &str, lookup: F) -> Result<String, String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in PLACEHOLDER_PATTERN.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = lookup(name.as_str()).ok_or_else(|| name.as_str().to_string())?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}
