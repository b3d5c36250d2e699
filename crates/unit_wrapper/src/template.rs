// crates/unit_wrapper/src/template.rs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// `{name}`, `{params}` … ; anything else in braces is left alone.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Expands `{key}` placeholders in a single pass.
///
/// Substituted values are never re-scanned, so a value that itself contains
/// `{name}` comes out verbatim. Unknown placeholders are kept as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
