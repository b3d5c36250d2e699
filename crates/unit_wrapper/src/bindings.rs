// crates/unit_wrapper/src/bindings.rs

//! Names a JavaScript / TSX source introduces: `const`/`let`/`var`
//! declarations (plain and destructured), `function` parameters and arrow
//! function parameters. Found by pattern matching, not by parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap());
static DESTRUCTURING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:const|let|var)\s*([\[{][^=;]*?)\s*=").unwrap());
static FUNCTION_PARAMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfunction\b[^(]*\(([^()]*)\)").unwrap());
static ARROW_PARAMS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]*)\)\s*=>").unwrap());
static ARROW_SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_$][A-Za-z0-9_$]*)\s*=>").unwrap());

/// Returns every name `src` binds.
pub fn declared_identifiers(src: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for caps in DECLARATION_RE.captures_iter(src) {
        out.insert(caps[1].to_string());
    }
    for re in [&*DESTRUCTURING_RE, &*FUNCTION_PARAMS_RE, &*ARROW_PARAMS_RE] {
        for caps in re.captures_iter(src) {
            collect_bindings(&caps[1], &mut out);
        }
    }
    for caps in ARROW_SINGLE_RE.captures_iter(src) {
        out.insert(caps[1].to_string());
    }
    out
}

/// Adds the names bound by a parameter list or destructuring pattern.
fn collect_bindings(pattern: &str, out: &mut BTreeSet<String>) {
    for element in split_top_level(pattern, ',') {
        let element = element.trim();
        let element = element.strip_prefix("...").unwrap_or(element).trim_start();
        match element.as_bytes().first() {
            Some(b'{') => {
                for field in split_top_level(enclosed(element), ',') {
                    // `{ key: binding }` binds the right-hand side.
                    let key = split_top_level(field, ':')[0];
                    let target = field.get(key.len() + 1..).unwrap_or(field);
                    collect_bindings(target, out);
                }
            }
            Some(b'[') => collect_bindings(enclosed(element), out),
            _ => {
                let len = element
                    .bytes()
                    .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
                    .count();
                let name = &element[..len];
                if name.bytes().next().is_some_and(|b| !b.is_ascii_digit()) {
                    out.insert(name.to_string());
                }
            }
        }
    }
}

/// Splits `s` on `sep` where it is not nested inside brackets.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&s[last..i]);
                last = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[last..]);
    parts
}

/// The text between the opening bracket at the start of `s` and its match.
/// Anything after the match, such as a `: Type` annotation, is dropped.
fn enclosed(s: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    return &s[1..i];
                }
            }
            _ => {}
        }
    }
    &s[1..]
}
