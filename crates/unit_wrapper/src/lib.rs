// crates/unit_wrapper/src/lib.rs

//! Turns an extracted region body into a named, parameterized unit and
//! renders the short invocation that replaces the region.
//!
//! The parameter list is checked against the body before anything is
//! rendered: every ambient name the body refers to must be declared, and
//! every declared parameter must be used.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use thiserror::Error;

pub mod bindings;
pub mod scan;
pub mod template;

pub use bindings::declared_identifiers;
pub use scan::referenced_identifiers;

static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Errors raised while validating and wrapping a unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unit {unit:?}: {name:?} is not a valid identifier")]
    InvalidIdentifier { unit: String, name: String },

    #[error("unit {unit:?}: parameter {name:?} is declared twice")]
    DuplicateParameter { unit: String, name: String },

    /// The body's free variables and the declared parameters disagree.
    #[error("unit {unit:?}: parameter mismatch (missing: [{}], unused: [{}])", .missing.join(", "), .unused.join(", "))]
    ParameterMismatch {
        unit: String,
        missing: Vec<String>,
        unused: Vec<String>,
    },
}

/// Text templates used to render units and invocations.
///
/// Placeholders: `{name}` and `{params}` in the header, `{name}`, `{props}`
/// and `{condition}` in the invocation. `{props}` expands to one
/// ` param={param}` per parameter, each with a leading space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitStyle {
    pub header: String,
    pub footer: String,
    pub invocation: String,
}

impl Default for UnitStyle {
    fn default() -> Self {
        Self {
            header: "export const {name} = ({ {params} }: any) => {".to_string(),
            footer: "};".to_string(),
            invocation: "{{condition} && <{name}{props} />}".to_string(),
        }
    }
}

/// A region body wrapped as a standalone, parameterized unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedUnit {
    name: String,
    parameters: Vec<String>,
    body: String,
    header: String,
    footer: String,
}

impl NamedUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// The wrapped body, exactly as it was extracted.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The rendered header line; also used to detect an already applied run.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Full declaration text, ready to be appended to a document.
    pub fn declaration(&self) -> String {
        format!("\n{}\n{}\n{}\n", self.header, self.body, self.footer)
    }

    /// The body as it reads when inlined back at an invocation site.
    ///
    /// Invocations pass every parameter under its ambient name, so binding the
    /// parameters is the identity and the inlined text is the body itself.
    pub fn inline(&self) -> &str {
        &self.body
    }
}

/// The subset of `scope` and `parameters` that `body` actually refers to.
///
/// Names the body binds itself shadow the ambient ones and are not free.
pub fn free_variables(body: &str, scope: &[String], parameters: &[String]) -> BTreeSet<String> {
    let local = declared_identifiers(body);
    referenced_identifiers(body)
        .into_iter()
        .filter(|ident| !local.contains(ident))
        .filter(|ident| scope.contains(ident) || parameters.contains(ident))
        .collect()
}

/// Renders the header for `name(parameters)` using `style`.
pub fn render_header(name: &str, parameters: &[String], style: &UnitStyle) -> String {
    template::render(&style.header, &[("name", name), ("params", &parameters.join(", "))])
}

/// Validates `body` against `parameters` and wraps it as a named unit.
///
/// `scope` lists the names visible at the region's original site; a scope name
/// used by the body but missing from `parameters` is an error, as is a
/// declared parameter the body never uses.
pub fn wrap_as_unit(
    name: &str,
    parameters: &[String],
    body: &str,
    scope: &[String],
    style: &UnitStyle,
) -> Result<NamedUnit, UnitError> {
    check_identifier(name, name)?;
    let mut seen = BTreeSet::new();
    for param in parameters {
        check_identifier(name, param)?;
        if !seen.insert(param.as_str()) {
            return Err(UnitError::DuplicateParameter {
                unit: name.to_string(),
                name: param.clone(),
            });
        }
    }

    let free = free_variables(body, scope, parameters);
    let missing: Vec<String> = free
        .iter()
        .filter(|ident| !parameters.contains(*ident))
        .cloned()
        .collect();
    let unused: Vec<String> = parameters
        .iter()
        .filter(|param| !free.contains(*param))
        .cloned()
        .collect();
    if !missing.is_empty() || !unused.is_empty() {
        return Err(UnitError::ParameterMismatch {
            unit: name.to_string(),
            missing,
            unused,
        });
    }

    log::debug!("wrapping unit {} with parameters [{}]", name, parameters.join(", "));

    Ok(NamedUnit {
        name: name.to_string(),
        parameters: parameters.to_vec(),
        body: body.to_string(),
        header: render_header(name, parameters, style),
        footer: style.footer.clone(),
    })
}

/// Renders the short conditional invocation that stands in for the region.
pub fn render_invocation(unit: &NamedUnit, condition: &str, style: &UnitStyle) -> String {
    let props: String = unit
        .parameters
        .iter()
        .map(|p| format!(" {}={{{}}}", p, p))
        .collect();
    template::render(
        &style.invocation,
        &[("name", unit.name()), ("props", &props), ("condition", condition)],
    )
}

fn check_identifier(unit: &str, name: &str) -> Result<(), UnitError> {
    if IDENT_RE.is_match(name) {
        Ok(())
    } else {
        Err(UnitError::InvalidIdentifier {
            unit: unit.to_string(),
            name: name.to_string(),
        })
    }
}
