// crates/region_refactor/src/config.rs

//! The anchor table driving a run, loaded from TOML.
//!
//! ```toml
//! scope = ["activeTab", "driverData"]
//!
//! [[region]]
//! name = "inspections"
//! start = "{/* INSPECTIONS TAB */}"
//! end = "{/* VIOLATIONS TAB */}"
//! unit = "InspectionsTab"
//! parameters = ["driverData"]
//! condition = "activeTab === 'Inspections'"
//!
//! [duplicate]
//! start = "{activeTab === 'Violations' && ("
//! end = "</div>\n            )}\n        </div>"
//! ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use unit_wrapper::UnitStyle;

use crate::RefactorError;

fn default_inner_start() -> String {
    "(() => {".to_string()
}

fn default_inner_end() -> String {
    "})()".to_string()
}

fn default_indent() -> String {
    " ".repeat(12)
}

/// How replacement directives are applied to the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Replace exactly the located byte ranges.
    #[default]
    Offset,
    /// Replace by text, refusing targets that are not unique.
    Exact,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset" => Ok(Strategy::Offset),
            "exact" => Ok(Strategy::Exact),
            other => Err(format!("unknown strategy {:?} (expected offset or exact)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub header: String,
    pub footer: String,
    pub invocation: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = UnitStyle::default();
        Self {
            header: style.header,
            footer: style.footer,
            invocation: style.invocation,
        }
    }
}

impl StyleConfig {
    pub fn unit_style(&self) -> UnitStyle {
        UnitStyle {
            header: self.header.clone(),
            footer: self.footer.clone(),
            invocation: self.invocation.clone(),
        }
    }
}

/// One region to extract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionSpec {
    pub name: String,
    pub start: String,
    pub end: String,
    #[serde(default = "default_inner_start")]
    pub inner_start: String,
    #[serde(default = "default_inner_end")]
    pub inner_end: String,
    pub unit: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    pub condition: String,
    /// Leading whitespace of the invocation line.
    #[serde(default = "default_indent")]
    pub indent: String,
    #[serde(default)]
    pub search_from: usize,
}

/// The leftover block removed after substitution, if present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuplicateSpec {
    pub start: String,
    pub end: String,
    /// Byte offset in the substituted document. Defaults to the end of the
    /// last inserted invocation.
    #[serde(default)]
    pub search_from: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefactorConfig {
    /// Names visible at the region sites; the body's uses of these must be
    /// declared as unit parameters. When omitted, the names declared in the
    /// document outside every region are used.
    #[serde(default)]
    pub scope: Option<Vec<String>>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(rename = "region", default)]
    pub regions: Vec<RegionSpec>,
    #[serde(default)]
    pub duplicate: Option<DuplicateSpec>,
}

impl RefactorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, RefactorError> {
        let config: RefactorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RefactorError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RefactorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks what can be checked without a document.
    pub fn validate(&self) -> Result<(), RefactorError> {
        if self.regions.is_empty() {
            return Err(RefactorError::ConfigInvalid(
                "at least one [[region]] is required".to_string(),
            ));
        }
        if self.scope.as_ref().is_some_and(Vec::is_empty) {
            return Err(RefactorError::ConfigInvalid(
                "scope must list at least one name (omit it to derive the scope from the document)"
                    .to_string(),
            ));
        }
        let mut names = BTreeSet::new();
        let mut units = BTreeSet::new();
        for region in &self.regions {
            if !names.insert(region.name.as_str()) {
                return Err(RefactorError::ConfigInvalid(format!(
                    "region name {:?} is used twice",
                    region.name
                )));
            }
            if !units.insert(region.unit.as_str()) {
                return Err(RefactorError::ConfigInvalid(format!(
                    "unit name {:?} is used twice",
                    region.unit
                )));
            }
            for (field, value) in [
                ("start", &region.start),
                ("end", &region.end),
                ("inner_start", &region.inner_start),
                ("inner_end", &region.inner_end),
                ("condition", &region.condition),
            ] {
                if value.is_empty() {
                    return Err(RefactorError::ConfigInvalid(format!(
                        "region {:?}: {} must not be empty",
                        region.name, field
                    )));
                }
            }
        }
        if let Some(duplicate) = &self.duplicate {
            if duplicate.start.is_empty() || duplicate.end.is_empty() {
                return Err(RefactorError::ConfigInvalid(
                    "duplicate block anchors must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
