// crates/region_refactor/src/lib.rs

//! Extracts marked regions of a file into named units.
//!
//! The whole transformation happens in memory ([`engine::run`]); the file is
//! only rewritten ([`writer::apply_file`]) once every region has been located,
//! extracted, validated and substituted.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use document_splice::SpliceError;
use region_locator::LocateError;
use unit_wrapper::UnitError;

pub mod config;
pub mod engine;
pub mod writer;

pub use config::{DuplicateSpec, RefactorConfig, RegionSpec, StyleConfig, Strategy};
pub use engine::{run, Outcome, Transformation};
pub use writer::{apply_file, render_diff, ApplyOptions, FileReport};

/// Everything that can abort a refactor run. None of these leave a partially
/// written file behind.
#[derive(Error, Debug)]
pub enum RefactorError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("region {region:?}: {source}")]
    Locate {
        region: String,
        #[source]
        source: LocateError,
    },

    #[error("region {region:?}: {source}")]
    Unit {
        region: String,
        #[source]
        source: UnitError,
    },

    #[error(transparent)]
    Splice(#[from] SpliceError),
}
