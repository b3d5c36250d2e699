// crates/region_refactor/src/writer.rs

use similar::TextDiff;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::RefactorConfig;
use crate::engine::{run, Outcome};
use crate::RefactorError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Compute the result and its diff but leave the file alone.
    pub dry_run: bool,
}

/// Summary of one file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
    /// Unified diff of the change; `None` when nothing changed.
    pub diff: Option<String>,
    pub written: bool,
}

/// Reads `path`, transforms it in memory and, unless `dry_run` is set,
/// replaces it atomically with the result.
///
/// Any failure before the final rename leaves the original file untouched.
pub fn apply_file<P: AsRef<Path>>(
    path: P,
    config: &RefactorConfig,
    options: ApplyOptions,
) -> Result<FileReport, RefactorError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| RefactorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let original = String::from_utf8(bytes).map_err(|_| RefactorError::Encoding {
        path: path.to_path_buf(),
    })?;

    let outcome = run(config, &original)?;
    let (diff, written) = match &outcome {
        Outcome::AlreadyApplied => (None, false),
        Outcome::Transformed(transformation) => {
            let diff = render_diff(path, &original, &transformation.document);
            if options.dry_run {
                (Some(diff), false)
            } else {
                write_atomically(path, &transformation.document)?;
                (Some(diff), true)
            }
        }
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        outcome,
        diff,
        written,
    })
}

/// Unified diff between `before` and `after`, labelled with `path`.
pub fn render_diff(path: &Path, before: &str, after: &str) -> String {
    let label = path.display().to_string();
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", label), &format!("b/{}", label))
        .to_string()
}

// Writes next to the target and renames over it, keeping the original
// permissions.
fn write_atomically(path: &Path, contents: &str) -> Result<(), RefactorError> {
    let write_err = |source| RefactorError::Write {
        path: path.to_path_buf(),
        source,
    };
    // Replace the file a symlink points to, not the link.
    let target = fs::canonicalize(path).map_err(write_err)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(&target).map_err(write_err)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
