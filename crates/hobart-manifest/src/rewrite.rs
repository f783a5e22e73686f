//! Manifest rewriting.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Requirement line appended for the notebook runtime.
pub const NOTEBOOK_REQUIREMENT: &str = "jupyter >= 1.0.0";

/// Errors that can occur during manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Atomic replace failed after the temp file was written.
    #[error("Failed to replace manifest: {0}")]
    Replace(#[from] tempfile::PersistError),

    /// Installer process exited with a failure status.
    #[error("Installer exited with status {status}")]
    Install {
        /// Exit status reported by the installer process.
        status: std::process::ExitStatus,
    },
}

/// Rewrite a dependency manifest in place.
///
/// Prepends `header` to the manifest contents, rewrites every exact pin
/// (`==`) in the combined text to a lower-bound pin (` >=`), and appends
/// the [`NOTEBOOK_REQUIREMENT`] line unless a line with exactly that
/// requirement already exists, so afterwards it appears exactly once. No
/// schema validation: any text surviving the substitution is accepted.
///
/// The file is replaced atomically (temp file in the same directory, then
/// rename), so a crash never leaves a partial write. Concurrent callers
/// still race whole rewrites against each other; serialization is the
/// caller's responsibility.
///
/// # Errors
///
/// [`ManifestError::Io`] when the manifest cannot be read or the temp
/// file cannot be written; [`ManifestError::Replace`] when the rename
/// fails.
pub fn rewrite_requirements(path: &Path, header: &str) -> Result<(), ManifestError> {
    let old = fs::read_to_string(path)?;

    let mut text = format!("{header}{old}").replace("==", " >=");

    let has_notebook_line = text.lines().any(|line| line.trim() == NOTEBOOK_REQUIREMENT);
    if !has_notebook_line {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(NOTEBOOK_REQUIREMENT);
        text.push('\n');
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path)?;

    info!(path = %path.display(), "rewrote dependency manifest");

    Ok(())
}
