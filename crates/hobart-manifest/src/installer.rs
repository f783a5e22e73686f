//! Package installation behind a capability interface.
//!
//! The actual installer invocation is environment-dependent, so it sits
//! behind [`PackageInstaller`]; tests substitute a double instead of
//! spawning a real process.

use crate::rewrite::ManifestError;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Capability to install packages from a manifest file.
pub trait PackageInstaller {
    /// Install every requirement in the manifest at `path`.
    ///
    /// # Errors
    ///
    /// [`ManifestError::Install`] when the installer reports failure; the
    /// failure is fatal and never swallowed.
    fn install(&self, path: &Path) -> Result<(), ManifestError>;
}

/// Installer shelling out to `pip`.
///
/// Runs `pip install --no-input -r <path>`, inheriting the caller's
/// standard output and error streams.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    program: String,
}

impl PipInstaller {
    /// Create an installer invoking the default `pip` executable.
    pub fn new() -> Self {
        Self::with_program("pip")
    }

    /// Create an installer invoking a specific executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PipInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageInstaller for PipInstaller {
    fn install(&self, path: &Path) -> Result<(), ManifestError> {
        info!(manifest = %path.display(), program = %self.program, "installing requirements");

        let status = Command::new(&self.program)
            .arg("install")
            .arg("--no-input")
            .arg("-r")
            .arg(path)
            .status()?;

        if !status.success() {
            return Err(ManifestError::Install { status });
        }

        Ok(())
    }
}

/// Install the manifest, then read it back for caller confirmation.
///
/// # Errors
///
/// Installer failures propagate unchanged; a manifest that cannot be read
/// back afterwards is [`ManifestError::Io`].
pub fn install_requirements<I: PackageInstaller + ?Sized>(
    installer: &I,
    path: &Path,
) -> Result<String, ManifestError> {
    installer.install(path)?;

    let contents = fs::read_to_string(path)?;

    Ok(contents)
}
