//! Error types for verbump modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from version parsing and incrementing.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("No version found in pyproject.toml, setup.py, or Cargo.toml")]
    NotFound,

    #[error("Invalid version format: {0}. Expected format: x.y.z")]
    InvalidFormat(String),

    #[error("Invalid increment type: {0}. Use 'major', 'minor', or 'patch'.")]
    InvalidIncrement(String),

    #[error("Version {0} cannot be incremented: component overflow")]
    ComponentOverflow(String),
}

/// Errors from reading or rewriting a single manifest file.
///
/// These never abort a run on their own; the orchestrator reports them and
/// moves on to the next manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Could not find version field in {}", path.display())]
    VersionFieldNotFound { path: PathBuf },

    #[error("Error updating {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that fail a whole bump run.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("Failed to update any version files")]
    NoFilesUpdated,
}
