//! verbump - A CLI tool that bumps the version declared in project manifests.
//!
//! # Overview
//!
//! verbump reads the current `MAJOR.MINOR.PATCH` version from pyproject.toml,
//! setup.py or Cargo.toml (first match wins), computes the next major, minor
//! or patch version, and rewrites the version line of every manifest that
//! declares one, leaving the rest of each file untouched.

pub mod bump;
pub mod error;
pub mod manifest;
pub mod version;

// Re-export commonly used types
pub use bump::{BumpConfig, BumpReport, run_bump};
pub use error::{BumpError, ManifestError, VersionError};
pub use manifest::ManifestKind;
pub use version::IncrementType;
