//! Bump pipeline: locate, increment, update, report.
//!
//! Every per-manifest failure is reported and skipped. A run fails only when
//! no version can be located or incremented, or when no manifest ends up
//! rewritten.

use std::path::{Path, PathBuf};

use semver::Version;
use tracing::{debug, warn};

use crate::error::{BumpError, ManifestError, VersionError};
use crate::manifest::{ManifestKind, read_declared_version, update_manifest};
use crate::version::{IncrementType, increment_version};

/// Configuration for a bump run, derived from the CLI.
#[derive(Debug, Clone)]
pub struct BumpConfig {
    /// Directory holding the manifests.
    pub root: PathBuf,
    pub increment: IncrementType,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct BumpReport {
    /// The version text as it was found.
    pub previous: String,
    pub next: Version,
    /// The manifest the previous version was read from.
    pub source: ManifestKind,
    pub updated: Vec<ManifestKind>,
    pub skipped: Vec<(ManifestKind, ManifestError)>,
}

/// Find the first manifest, in lookup order, that declares a version.
///
/// Unreadable or malformed manifests are reported and treated as absent.
pub fn locate_version(root: &Path) -> Option<(ManifestKind, String)> {
    for kind in ManifestKind::ALL {
        match read_declared_version(root, kind) {
            Ok(Some(version)) => {
                debug!("Using version {} from {}", version, kind);
                return Some((kind, version));
            }
            Ok(None) => debug!("{}: no version declared", kind),
            Err(e) => {
                warn!("Skipping {}: {}", kind, e);
                println!("{}", e);
            }
        }
    }

    None
}

/// Run the full bump pipeline.
pub fn run_bump(config: &BumpConfig) -> Result<BumpReport, BumpError> {
    // ── Stage 1: Locate ──
    let (source, previous) = locate_version(&config.root).ok_or(VersionError::NotFound)?;

    // ── Stage 2: Increment ──
    let next = increment_version(&previous, config.increment)?;
    debug!("{} bump: {} -> {}", config.increment, previous, next);

    // ── Stage 3: Update every manifest that declares a version ──
    let mut updated = Vec::new();
    let mut skipped = Vec::new();

    for kind in ManifestKind::ALL {
        match read_declared_version(&config.root, kind) {
            Ok(Some(_)) => {}
            Ok(None) => continue,
            Err(e) => {
                // Manifests ahead of the source were already reported while locating
                if kind.lookup_rank() > source.lookup_rank() {
                    println!("{}", e);
                }
                debug!("Not updating {}: {}", kind, e);
                skipped.push((kind, e));
                continue;
            }
        }

        match update_manifest(&config.root, kind, &next) {
            Ok(()) => {
                println!("Updated {} with version: {}", kind, next);
                updated.push(kind);
            }
            Err(e) => {
                warn!("Failed to update {}: {}", kind, e);
                println!("{}", e);
                skipped.push((kind, e));
            }
        }
    }

    // ── Stage 4: Report ──
    if updated.is_empty() {
        return Err(BumpError::NoFilesUpdated);
    }

    let names: Vec<&str> = updated.iter().map(|k| k.file_name()).collect();
    println!("Updated version files: {}", names.join(", "));

    Ok(BumpReport {
        previous,
        next,
        source,
        updated,
        skipped,
    })
}
