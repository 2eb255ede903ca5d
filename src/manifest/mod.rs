//! Manifest detection, version reads and in-place version rewrites.
//!
//! Supports pyproject.toml (Poetry + PEP 621), setup.py and Cargo.toml.

pub mod lines;
pub mod setup_py;
pub mod toml_manifest;

use std::path::{Path, PathBuf};

use semver::Version;
use tracing::debug;

use crate::error::ManifestError;

use self::lines::{read_file, write_file};
use self::setup_py::{read_setup_version, rewrite_version_assignment};
use self::toml_manifest::{read_cargo_version, read_pyproject_version, rewrite_version_line};

/// The kind of manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    PyprojectToml,
    SetupPy,
    CargoToml,
}

impl ManifestKind {
    /// Every supported manifest, in the order versions are looked up.
    pub const ALL: [ManifestKind; 3] = [
        ManifestKind::PyprojectToml,
        ManifestKind::SetupPy,
        ManifestKind::CargoToml,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::PyprojectToml => "pyproject.toml",
            ManifestKind::SetupPy => "setup.py",
            ManifestKind::CargoToml => "Cargo.toml",
        }
    }

    /// Position in [`ManifestKind::ALL`].
    pub fn lookup_rank(&self) -> usize {
        match self {
            ManifestKind::PyprojectToml => 0,
            ManifestKind::SetupPy => 1,
            ManifestKind::CargoToml => 2,
        }
    }

    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Read the version a manifest declares.
///
/// Returns `Ok(None)` when the file does not exist or declares no
/// (non-empty) version, and an error when it exists but cannot be read or
/// parsed.
pub fn read_declared_version(root: &Path, kind: ManifestKind) -> Result<Option<String>, ManifestError> {
    let path = kind.path_in(root);
    if !path.exists() {
        return Ok(None);
    }

    let content = read_file(&path)?;
    let version = match kind {
        ManifestKind::PyprojectToml => read_pyproject_version(&path, &content)?.map(|v| v.value),
        ManifestKind::CargoToml => read_cargo_version(&path, &content)?.map(|v| v.value),
        ManifestKind::SetupPy => read_setup_version(&path, &content)?,
    };

    debug!("{}: declared version {:?}", kind, version);
    Ok(version)
}

/// Rewrite the version field of a manifest to `new_version`.
///
/// Only the one line holding the version changes; every other byte of the
/// file is written back as it was read.
pub fn update_manifest(root: &Path, kind: ManifestKind, new_version: &Version) -> Result<(), ManifestError> {
    let path = kind.path_in(root);
    let content = read_file(&path)?;

    let rewritten = match kind {
        ManifestKind::PyprojectToml => read_pyproject_version(&path, &content)?
            .and_then(|v| rewrite_version_line(&content, &v, new_version)),
        ManifestKind::CargoToml => read_cargo_version(&path, &content)?
            .and_then(|v| rewrite_version_line(&content, &v, new_version)),
        ManifestKind::SetupPy => rewrite_version_assignment(&path, &content, new_version)?,
    };

    let Some(rewritten) = rewritten else {
        return Err(ManifestError::VersionFieldNotFound { path });
    };

    write_file(&path, &rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lookup_order() {
        assert_eq!(
            ManifestKind::ALL.map(|k| k.file_name()),
            ["pyproject.toml", "setup.py", "Cargo.toml"]
        );
    }

    #[test]
    fn test_lookup_rank_matches_order() {
        for (i, kind) in ManifestKind::ALL.iter().enumerate() {
            assert_eq!(kind.lookup_rank(), i);
        }
    }

    #[test]
    fn test_missing_file_declares_nothing() {
        let dir = tempfile::tempdir().unwrap();
        for kind in ManifestKind::ALL {
            assert_eq!(read_declared_version(dir.path(), kind).unwrap(), None);
        }
    }

    #[test]
    fn test_update_cargo_toml_preserves_formatting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(
            &path,
            "[package]\nname = \"test\"\n# version comment\nversion = \"1.0.0\"\nedition = \"2024\"\n",
        )
        .unwrap();

        update_manifest(dir.path(), ManifestKind::CargoToml, &Version::new(2, 0, 0)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("version = \"2.0.0\""));
        assert!(content.contains("# version comment"));
        assert!(content.contains("edition = \"2024\""));
    }

    #[test]
    fn test_update_pyproject_poetry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "[tool.poetry]\nname = \"test\"\nversion = '0.1.0'\n").unwrap();

        update_manifest(dir.path(), ManifestKind::PyprojectToml, &Version::new(0, 2, 0)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[tool.poetry]\nname = \"test\"\nversion = \"0.2.0\"\n"
        );
    }

    #[test]
    fn test_update_setup_py() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.py");
        fs::write(&path, "version = '0.9.0'\nsetup(name='x', version=version)\n").unwrap();

        update_manifest(dir.path(), ManifestKind::SetupPy, &Version::new(1, 0, 0)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "version = '1.0.0'\nsetup(name='x', version=version)\n"
        );
    }

    #[test]
    fn test_update_without_version_line_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        let original = "[package]\nname = \"x\"\nversion = \"1.0.0-rc.1\"\n";
        fs::write(&path, original).unwrap();

        let result = update_manifest(dir.path(), ManifestKind::CargoToml, &Version::new(1, 0, 1));

        assert!(matches!(result, Err(ManifestError::VersionFieldNotFound { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_written_version_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\r\nname = \"x\"\r\nversion = \"4.5.6\"\r\n",
        )
        .unwrap();

        let next = Version::new(4, 6, 0);
        update_manifest(dir.path(), ManifestKind::PyprojectToml, &next).unwrap();

        assert_eq!(
            read_declared_version(dir.path(), ManifestKind::PyprojectToml).unwrap(),
            Some(next.to_string())
        );
    }
}
