//! `pyproject.toml` and `Cargo.toml` support.
//!
//! Versions are read through `toml_edit`, keeping source spans so the
//! version's line can be found; the rewrite is a single-line text
//! substitution so comments and layout survive untouched.

use std::path::Path;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};
use semver::Version;
use toml_edit::Document;

use crate::error::ManifestError;

use super::lines::{line_body, replace_line, split_lines};

/// Poetry: `[tool.poetry].version`
const POETRY_TABLE: &[&str] = &["tool", "poetry"];
/// PEP 621: `[project].version`
const PROJECT_TABLE: &[&str] = &["project"];
/// Cargo: `[package].version`
const PACKAGE_TABLE: &[&str] = &["package"];

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*version\s*=\s*)["']\d+\.\d+\.\d+["']"#).expect("Invalid regex")
});

/// A version string together with where it is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlVersion {
    pub value: String,
    pub table: &'static [&'static str],
    /// Byte offset of the version value in the source.
    pub offset: Option<usize>,
}

/// Read the version from a pyproject.toml document.
///
/// `[tool.poetry]` is consulted first; `[project]` is the fallback when the
/// poetry table is missing or has no string version.
pub fn read_pyproject_version(path: &Path, content: &str) -> Result<Option<TomlVersion>, ManifestError> {
    let doc = parse_toml(path, content)?;

    Ok(version_in(&doc, POETRY_TABLE).or_else(|| version_in(&doc, PROJECT_TABLE)))
}

/// Read `[package].version` from a Cargo.toml document.
///
/// `version.workspace = true` is not a string and reads as no version.
pub fn read_cargo_version(path: &Path, content: &str) -> Result<Option<TomlVersion>, ManifestError> {
    let doc = parse_toml(path, content)?;

    Ok(version_in(&doc, PACKAGE_TABLE))
}

fn version_in(doc: &Document<&str>, table: &'static [&'static str]) -> Option<TomlVersion> {
    let mut item = doc.as_item();
    for key in table {
        item = item.get(*key)?;
    }

    let version = item.get("version")?;
    version
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| TomlVersion {
            value: s.to_string(),
            table,
            offset: version.span().map(|span| span.start),
        })
}

/// Replace the version on the line holding `version`, if that line reads
/// `version = "x.y.z"`.
///
/// Only the quoted value changes and it is always written with double
/// quotes. Returns `None` when the line does not have that shape.
pub fn rewrite_version_line(content: &str, version: &TomlVersion, new_version: &Version) -> Option<String> {
    let offset = version.offset?;
    let index = content.get(..offset)?.matches('\n').count();

    let lines = split_lines(content);
    let body = line_body(lines.get(index)?);
    if !VERSION_LINE.is_match(body) {
        return None;
    }

    let replaced = VERSION_LINE.replace(body, |caps: &Captures<'_>| {
        format!("{}\"{}\"", &caps[1], new_version)
    });

    Some(replace_line(&lines, index, &replaced))
}

fn parse_toml<'a>(path: &Path, content: &'a str) -> Result<Document<&'a str>, ManifestError> {
    Document::parse(content).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        reason: format!("Invalid TOML: {}", e),
    })
}
