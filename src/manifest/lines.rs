//! Raw-text helpers shared by the manifest rewriters.
//!
//! Manifests are never reserialized: a file is split into lines that keep
//! their own endings, exactly one line is replaced, and the lines are joined
//! back together.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ManifestError;

/// Split `content` into lines, each keeping its `\n` or `\r\n` terminator.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Rebuild the file text with line `index` replaced by `replacement`.
///
/// `replacement` is the new line body; the original terminator of that line
/// is carried over.
pub fn replace_line(lines: &[&str], index: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len()).sum::<usize>() + 16);

    for (i, line) in lines.iter().enumerate() {
        if i == index {
            out.push_str(replacement);
            out.push_str(line_ending(line));
        } else {
            out.push_str(line);
        }
    }

    out
}

/// The line without its terminator.
pub fn line_body(line: &str) -> &str {
    &line[..line.len() - line_ending(line).len()]
}

fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

pub fn read_file(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the whole file atomically.
///
/// The new content is written to a temporary file next to `path`, given the
/// original file's permissions, and renamed over it. Symlinks are resolved
/// first so the link itself survives and its target gets the new content.
pub fn write_file(path: &Path, content: &str) -> Result<(), ManifestError> {
    let write_err = |source: std::io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = std::fs::canonicalize(path).map_err(write_err)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let permissions = std::fs::metadata(&target).map_err(write_err)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    std::fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(())
}
