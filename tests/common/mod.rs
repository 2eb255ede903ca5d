//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A temporary project directory holding manifest files.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create an empty project in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the project. Returns `self` for chaining.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.path(name), content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", name, e));
        self
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Names of every entry in the project directory, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.root())
            .expect("Failed to list project dir")
            .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub const PYPROJECT_PEP621: &str = "\
[build-system]
requires = [\"setuptools>=61\"]

[project]
name = \"demo\"
# keep in sync with the changelog
version = \"1.2.3\"
dependencies = [
    \"requests>=2\",
]
";

pub const PYPROJECT_POETRY: &str = "\
[tool.poetry]
name = \"demo\"
version = \"0.4.1\"
description = \"\"

[tool.poetry.dependencies]
python = \"^3.10\"
";

pub const SETUP_PY_ASSIGNMENT: &str = "\
from setuptools import setup

version = '0.9.0'

setup(
    name='demo',
    version=version,
)
";

pub const CARGO_TOML: &str = "\
[package]
name = \"demo\"
version = \"1.2.3\"
edition = \"2021\"

[dependencies]
serde = { version = \"1.0.0\", features = [\"derive\"] }
";
