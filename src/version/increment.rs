//! Strict `MAJOR.MINOR.PATCH` parsing and bumping.

use std::str::FromStr;

use semver::Version;

use crate::error::VersionError;

/// Which component of the version to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementType {
    Patch,
    Minor,
    Major,
}

impl IncrementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementType::Patch => "patch",
            IncrementType::Minor => "minor",
            IncrementType::Major => "major",
        }
    }
}

impl std::fmt::Display for IncrementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is not trimmed.
impl FromStr for IncrementType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(IncrementType::Major),
            "minor" => Ok(IncrementType::Minor),
            "patch" => Ok(IncrementType::Patch),
            _ => Err(VersionError::InvalidIncrement(s.to_string())),
        }
    }
}

/// Parse a version that is exactly three dot-separated non-negative integers.
///
/// Unlike `Version::parse`, leading zeros are accepted (`01.2.3` is 1.2.3),
/// while pre-release and build suffixes are rejected.
pub fn parse_version(s: &str) -> Result<Version, VersionError> {
    let invalid = || VersionError::InvalidFormat(s.to_string());

    let parts: Vec<&str> = s.split('.').collect();
    let &[major, minor, patch] = parts.as_slice() else {
        return Err(invalid());
    };

    let component = |part: &str| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<u64>().map_err(|_| invalid())
    };

    Ok(Version::new(
        component(major)?,
        component(minor)?,
        component(patch)?,
    ))
}

/// Apply a bump to an already parsed version.
pub fn apply_increment(base: &Version, increment: IncrementType) -> Result<Version, VersionError> {
    let overflow = || VersionError::ComponentOverflow(base.to_string());

    let next = match increment {
        IncrementType::Major => Version::new(base.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        IncrementType::Minor => Version::new(
            base.major,
            base.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        IncrementType::Patch => Version::new(
            base.major,
            base.minor,
            base.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };

    Ok(next)
}

/// Parse `version` and return the next version for `increment`.
pub fn increment_version(version: &str, increment: IncrementType) -> Result<Version, VersionError> {
    let base = parse_version(version)?;
    apply_increment(&base, increment)
}
