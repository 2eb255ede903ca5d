//! Version parsing and semver bumping.

pub mod increment;

pub use increment::{apply_increment, increment_version, parse_version, IncrementType};
