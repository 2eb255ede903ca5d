//! Integration tests for version incrementing.

use semver::Version;
use verbump::version::{IncrementType, increment_version, parse_version};
use verbump::VersionError;

const SAMPLES: &[&str] = &["0.0.0", "0.1.0", "1.2.3", "10.20.30", "007.0.99"];

#[test]
fn test_patch_keeps_major_and_minor() {
    for sample in SAMPLES {
        let base = parse_version(sample).unwrap();
        let next = increment_version(sample, IncrementType::Patch).unwrap();

        assert_eq!(next.major, base.major);
        assert_eq!(next.minor, base.minor);
        assert_eq!(next.patch, base.patch + 1);
    }
}

#[test]
fn test_minor_resets_patch() {
    for sample in SAMPLES {
        let base = parse_version(sample).unwrap();
        let next = increment_version(sample, IncrementType::Minor).unwrap();

        assert_eq!(next, Version::new(base.major, base.minor + 1, 0));
    }
}

#[test]
fn test_major_resets_minor_and_patch() {
    for sample in SAMPLES {
        let base = parse_version(sample).unwrap();
        let next = increment_version(sample, IncrementType::Major).unwrap();

        assert_eq!(next, Version::new(base.major + 1, 0, 0));
    }
}

#[test]
fn test_repeated_bumps_always_increase() {
    for increment in [IncrementType::Patch, IncrementType::Minor, IncrementType::Major] {
        let mut current = "1.2.3".to_string();
        for _ in 0..5 {
            let next = increment_version(&current, increment).unwrap();
            assert!(next > parse_version(&current).unwrap());
            current = next.to_string();
        }
    }
}

#[test]
fn test_output_is_plain_decimal() {
    let next = increment_version("01.002.0003", IncrementType::Minor).unwrap();
    assert_eq!(next.to_string(), "1.3.0");
}

#[test]
fn test_malformed_versions_are_format_errors() {
    for bad in ["1.2", "a.b.c", "1.2.3.4", "", "1.2.3-rc.1", "v1.2.3"] {
        let result = increment_version(bad, IncrementType::Patch);
        assert!(
            matches!(result, Err(VersionError::InvalidFormat(ref v)) if v == bad),
            "expected format error for {:?}, got {:?}",
            bad,
            result
        );
    }
}
