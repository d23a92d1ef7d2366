#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn supported_versions_are_accepted() {
    for version in LanguageVersion::SUPPORTED {
        assert_eq!(LanguageVersion::new(version).unwrap().get(), version);
    }
}

#[test]
fn unsupported_version_is_rejected() {
    assert_eq!(
        LanguageVersion::new(30),
        Err(ConfigError::UnsupportedVersion { version: 30 })
    );
    let err = LexerConfig::new().with_version(17).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported language version 17; supported versions are 18 through 27"
    );
}

#[test]
fn version_comparison() {
    let v = LanguageVersion::new(23).unwrap();
    assert!(v.at_least(23));
    assert!(v.at_least(19));
    assert!(!v.at_least(24));
}

#[test]
fn defaults() {
    let config = LexerConfig::default();
    assert_eq!(config.version, LanguageVersion::LATEST);
    assert!(!config.force_utf32);
    assert!(!config.in_kwarg);
    assert!(config.emit_comments);
}

#[test]
fn start_offset_resolution() {
    let source = SourceBuffer::new("t.rb", "é = 1").unwrap();
    let config = LexerConfig::new().with_start_offset(2);
    assert_eq!(config.start_index(&source), Ok(1));

    let inside = LexerConfig::new().with_start_offset(1);
    assert_eq!(
        inside.start_index(&source),
        Err(ConfigError::StartOffsetNotCharBoundary { offset: 1 })
    );

    let past = LexerConfig::new().with_start_offset(99);
    assert_eq!(
        past.start_index(&source),
        Err(ConfigError::StartOffsetOutOfBounds { offset: 99, len: 6 })
    );
}
