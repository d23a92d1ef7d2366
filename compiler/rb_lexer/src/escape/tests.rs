#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

fn decode_at(text: &str, version: u8) -> (Vec<u8>, usize, Vec<EscapeError>) {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut errors = Vec::new();
    let end = unescape(
        &chars,
        0,
        LanguageVersion::new(version).unwrap(),
        &mut out,
        &mut errors,
    );
    (out, end, errors)
}

fn decode(text: &str) -> (Vec<u8>, usize, Vec<EscapeError>) {
    decode_at(text, 27)
}

fn codes(errors: &[EscapeError]) -> Vec<DiagnosticCode> {
    errors.iter().map(|e| e.code).collect()
}

// === Single-character escapes ===

#[test]
fn simple_escapes() {
    for (text, byte) in [
        ("\\a", 7),
        ("\\b", 8),
        ("\\e", 27),
        ("\\f", 12),
        ("\\n", 10),
        ("\\r", 13),
        ("\\s", 32),
        ("\\t", 9),
        ("\\v", 11),
        ("\\\\", b'\\'),
    ] {
        let (out, end, errors) = decode(text);
        assert_eq!(out, vec![byte], "{text}");
        assert_eq!(end, 2);
        assert!(errors.is_empty());
    }
}

#[test]
fn unknown_escape_is_the_character_itself() {
    assert_eq!(decode("\\q").0, b"q".to_vec());
    assert_eq!(decode("\\\"").0, b"\"".to_vec());
    assert_eq!(decode("\\é").0, "é".as_bytes().to_vec());
}

#[test]
fn line_continuation_is_empty() {
    let (out, end, errors) = decode("\\\nabc");
    assert!(out.is_empty());
    assert_eq!(end, 2);
    assert!(errors.is_empty());
}

// === Numeric escapes ===

#[test]
fn octal_takes_up_to_three_digits() {
    assert_eq!(decode("\\101").0, b"A".to_vec());
    assert_eq!(decode("\\0").0, vec![0]);
    let (out, end, _) = decode("\\1234");
    assert_eq!(out, vec![0o123]);
    assert_eq!(end, 4);
}

#[test]
fn octal_wraps_modulo_256() {
    assert_eq!(decode("\\777").0, vec![0xff]);
    assert_eq!(decode("\\400").0, vec![0]);
}

#[test]
fn hex_escapes() {
    assert_eq!(decode("\\x41").0, b"A".to_vec());
    assert_eq!(decode("\\xf").0, vec![0x0f]);
    let (out, end, _) = decode("\\x414");
    assert_eq!(out, b"A".to_vec());
    assert_eq!(end, 4);
}

#[test]
fn hex_without_digits() {
    let (out, end, errors) = decode("\\xz");
    assert!(out.is_empty());
    assert_eq!(end, 2);
    assert_eq!(codes(&errors), vec![DiagnosticCode::InvalidHexEscape]);
    assert_eq!((errors[0].start, errors[0].end), (0, 2));
}

// === Unicode escapes ===

#[test]
fn fixed_unicode() {
    assert_eq!(decode("\\u00e9").0, "é".as_bytes().to_vec());
    let (out, _, errors) = decode("\\u12");
    assert_eq!(out, "\u{FFFD}".as_bytes().to_vec());
    assert_eq!(codes(&errors), vec![DiagnosticCode::InvalidUnicodeEscape]);
}

#[test]
fn braced_unicode_list() {
    let (out, end, errors) = decode("\\u{41 42\t43}");
    assert_eq!(out, b"ABC".to_vec());
    assert_eq!(end, 12);
    assert!(errors.is_empty());
}

#[test]
fn codepoint_too_large_covers_whole_escape() {
    let (out, end, errors) = decode("\\u{110000}");
    assert_eq!(out, "\u{FFFD}".as_bytes().to_vec());
    assert_eq!(codes(&errors), vec![DiagnosticCode::UnicodePointTooLarge]);
    assert_eq!((errors[0].start, errors[0].end), (0, end));
}

#[test]
fn unterminated_unicode_list() {
    let (out, _, errors) = decode("\\u{41");
    assert_eq!(out, b"A".to_vec());
    assert_eq!(codes(&errors), vec![DiagnosticCode::UnterminatedUnicode]);
}

#[test]
fn empty_unicode_list() {
    let (_, end, errors) = decode("\\u{}");
    assert_eq!(end, 4);
    assert_eq!(codes(&errors), vec![DiagnosticCode::InvalidUnicodeEscape]);
}

#[test]
fn unicode_is_literal_u_before_19() {
    let (out, end, errors) = decode_at("\\u0041", 18);
    assert_eq!(out, b"u".to_vec());
    assert_eq!(end, 2);
    assert!(errors.is_empty());
}

// === Control and meta ===

#[test]
fn control_forms() {
    assert_eq!(decode("\\ca").0, vec![1]);
    assert_eq!(decode("\\C-a").0, vec![1]);
    assert_eq!(decode("\\c?").0, vec![0x7f]);
}

#[test]
fn meta_forms() {
    assert_eq!(decode("\\M-a").0, vec![0xe1]);
    assert_eq!(decode("\\M-\\C-a").0, vec![0x81]);
    assert_eq!(decode("\\C-\\M-a").0, vec![0x81]);
    assert_eq!(decode("\\M-\\n").0, vec![0x8a]);
}

#[test]
fn malformed_control_and_meta() {
    assert_eq!(codes(&decode("\\Cx").2), vec![DiagnosticCode::InvalidEscape]);
    assert_eq!(codes(&decode("\\M-é").2), vec![DiagnosticCode::InvalidEscape]);
    let (_, _, errors) = decode("\\M-\\u0041");
    assert_eq!(codes(&errors), vec![DiagnosticCode::InvalidEscapeUse]);
}

// === End of input ===

#[test]
fn backslash_at_end_is_fatal() {
    let (out, end, errors) = decode("\\");
    assert!(out.is_empty());
    assert_eq!(end, 1);
    assert_eq!(codes(&errors), vec![DiagnosticCode::EscapeEof]);
    assert!(errors[0].is_fatal());
}

// === Properties ===

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn escape_always_consumes(tail in "[ -~]{1,12}") {
            let text = format!("\\{tail}");
            let (_, end, errors) = decode(&text);
            prop_assert!(end >= 2 || !errors.is_empty());
            prop_assert!(end <= text.chars().count());
        }

        #[test]
        fn short_unicode_escapes_round_trip(c in any::<char>()) {
            let text = format!("\\u{{{:x}}}", u32::from(c));
            let (out, end, errors) = decode(&text);
            prop_assert!(errors.is_empty());
            prop_assert_eq!(end, text.chars().count());
            prop_assert_eq!(out, c.to_string().into_bytes());
        }
    }
}
