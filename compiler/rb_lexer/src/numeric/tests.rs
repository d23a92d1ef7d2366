#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

fn scan_at(text: &str, version: u8) -> NumericScan {
    let chars: Vec<char> = text.chars().collect();
    classify(&chars, 0, LanguageVersion::new(version).unwrap())
}

fn scan(text: &str) -> NumericScan {
    scan_at(text, 27)
}

fn codes(scan: &NumericScan) -> Vec<DiagnosticCode> {
    scan.errors.iter().map(|e| e.code).collect()
}

// === Integers ===

#[test]
fn decimal_integer() {
    let n = scan("1_000 + 2");
    assert_eq!(n.kind, NumericKind::Integer);
    assert_eq!(n.text, "1000");
    assert_eq!(n.end, 5);
    assert!(n.errors.is_empty());
}

#[test]
fn radix_prefixes_are_canonical() {
    assert_eq!(scan("0XfF").text, "0xfF");
    assert_eq!(scan("0B1010").text, "0b1010");
    assert_eq!(scan("0o17").text, "0o17");
    assert_eq!(scan("0755").text, "0o755");
    assert_eq!(scan("0_755").text, "0o755");
    assert_eq!(scan("0d19").text, "19");
    assert_eq!(scan("0").text, "0");
}

#[test]
fn binary_stops_at_non_binary_digit() {
    let n = scan("0b12");
    assert_eq!(n.text, "0b1");
    assert_eq!(n.end, 3);
}

// === Floats ===

#[test]
fn floats() {
    let n = scan("1.5");
    assert_eq!((n.kind, n.text.as_str()), (NumericKind::Float, "1.5"));
    let n = scan("1_0.2_5e-1_0");
    assert_eq!((n.kind, n.text.as_str()), (NumericKind::Float, "10.25e-10"));
    assert_eq!(scan("2E+3").text, "2e3");
}

#[test]
fn dot_without_digit_is_not_a_fraction() {
    let n = scan("1.times");
    assert_eq!(n.kind, NumericKind::Integer);
    assert_eq!(n.end, 1);
}

// === Suffixes ===

#[test]
fn suffixes() {
    assert_eq!(scan("3r").kind, NumericKind::Rational);
    assert_eq!(scan("3i").kind, NumericKind::Imaginary);
    assert_eq!(scan("3ri").kind, NumericKind::RationalImaginary);
    assert_eq!(scan("1.5r").text, "1.5r");
    assert_eq!(scan("1e2i").kind, NumericKind::Imaginary);
}

#[test]
fn exponent_forbids_rational() {
    let n = scan("1e2r");
    assert_eq!(n.kind, NumericKind::Float);
    assert_eq!(n.end, 3);
}

#[test]
fn suffix_needs_word_boundary() {
    let n = scan("1if true");
    assert_eq!(n.kind, NumericKind::Integer);
    assert_eq!(n.text, "1");
    assert_eq!(n.end, 1);

    let n = scan("1rescue nil");
    assert_eq!(n.end, 1);
}

#[test]
fn no_suffixes_before_21() {
    let n = scan_at("3r", 20);
    assert_eq!(n.kind, NumericKind::Integer);
    assert_eq!(n.end, 1);
}

// === Malformed numerals ===

#[test]
fn misplaced_underscores() {
    for text in ["1__2", "1_", "0x_1", "1_.5"] {
        let n = scan(text);
        assert_eq!(codes(&n), vec![DiagnosticCode::TrailingInNumber], "{text}");
        assert_eq!(n.errors[0].character, Some('_'));
    }
}

#[test]
fn empty_digits_after_prefix() {
    let n = scan("0x");
    assert_eq!(n.text, "0");
    assert_eq!(n.end, 2);
    assert_eq!(codes(&n), vec![DiagnosticCode::EmptyNumeric]);
}

#[test]
fn invalid_octal_points_at_digit() {
    let n = scan("0789");
    assert_eq!(codes(&n), vec![DiagnosticCode::InvalidOctal]);
    assert_eq!((n.errors[0].start, n.errors[0].end), (2, 3));
}

#[test]
fn bare_exponent() {
    let n = scan_at("1e", 20);
    assert_eq!(codes(&n), vec![DiagnosticCode::TrailingInNumber]);
    assert_eq!(n.errors[0].character, Some('e'));
    assert_eq!(n.end, 1);

    let n = scan("1e+");
    assert_eq!(codes(&n), vec![DiagnosticCode::EmptyNumeric]);
    assert_eq!(n.text, "1");

    let n = scan("1end");
    assert!(n.errors.is_empty());
    assert_eq!(n.end, 1);
}

#[test]
fn token_kinds() {
    assert_eq!(NumericKind::Integer.token_kind(), TokenKind::Integer);
    assert_eq!(NumericKind::Float.token_kind(), TokenKind::Float);
    assert_eq!(NumericKind::Rational.token_kind(), TokenKind::Rational);
    assert_eq!(
        NumericKind::RationalImaginary.token_kind(),
        TokenKind::Imaginary
    );
}

// === Properties ===

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn grouped_decimals_drop_separators(text in "[1-9][0-9]{0,2}(_[0-9]{3}){0,3}") {
            let n = scan(&text);
            prop_assert_eq!(n.kind, NumericKind::Integer);
            prop_assert_eq!(n.text, text.replace('_', ""));
            prop_assert_eq!(n.end, text.chars().count());
            prop_assert!(n.errors.is_empty());
        }

        #[test]
        fn fractions_are_floats(text in "[1-9][0-9]{0,4}\\.[0-9]{1,4}") {
            let n = scan(&text);
            prop_assert_eq!(n.kind, NumericKind::Float);
            prop_assert_eq!(n.end, text.chars().count());
        }

        #[test]
        fn any_tail_ends_inside_input(text in "[0-9][0-9a-zA-Z_.+-]{0,12}") {
            let n = scan(&text);
            prop_assert!(n.end >= 1);
            prop_assert!(n.end <= text.chars().count());
            for error in &n.errors {
                prop_assert!(error.start < error.end);
            }
        }
    }
}
