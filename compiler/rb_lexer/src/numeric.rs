//! Numeric literal classification.
//!
//! Given the position of a leading digit, finds where the numeral ends,
//! which token kind it is, and its normalized text: underscores removed,
//! radix prefix in lowercase canonical form (`0x`, `0b`, `0o`), and the
//! `r`/`i`/`ri` suffix appended. Malformed numerals still produce a
//! best-effort token alongside their errors.
//!
//! A suffix is only taken when no identifier character follows it, so
//! `1if` is the integer `1` followed by the `if` modifier.

use rb_diagnostic::DiagnosticCode;
use rb_ir::TokenKind;
use rb_lexer_core::char_class::is_ident_char;

use crate::LanguageVersion;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Radix {
    fn accepts(self, c: char) -> bool {
        match self {
            Radix::Binary => matches!(c, '0' | '1'),
            // 8 and 9 are scanned so they can be reported.
            Radix::Octal | Radix::Decimal => c.is_ascii_digit(),
            Radix::Hex => c.is_ascii_hexdigit(),
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Radix::Binary => "0b",
            Radix::Octal => "0o",
            Radix::Decimal => "",
            Radix::Hex => "0x",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum NumericKind {
    Integer,
    Float,
    Rational,
    Imaginary,
    RationalImaginary,
}

impl NumericKind {
    pub(crate) fn token_kind(self) -> TokenKind {
        match self {
            NumericKind::Integer => TokenKind::Integer,
            NumericKind::Float => TokenKind::Float,
            NumericKind::Rational => TokenKind::Rational,
            NumericKind::Imaginary | NumericKind::RationalImaginary => TokenKind::Imaginary,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NumericError {
    pub code: DiagnosticCode,
    pub start: usize,
    pub end: usize,
    pub character: Option<char>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NumericScan {
    pub kind: NumericKind,
    pub radix: Radix,
    pub text: String,
    /// Position just past the numeral.
    pub end: usize,
    pub errors: Vec<NumericError>,
}

struct Scanner<'a> {
    chars: &'a [char],
    errors: Vec<NumericError>,
}

impl Scanner<'_> {
    fn at(&self, i: usize) -> char {
        self.chars.get(i).copied().unwrap_or('\0')
    }

    #[cold]
    fn error(&mut self, code: DiagnosticCode, start: usize, end: usize, character: Option<char>) {
        self.errors.push(NumericError {
            code,
            start,
            end,
            character,
        });
    }

    /// Digits with single underscores between them. Returns the end position
    /// and the digits without underscores.
    fn digits(&mut self, start: usize, radix: Radix) -> (usize, String) {
        let mut i = start;
        let mut text = String::new();
        let mut reported = false;
        loop {
            let c = self.at(i);
            if radix.accepts(c) {
                text.push(c);
                i += 1;
            } else if c == '_' {
                let between = i > start
                    && radix.accepts(self.at(i - 1))
                    && radix.accepts(self.at(i + 1));
                if !between && !reported {
                    self.error(DiagnosticCode::TrailingInNumber, i, i + 1, Some('_'));
                    reported = true;
                }
                i += 1;
            } else {
                break;
            }
        }
        (i, text)
    }

    fn check_octal(&mut self, start: usize, end: usize) {
        if let Some(offset) = self.chars[start..end].iter().position(|c| matches!(c, '8' | '9')) {
            let at = start + offset;
            self.error(DiagnosticCode::InvalidOctal, at, at + 1, None);
        }
    }
}

/// Classify the numeral starting at `start`, which must be an ASCII digit.
pub(crate) fn classify(chars: &[char], start: usize, version: LanguageVersion) -> NumericScan {
    let mut s = Scanner {
        chars,
        errors: Vec::new(),
    };

    let (radix, prefixed) = if s.at(start) == '0' {
        match s.at(start + 1) {
            'x' | 'X' => (Radix::Hex, true),
            'b' | 'B' => (Radix::Binary, true),
            'o' | 'O' => (Radix::Octal, true),
            'd' | 'D' => (Radix::Decimal, true),
            '_' | '0'..='9' => (Radix::Octal, false),
            _ => (Radix::Decimal, false),
        }
    } else {
        (Radix::Decimal, false)
    };

    let mut is_float = false;
    let mut has_exponent = false;
    let mut text = String::from(radix.prefix());
    let mut i;

    if prefixed {
        let digits_start = start + 2;
        let (end, digits) = s.digits(digits_start, radix);
        i = end;
        if digits.is_empty() {
            s.error(DiagnosticCode::EmptyNumeric, start, end, None);
            text = String::from("0");
        } else {
            if radix == Radix::Octal {
                s.check_octal(digits_start, end);
            }
            text.push_str(&digits);
        }
    } else if radix == Radix::Octal {
        // Leading zero: the zero itself is the prefix.
        let (end, digits) = s.digits(start, radix);
        i = end;
        s.check_octal(start, end);
        let rest = &digits[1..];
        if rest.is_empty() {
            text = String::from("0");
        } else {
            text.push_str(rest);
        }
    } else {
        let (end, mantissa) = s.digits(start, Radix::Decimal);
        i = end;
        text.push_str(&mantissa);

        if s.at(i) == '.' && s.at(i + 1).is_ascii_digit() {
            let (end, fraction) = s.digits(i + 1, Radix::Decimal);
            text.push('.');
            text.push_str(&fraction);
            is_float = true;
            i = end;
        }

        if matches!(s.at(i), 'e' | 'E') {
            let mut j = i + 1;
            let sign = s.at(j);
            if matches!(sign, '+' | '-') {
                j += 1;
            }
            if s.at(j).is_ascii_digit() {
                let (end, exponent) = s.digits(j, Radix::Decimal);
                text.push('e');
                if sign == '-' {
                    text.push('-');
                }
                text.push_str(&exponent);
                is_float = true;
                has_exponent = true;
                i = end;
            } else if !version.at_least(21) {
                let marker = s.at(i);
                s.error(DiagnosticCode::TrailingInNumber, i, i + 1, Some(marker));
            } else if !is_ident_char(s.at(i + 1)) {
                s.error(DiagnosticCode::EmptyNumeric, i, j, None);
            }
        }
    }

    let mut kind = if is_float {
        NumericKind::Float
    } else {
        NumericKind::Integer
    };

    if version.at_least(21) {
        let suffixes: &[(&str, NumericKind)] = if has_exponent {
            &[("i", NumericKind::Imaginary)]
        } else {
            &[
                ("ri", NumericKind::RationalImaginary),
                ("r", NumericKind::Rational),
                ("i", NumericKind::Imaginary),
            ]
        };
        for (suffix, suffixed) in suffixes {
            let len = suffix.len();
            let matches = suffix.chars().enumerate().all(|(k, c)| s.at(i + k) == c);
            if matches && !is_ident_char(s.at(i + len)) {
                text.push_str(suffix);
                kind = *suffixed;
                i += len;
                break;
            }
        }
    }

    NumericScan {
        kind,
        radix,
        text,
        end: i,
        errors: s.errors,
    }
}

#[cfg(test)]
mod tests;
