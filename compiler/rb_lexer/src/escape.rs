//! Backslash escape decoding for interpolating literals and character
//! literals.
//!
//! Decoding is byte-oriented: `\xFF` and `\M-a` produce single bytes that need
//! not form valid UTF-8 on their own, so values are appended to a byte buffer
//! and converted once the surrounding content is complete. Malformed escapes
//! push an [`EscapeError`] and decode to a best-effort value; only a backslash
//! at end of input is fatal.

use rb_diagnostic::DiagnosticCode;

use crate::LanguageVersion;

const REPLACEMENT: char = '\u{FFFD}';

/// A malformed escape, as codepoint positions into the scanned source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EscapeError {
    pub code: DiagnosticCode,
    pub start: usize,
    pub end: usize,
}

impl EscapeError {
    #[cold]
    fn new(code: DiagnosticCode, start: usize, end: usize) -> Self {
        EscapeError { code, start, end }
    }

    pub(crate) fn is_fatal(&self) -> bool {
        self.code == DiagnosticCode::EscapeEof
    }
}

#[inline]
fn simple_escape(c: char) -> Option<u8> {
    let byte = match c {
        'a' => 0x07,
        'b' => 0x08,
        'e' => 0x1b,
        'f' => 0x0c,
        'n' => b'\n',
        'r' => b'\r',
        's' => b' ',
        't' => b'\t',
        'v' => 0x0b,
        '\\' => b'\\',
        _ => return None,
    };
    Some(byte)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn hex_run(chars: &[char], start: usize, max: usize) -> usize {
    chars
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take(max)
        .take_while(|c| c.is_ascii_hexdigit())
        .count()
}

fn parse_radix(chars: &[char], radix: u32) -> Option<u32> {
    chars
        .iter()
        .try_fold(0u32, |acc, c| Some(acc.checked_mul(radix)? + c.to_digit(radix)?))
}

/// Decode the escape whose backslash is at `pos`, appending its value to
/// `out`. Returns the position just past the escape.
pub(crate) fn unescape(
    chars: &[char],
    pos: usize,
    version: LanguageVersion,
    out: &mut Vec<u8>,
    errors: &mut Vec<EscapeError>,
) -> usize {
    let at = |i: usize| chars.get(i).copied();
    let Some(c) = at(pos + 1) else {
        errors.push(EscapeError::new(DiagnosticCode::EscapeEof, pos, pos + 1));
        return pos + 1;
    };

    match c {
        // Line continuation.
        '\n' => pos + 2,
        '0'..='7' => {
            let len = chars[pos + 1..]
                .iter()
                .take(3)
                .take_while(|c| matches!(c, '0'..='7'))
                .count();
            let value = parse_radix(&chars[pos + 1..pos + 1 + len], 8).unwrap_or(0);
            #[allow(clippy::cast_possible_truncation, reason = "masked to one byte")]
            out.push((value & 0xff) as u8);
            pos + 1 + len
        }
        'x' => {
            let len = hex_run(chars, pos + 2, 2);
            if len == 0 {
                errors.push(EscapeError::new(DiagnosticCode::InvalidHexEscape, pos, pos + 2));
                return pos + 2;
            }
            let value = parse_radix(&chars[pos + 2..pos + 2 + len], 16).unwrap_or(0);
            #[allow(clippy::cast_possible_truncation, reason = "at most two hex digits")]
            out.push(value as u8);
            pos + 2 + len
        }
        'u' if version.at_least(19) => {
            if at(pos + 2) == Some('{') {
                unicode_list(chars, pos, out, errors)
            } else {
                unicode_fixed(chars, pos, out, errors)
            }
        }
        'c' => {
            let (value, end) = control(chars, pos + 2, pos, version, errors);
            if let Some(byte) = value {
                out.push(byte);
            }
            end
        }
        'C' | 'M' if at(pos + 2) == Some('-') => {
            let (value, end) = if c == 'C' {
                control(chars, pos + 3, pos, version, errors)
            } else {
                meta(chars, pos + 3, pos, version, errors)
            };
            if let Some(byte) = value {
                out.push(byte);
            }
            end
        }
        'C' | 'M' => {
            errors.push(EscapeError::new(DiagnosticCode::InvalidEscape, pos, pos + 2));
            pos + 2
        }
        _ => {
            match simple_escape(c) {
                Some(byte) => out.push(byte),
                None => push_char(out, c),
            }
            pos + 2
        }
    }
}

/// `\uXXXX`: exactly four hex digits.
fn unicode_fixed(
    chars: &[char],
    pos: usize,
    out: &mut Vec<u8>,
    errors: &mut Vec<EscapeError>,
) -> usize {
    let len = hex_run(chars, pos + 2, 4);
    let end = pos + 2 + len;
    if len < 4 {
        errors.push(EscapeError::new(DiagnosticCode::InvalidUnicodeEscape, pos, end));
        push_char(out, REPLACEMENT);
        return end;
    }
    match parse_radix(&chars[pos + 2..end], 16).and_then(char::from_u32) {
        Some(c) => push_char(out, c),
        None => {
            errors.push(EscapeError::new(DiagnosticCode::InvalidUnicodeEscape, pos, end));
            push_char(out, REPLACEMENT);
        }
    }
    end
}

/// `\u{X Y Z}`: codepoints separated by blanks.
fn unicode_list(
    chars: &[char],
    pos: usize,
    out: &mut Vec<u8>,
    errors: &mut Vec<EscapeError>,
) -> usize {
    let is_blank = |i: usize| matches!(chars.get(i), Some(' ' | '\t'));
    let mut i = pos + 3;
    let mut any = false;
    let mut too_large = false;

    while is_blank(i) {
        i += 1;
    }
    loop {
        let len = hex_run(chars, i, usize::MAX);
        if len == 0 {
            break;
        }
        any = true;
        let digits = &chars[i..i + len];
        let value = if len > 6 { None } else { parse_radix(digits, 16) };
        match value {
            Some(v) if v < 0x11_0000 => match char::from_u32(v) {
                Some(c) => push_char(out, c),
                None => {
                    errors.push(EscapeError::new(
                        DiagnosticCode::InvalidUnicodeEscape,
                        i,
                        i + len,
                    ));
                    push_char(out, REPLACEMENT);
                }
            },
            _ => {
                too_large = true;
                push_char(out, REPLACEMENT);
            }
        }
        i += len;
        while is_blank(i) {
            i += 1;
        }
    }

    if chars.get(i) != Some(&'}') {
        if any {
            errors.push(EscapeError::new(DiagnosticCode::UnterminatedUnicode, pos, i));
        } else {
            errors.push(EscapeError::new(DiagnosticCode::InvalidUnicodeEscape, pos, i));
            push_char(out, REPLACEMENT);
        }
        return i;
    }
    let end = i + 1;
    if !any {
        errors.push(EscapeError::new(DiagnosticCode::InvalidUnicodeEscape, pos, end));
        push_char(out, REPLACEMENT);
    }
    if too_large {
        errors.push(EscapeError::new(DiagnosticCode::UnicodePointTooLarge, pos, end));
    }
    end
}

/// Target of `\c` / `\C-`, masked to a control character.
fn control(
    chars: &[char],
    pos: usize,
    escape_start: usize,
    version: LanguageVersion,
    errors: &mut Vec<EscapeError>,
) -> (Option<u8>, usize) {
    if chars.get(pos) == Some(&'?') {
        return (Some(0x7f), pos + 1);
    }
    let (value, end) = modified_target(chars, pos, escape_start, version, errors);
    (value.map(|b| b & 0x9f), end)
}

/// Target of `\M-`, with the meta bit set.
fn meta(
    chars: &[char],
    pos: usize,
    escape_start: usize,
    version: LanguageVersion,
    errors: &mut Vec<EscapeError>,
) -> (Option<u8>, usize) {
    let (value, end) = modified_target(chars, pos, escape_start, version, errors);
    (value.map(|b| b | 0x80), end)
}

/// The single-byte character a control or meta prefix applies to.
fn modified_target(
    chars: &[char],
    pos: usize,
    escape_start: usize,
    version: LanguageVersion,
    errors: &mut Vec<EscapeError>,
) -> (Option<u8>, usize) {
    match chars.get(pos).copied() {
        None => {
            errors.push(EscapeError::new(DiagnosticCode::EscapeEof, escape_start, pos));
            (None, pos)
        }
        Some('\\') => match chars.get(pos + 1).copied() {
            Some('c') => control(chars, pos + 2, escape_start, version, errors),
            Some('C') if chars.get(pos + 2) == Some(&'-') => {
                control(chars, pos + 3, escape_start, version, errors)
            }
            Some('M') if chars.get(pos + 2) == Some(&'-') => {
                meta(chars, pos + 3, escape_start, version, errors)
            }
            Some('u') if version.at_least(19) => {
                let mut scratch = Vec::new();
                let end = unescape(chars, pos, version, &mut scratch, errors);
                errors.push(EscapeError::new(
                    DiagnosticCode::InvalidEscapeUse,
                    escape_start,
                    end,
                ));
                (None, end)
            }
            _ => {
                let mut scratch = Vec::new();
                let end = unescape(chars, pos, version, &mut scratch, errors);
                match scratch.as_slice() {
                    [byte] => (Some(*byte), end),
                    _ => {
                        errors.push(EscapeError::new(
                            DiagnosticCode::InvalidEscape,
                            escape_start,
                            end,
                        ));
                        (None, end)
                    }
                }
            }
        },
        Some(c) if c.is_ascii() => {
            #[allow(clippy::cast_possible_truncation, reason = "ASCII fits in a byte")]
            let byte = c as u8;
            (Some(byte), pos + 1)
        }
        Some(_) => {
            errors.push(EscapeError::new(
                DiagnosticCode::InvalidEscape,
                escape_start,
                pos + 1,
            ));
            (None, pos + 1)
        }
    }
}

#[cfg(test)]
mod tests;
