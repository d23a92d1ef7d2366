//! Symbolic diagnostic codes.

use std::fmt;

/// Every condition the scanner can report.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticCode {
    // === Ambiguity warnings ===
    AmbiguousLiteral,
    AmbiguousPrefix,

    // === Lexical errors ===
    BareBackslash,
    Unexpected,
    CvarName,
    IvarName,
    RegexpOptions,
    UnexpectedPercentStr,
    HeredocIdEndsWithNl,
    HeredocIdHasNewline,

    // === Numeric literals ===
    EmptyNumeric,
    InvalidOctal,
    NoDotDigitLiteral,
    TrailingInNumber,

    // === Escape sequences ===
    EscapeEof,
    IncompleteEscape,
    InvalidEscape,
    InvalidEscapeUse,
    InvalidHexEscape,
    InvalidUnicodeEscape,
    UnicodePointTooLarge,
    UnterminatedUnicode,

    // === End of input inside a construct ===
    StringEof,
    EmbeddedDocument,
}

impl DiagnosticCode {
    /// Symbolic name, stable across releases.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::AmbiguousLiteral => "ambiguous_literal",
            DiagnosticCode::AmbiguousPrefix => "ambiguous_prefix",
            DiagnosticCode::BareBackslash => "bare_backslash",
            DiagnosticCode::Unexpected => "unexpected",
            DiagnosticCode::CvarName => "cvar_name",
            DiagnosticCode::IvarName => "ivar_name",
            DiagnosticCode::RegexpOptions => "regexp_options",
            DiagnosticCode::UnexpectedPercentStr => "unexpected_percent_str",
            DiagnosticCode::HeredocIdEndsWithNl => "heredoc_id_ends_with_nl",
            DiagnosticCode::HeredocIdHasNewline => "heredoc_id_has_newline",
            DiagnosticCode::EmptyNumeric => "empty_numeric",
            DiagnosticCode::InvalidOctal => "invalid_octal",
            DiagnosticCode::NoDotDigitLiteral => "no_dot_digit_literal",
            DiagnosticCode::TrailingInNumber => "trailing_in_number",
            DiagnosticCode::EscapeEof => "escape_eof",
            DiagnosticCode::IncompleteEscape => "incomplete_escape",
            DiagnosticCode::InvalidEscape => "invalid_escape",
            DiagnosticCode::InvalidEscapeUse => "invalid_escape_use",
            DiagnosticCode::InvalidHexEscape => "invalid_hex_escape",
            DiagnosticCode::InvalidUnicodeEscape => "invalid_unicode_escape",
            DiagnosticCode::UnicodePointTooLarge => "unicode_point_too_large",
            DiagnosticCode::UnterminatedUnicode => "unterminated_unicode",
            DiagnosticCode::StringEof => "string_eof",
            DiagnosticCode::EmbeddedDocument => "embedded_document",
        }
    }

    /// Message template. `%{key}` placeholders name diagnostic arguments.
    pub const fn template(self) -> &'static str {
        match self {
            DiagnosticCode::AmbiguousLiteral => {
                "ambiguous first argument; put parentheses or a space even after the operator"
            }
            DiagnosticCode::AmbiguousPrefix => "`%{prefix}' interpreted as argument prefix",
            DiagnosticCode::BareBackslash => "bare backslash only allowed before newline",
            DiagnosticCode::Unexpected => "unexpected `%{character}'",
            DiagnosticCode::CvarName => "`%{name}' is not allowed as a class variable name",
            DiagnosticCode::IvarName => "`%{name}' is not allowed as an instance variable name",
            DiagnosticCode::RegexpOptions => "unknown regexp options: %{options}",
            DiagnosticCode::UnexpectedPercentStr => "%{type}: unknown type of %string",
            DiagnosticCode::HeredocIdEndsWithNl => "here document identifier ends with a newline",
            DiagnosticCode::HeredocIdHasNewline => {
                "here document identifier across newlines, never match"
            }
            DiagnosticCode::EmptyNumeric => "numeric literal without digits",
            DiagnosticCode::InvalidOctal => "invalid octal digit",
            DiagnosticCode::NoDotDigitLiteral => {
                "no .<digit> floating literal anymore; put 0 before dot"
            }
            DiagnosticCode::TrailingInNumber => "trailing `%{character}' in number",
            DiagnosticCode::EscapeEof => "escape sequence meets end of file",
            DiagnosticCode::IncompleteEscape => "incomplete character syntax",
            DiagnosticCode::InvalidEscape => "invalid escape character syntax",
            DiagnosticCode::InvalidEscapeUse => "invalid character syntax; use ?%{escape}",
            DiagnosticCode::InvalidHexEscape => "invalid hex escape",
            DiagnosticCode::InvalidUnicodeEscape => "invalid Unicode escape",
            DiagnosticCode::UnicodePointTooLarge => "invalid Unicode codepoint (too large)",
            DiagnosticCode::UnterminatedUnicode => "unterminated Unicode escape",
            DiagnosticCode::StringEof => "unterminated string meets end of file",
            DiagnosticCode::EmbeddedDocument => "embedded document meets end of file",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
