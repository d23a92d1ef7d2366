use super::*;
use pretty_assertions::assert_eq;

// === Construction ===

#[test]
fn constructors_set_severity() {
    let span = Span::new(0, 1);
    assert_eq!(
        Diagnostic::warning(DiagnosticCode::AmbiguousPrefix, span).severity,
        Severity::Warning
    );
    assert_eq!(
        Diagnostic::error(DiagnosticCode::InvalidOctal, span).severity,
        Severity::Error
    );
    assert!(Diagnostic::fatal(DiagnosticCode::StringEof, span).is_fatal());
}

#[test]
fn severity_ordering() {
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Fatal);
}

// === Message substitution ===

#[test]
fn message_substitutes_arguments() {
    let diag = Diagnostic::warning(DiagnosticCode::AmbiguousPrefix, Span::new(2, 3))
        .with_arg("prefix", "-");
    assert_eq!(diag.message(), "`-' interpreted as argument prefix");
    assert_eq!(diag.arg("prefix"), Some("-"));
    assert_eq!(diag.arg("missing"), None);
}

#[test]
fn message_without_placeholders_is_template() {
    let diag = Diagnostic::error(DiagnosticCode::EmptyNumeric, Span::new(0, 2));
    assert_eq!(diag.message(), "numeric literal without digits");
}

#[test]
fn missing_argument_keeps_placeholder() {
    let diag = Diagnostic::error(DiagnosticCode::Unexpected, Span::new(0, 1));
    assert_eq!(diag.message(), "unexpected `%{character}'");
}

#[test]
fn display_includes_code_and_span() {
    let diag = Diagnostic::error(DiagnosticCode::IvarName, Span::new(4, 6)).with_arg("name", "@1");
    assert_eq!(
        diag.to_string(),
        "error[ivar_name] 4..6: `@1' is not allowed as an instance variable name"
    );
}

#[test]
fn code_names_are_snake_case() {
    assert_eq!(DiagnosticCode::HeredocIdEndsWithNl.as_str(), "heredoc_id_ends_with_nl");
    assert_eq!(DiagnosticCode::UnicodePointTooLarge.to_string(), "unicode_point_too_large");
}
