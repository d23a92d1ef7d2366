use super::*;
use crate::DiagnosticCode;
use pretty_assertions::assert_eq;
use rb_ir::Span;

#[test]
fn keeps_scan_order() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::warning(DiagnosticCode::AmbiguousLiteral, Span::new(4, 5)));
    queue.push(Diagnostic::error(DiagnosticCode::InvalidOctal, Span::new(1, 2)));
    let codes: Vec<_> = queue.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![DiagnosticCode::AmbiguousLiteral, DiagnosticCode::InvalidOctal]
    );
    assert_eq!(queue.error_count(), 1);
    assert!(!queue.has_fatal());
}

#[test]
fn fatal_is_tracked() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::fatal(DiagnosticCode::StringEof, Span::new(0, 1)));
    assert!(queue.has_fatal());
    assert_eq!(queue.error_count(), 1);
}

#[test]
fn clear_resets_counters() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::fatal(DiagnosticCode::EmbeddedDocument, Span::new(0, 6)));
    queue.clear();
    assert!(queue.is_empty());
    assert!(!queue.has_fatal());
    assert_eq!(queue.error_count(), 0);
}
