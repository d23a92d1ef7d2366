use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_point_span_is_empty() {
    let span = Span::point(7);
    assert!(span.is_empty());
    assert!(!span.contains(7));
    assert_eq!(span.to_range(), 7..7);
}

#[test]
fn test_try_from_range_overflow() {
    let big = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(big..big),
        Err(SpanError::StartTooLarge(big))
    );
    assert_eq!(Span::try_from_range(0..big), Err(SpanError::EndTooLarge(big)));
    assert_eq!(Span::try_from_range(3..9), Ok(Span::new(3, 9)));
}

#[test]
fn test_span_debug_format() {
    assert_eq!(format!("{:?}", Span::new(1, 4)), "1..4");
}
