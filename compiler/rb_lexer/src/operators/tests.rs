use super::*;
use pretty_assertions::assert_eq;

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

#[test]
fn longest_operator_wins() {
    assert_eq!(scan_operator(&chars("<=>x"), 0), Some("<=>"));
    assert_eq!(scan_operator(&chars("<= x"), 0), Some("<="));
    assert_eq!(scan_operator(&chars("**=1"), 0), Some("**="));
    assert_eq!(scan_operator(&chars("..."), 0), Some("..."));
    assert_eq!(scan_operator(&chars("&.foo"), 0), Some("&."));
    assert_eq!(scan_operator(&chars("a+b"), 1), Some("+"));
}

#[test]
fn no_operator() {
    assert_eq!(scan_operator(&chars("abc"), 0), None);
    assert_eq!(scan_operator(&chars("+"), 5), None);
}

#[test]
fn method_operators() {
    assert_eq!(scan_method_operator(&chars("[]=(k)"), 0), Some("[]="));
    assert_eq!(scan_method_operator(&chars("-@"), 0), Some("-@"));
    assert_eq!(scan_method_operator(&chars("`"), 0), Some("`"));
    assert_eq!(scan_method_operator(&chars("..."), 0), None);
}

#[test]
fn tables() {
    assert_eq!(punctuation("<=>"), Some(TokenKind::Cmp));
    assert_eq!(punctuation("*"), Some(TokenKind::Star2));
    assert_eq!(punctuation_begin("*"), Some(TokenKind::Star));
    assert_eq!(punctuation_begin("::"), Some(TokenKind::Colon3));
    assert_eq!(punctuation_begin("%"), None);
    assert_eq!(punctuation("+="), None);
}

#[test]
fn assignable_operators() {
    assert!(is_assignable("||"));
    assert!(is_assignable("<<"));
    assert!(!is_assignable("=="));
    assert!(!is_assignable("~"));
}
