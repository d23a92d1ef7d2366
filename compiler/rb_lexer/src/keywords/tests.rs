use super::*;
use pretty_assertions::assert_eq;

// === Lookup ===

#[test]
fn begin_and_end_forms_differ_for_modifiers() {
    let kw = lookup("if").map(|k| (k.begin, k.end));
    assert_eq!(kw, Some((TokenKind::KwIf, TokenKind::KwIfMod)));
    let kw = lookup("rescue").map(|k| (k.begin, k.end));
    assert_eq!(kw, Some((TokenKind::KwRescue, TokenKind::KwRescueMod)));
}

#[test]
fn ordinary_keywords_share_one_kind() {
    for (text, kind) in [
        ("def", TokenKind::KwDef),
        ("BEGIN", TokenKind::KwLBegin),
        ("END", TokenKind::KwLEnd),
        ("defined?", TokenKind::KwDefined),
        ("__ENCODING__", TokenKind::KwEncoding),
        ("self", TokenKind::KwSelf),
    ] {
        let kw = lookup(text).unwrap_or_else(|| panic!("{text} should be a keyword"));
        assert_eq!(kw.begin, kind, "{text}");
        assert_eq!(kw.end, kind, "{text}");
    }
}

#[test]
fn non_keywords() {
    for text in ["", "x", "iff", "defined", "Def", "__END__", "lambda", "puts"] {
        assert!(lookup(text).is_none(), "{text} should not be a keyword");
    }
}

// === Classes ===

#[test]
fn classes() {
    let class = |text| lookup(text).map(|k| k.class);
    assert_eq!(class("then"), Some(KeywordClass::Value));
    assert_eq!(class("and"), Some(KeywordClass::Value));
    assert_eq!(class("return"), Some(KeywordClass::Mid));
    assert_eq!(class("yield"), Some(KeywordClass::Arg));
    assert_eq!(class("nil"), Some(KeywordClass::End));
    assert_eq!(class("alias"), Some(KeywordClass::Fname));
    assert_eq!(class("until"), Some(KeywordClass::Modifier));
}

#[test]
fn modifier_words() {
    for text in ["if", "unless", "while", "until", "rescue"] {
        assert!(is_modifier(text));
    }
    assert!(!is_modifier("and"));
}
