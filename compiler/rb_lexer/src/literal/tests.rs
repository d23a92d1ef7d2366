#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use rb_ir::Span;
use rb_lexer_core::SourceBuffer;

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

fn literal(kind: LiteralKind, prefix: &str, delimiter: char) -> Literal {
    let len = prefix.chars().count();
    Literal::new(kind, prefix.to_owned(), delimiter, 0, len, true)
}

fn feed_all(literal: &mut Literal, text: &str) -> Vec<LiteralAction> {
    let chars = chars(text);
    (0..chars.len()).map(|i| literal.feed(&chars[i..])).collect()
}

// === Kinds ===

#[test]
fn kind_table() {
    let kind = LiteralKind::from_type("%W").unwrap();
    assert_eq!(kind.start_token(), TokenKind::WordsBeg);
    assert!(kind.interpolates());
    assert!(kind.is_words());

    let kind = LiteralKind::from_type("<<'").unwrap();
    assert_eq!(kind.start_token(), TokenKind::StringBeg);
    assert!(!kind.interpolates());

    assert_eq!(
        LiteralKind::from_type("%r").map(LiteralKind::start_token),
        Some(TokenKind::RegexpBeg)
    );
    assert_eq!(
        LiteralKind::from_type("%s").map(LiteralKind::start_token),
        Some(TokenKind::Symbeg)
    );
    assert_eq!(LiteralKind::from_type("%z"), None);
}

// === Feeding ===

#[test]
fn bracket_delimiters_nest() {
    let mut lit = literal(LiteralKind::PercentQ, "%q(", '(');
    let actions = feed_all(&mut lit, "(a))");
    assert_eq!(
        actions,
        vec![
            LiteralAction::Continue,
            LiteralAction::Continue,
            LiteralAction::Continue,
            LiteralAction::CloseLiteral,
        ]
    );
}

#[test]
fn same_character_delimiters_do_not_nest() {
    let mut lit = literal(LiteralKind::Percent, "%|", '|');
    assert_eq!(lit.feed(&chars("|")), LiteralAction::CloseLiteral);
}

#[test]
fn interpolation_forms() {
    let mut lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    assert_eq!(lit.feed(&chars("#{x}")), LiteralAction::OpenInterpolation);
    assert_eq!(lit.feed(&chars("#@x")), LiteralAction::InterpolateVariable);
    assert_eq!(lit.feed(&chars("#@@x")), LiteralAction::InterpolateVariable);
    assert_eq!(lit.feed(&chars("#$x")), LiteralAction::InterpolateVariable);
    assert_eq!(lit.feed(&chars("#@1")), LiteralAction::InterpolateVariable);
    assert_eq!(lit.feed(&chars("#@@1")), LiteralAction::InterpolateVariable);
    assert_eq!(lit.feed(&chars("#@ x")), LiteralAction::Continue);
    assert_eq!(lit.feed(&chars("# x")), LiteralAction::Continue);
}

#[test]
fn plain_literals_do_not_interpolate() {
    let mut lit = literal(LiteralKind::SingleQuote, "'", '\'');
    assert_eq!(lit.feed(&chars("#{x}")), LiteralAction::Continue);
    assert_eq!(lit.feed(&chars("\\'")), LiteralAction::Escape);
}

#[test]
fn word_separators_and_newlines() {
    let mut lit = literal(LiteralKind::Words, "%w[", '[');
    assert_eq!(lit.feed(&chars(" a")), LiteralAction::WordSeparator);
    assert_eq!(lit.feed(&chars("\n")), LiteralAction::FlushContent);

    let mut lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    assert_eq!(lit.feed(&chars(" a")), LiteralAction::Continue);
}

#[test]
fn backslash_delimiter_closes() {
    let mut lit = literal(LiteralKind::PercentQ, "%q\\", '\\');
    assert_eq!(lit.feed(&chars("\\")), LiteralAction::CloseLiteral);
}

#[test]
fn munged_escapes() {
    let lit = literal(LiteralKind::Words, "%w(", '(');
    assert!(lit.munge_escape(' '));
    assert!(lit.munge_escape('('));
    assert!(lit.munge_escape(')'));
    assert!(lit.munge_escape('\\'));
    assert!(!lit.munge_escape('n'));

    let lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    assert!(!lit.munge_escape(' '));
    assert!(lit.munge_escape('"'));
}

#[test]
fn heredocs_never_munge() {
    let heredoc = Heredoc::new("EOS".to_owned(), false, false, 5, 6);
    let mut lit = Literal::heredoc(LiteralKind::HeredocDouble, "<<\"".to_owned(), 0, heredoc);
    assert!(!lit.munge_escape('\n'));
    assert!(!lit.munge_escape('\\'));
    assert_eq!(lit.feed(&chars("\n")), LiteralAction::FlushContent);
    assert_eq!(lit.feed(&chars("\\\n")), LiteralAction::Escape);
}

// === Interpolation braces ===

#[test]
fn interpolation_brace_counting() {
    let mut lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    assert!(!lit.in_interpolation());
    lit.start_interp_brace();
    lit.start_interp_brace();
    assert!(!lit.end_interp_brace());
    assert!(lit.end_interp_brace());
    assert!(!lit.in_interpolation());
}

// === Emission ===

#[test]
fn monolithic_string() {
    let source = SourceBuffer::new("t.rb", "\"ab\"").unwrap();
    let mut out = TokenEmitter::new(&source, false, true);
    let mut lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    lit.open(&mut out);
    lit.extend_string(b"ab", 1, 3);
    assert_eq!(lit.close(3, 4, false, &mut out), Closed::Delimiter);
    let (tokens, _) = out.take();
    assert_eq!(tokens.kinds(), vec![TokenKind::String]);
    assert_eq!(tokens[0].text, "ab");
    assert_eq!(tokens[0].span, Span::new(0, 4));
}

#[test]
fn flushed_string_emits_start_content_end() {
    let source = SourceBuffer::new("t.rb", "\"a\nb\"").unwrap();
    let mut out = TokenEmitter::new(&source, false, true);
    let mut lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    lit.open(&mut out);
    lit.extend_string(b"a\n", 1, 3);
    lit.flush_string(&mut out);
    lit.extend_string(b"b", 3, 4);
    lit.close(4, 5, false, &mut out);
    let (tokens, _) = out.take();
    assert_eq!(
        tokens.kinds(),
        vec![
            TokenKind::StringBeg,
            TokenKind::StringContent,
            TokenKind::StringContent,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(tokens[0].span, Span::new(0, 1));
    assert_eq!(tokens[3].span, Span::new(4, 5));
}

#[test]
fn label_end_covers_colon() {
    let source = SourceBuffer::new("t.rb", "\"a\": 1").unwrap();
    let mut out = TokenEmitter::new(&source, false, true);
    let mut lit = literal(LiteralKind::DoubleQuote, "\"", '"');
    lit.open(&mut out);
    lit.extend_string(b"a", 1, 2);
    assert_eq!(lit.close(2, 3, true, &mut out), Closed::Label);
    let (tokens, _) = out.take();
    assert_eq!(
        tokens.kinds(),
        vec![TokenKind::StringBeg, TokenKind::StringContent, TokenKind::LabelEnd]
    );
    assert_eq!(tokens[2].span, Span::new(2, 4));
}

#[test]
fn words_emit_spaces_once() {
    let source = SourceBuffer::new("t.rb", "%w(a  b)").unwrap();
    let mut out = TokenEmitter::new(&source, false, true);
    let mut lit = literal(LiteralKind::Words, "%w(", '(');
    lit.open(&mut out);
    lit.extend_string(b"a", 3, 4);
    lit.extend_space(4, 6, &mut out);
    lit.extend_string(b"b", 6, 7);
    lit.close(7, 8, false, &mut out);
    let (tokens, _) = out.take();
    assert_eq!(
        tokens.kinds(),
        vec![
            TokenKind::QwordsBeg,
            TokenKind::StringContent,
            TokenKind::Space,
            TokenKind::StringContent,
            TokenKind::Space,
            TokenKind::StringEnd,
        ]
    );
    assert_eq!(tokens[0].text, "%w(");
    assert_eq!(tokens[4].span, Span::new(7, 7));
}

// === Heredocs ===

#[test]
fn heredoc_terminators() {
    let plain = Heredoc::new("EOS".to_owned(), false, false, 5, 6);
    assert!(plain.is_terminator("EOS"));
    assert!(plain.is_terminator("EOS\r"));
    assert!(!plain.is_terminator("  EOS"));

    let indented = Heredoc::new("EOS".to_owned(), true, false, 5, 6);
    assert!(indented.is_terminator("  \tEOS"));
    assert!(!indented.is_terminator("EOS "));
}

#[test]
fn heredoc_indent_inference_ignores_blank_lines() {
    let mut heredoc = Heredoc::new("EOS".to_owned(), true, true, 5, 6);
    heredoc.infer_indent(&chars("    a"));
    heredoc.infer_indent(&chars(" "));
    heredoc.infer_indent(&chars("  b"));
    assert_eq!(heredoc.dedent_level, Some(2));
}
