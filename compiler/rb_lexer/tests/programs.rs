//! Whole-program scans through the public API.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rb_lexer::{lex, DiagnosticCode, LexOutput, LexerConfig, Severity, SourceBuffer, TokenKind};

fn scan(text: &str) -> LexOutput {
    let source = SourceBuffer::new("program.rb", text).unwrap();
    lex(&source, LexerConfig::default()).unwrap()
}

/// `needle` appears as a contiguous run in `kinds`.
fn contains_run(kinds: &[TokenKind], needle: &[TokenKind]) -> bool {
    kinds.windows(needle.len()).any(|window| window == needle)
}

const GREETER: &str = r#"class Greeter < Base
  attr_reader :name

  def initialize(name = "world")
    @name = name
  end

  def greet(times: 1)
    times.times do |i|
      puts "Hello, #{@name}! (#{i})"
    end
  end
end

Greeter.new("you").greet(times: 2) if $DEBUG
"#;

#[test]
fn class_definition_scans_cleanly() {
    use TokenKind::*;

    let output = scan(GREETER);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    assert!(!output.truncated);

    let kinds = output.kinds();
    for run in [
        &[KwClass, Constant, Lt, Constant, Nl][..],
        &[Identifier, Symbol, Nl],
        &[KwDef, Identifier, Lparen2, Identifier, Eql, String, Rparen, Nl],
        &[Ivar, Eql, Identifier, Nl],
        &[KwDef, Identifier, Lparen2, Label, Integer, Rparen, Nl],
        &[Identifier, Dot, Identifier, KwDo, Pipe, Identifier, Pipe, Identifier],
        &[
            StringBeg,
            StringContent,
            StringDbeg,
            Ivar,
            StringDend,
            StringContent,
            StringDbeg,
            Identifier,
            StringDend,
            StringContent,
            StringEnd,
            Nl,
        ],
        &[
            Constant, Dot, Identifier, Lparen2, String, Rparen, Dot, Identifier, Lparen2, Label,
            Integer, Rparen, KwIfMod, Gvar, Nl,
        ],
    ] {
        assert!(contains_run(&kinds, run), "missing {run:?} in {kinds:?}");
    }
    assert_eq!(kinds.iter().filter(|&&kind| kind == KwEnd).count(), 4);
}

#[test]
fn heredoc_argument_inside_a_call() {
    use TokenKind::*;

    let output = scan("log(<<~MSG, level: :warn)\n  Disk at #{pct}%\nMSG\nnext_line\n");
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    assert_eq!(
        output.kinds(),
        vec![
            Identifier,
            Lparen2,
            StringBeg,
            StringContent,
            StringDbeg,
            Identifier,
            StringDend,
            StringContent,
            StringEnd,
            Comma,
            Label,
            Symbol,
            Rparen,
            Nl,
            Identifier,
            Nl,
        ]
    );
    let contents: Vec<&str> = output
        .tokens
        .iter()
        .filter(|token| token.kind == StringContent)
        .map(|token| token.text.as_str())
        .collect();
    assert_eq!(contents, vec!["Disk at ", "%\n"]);
}

#[test]
fn comments_and_documents_are_kept_apart() {
    let output = scan("# frozen_string_literal: true\n=begin\nnotes\n=end\nx = 1 # one\n");
    let texts: Vec<&str> = output.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["# frozen_string_literal: true", "=begin\nnotes\n=end", "# one"]
    );
    assert_eq!(
        output.kinds(),
        vec![
            TokenKind::Identifier,
            TokenKind::Eql,
            TokenKind::Integer,
            TokenKind::Nl
        ]
    );
}

#[test]
fn fatal_diagnostic_truncates_output() {
    let output = scan("a = 1\nb = \"open\nc = 2\n");
    assert!(output.truncated);
    let last = output.diagnostics.last().unwrap();
    assert_eq!(last.code, DiagnosticCode::StringEof);
    assert_eq!(last.severity, Severity::Fatal);
    assert!(output.has_errors());
    // Everything before the unterminated literal was still produced.
    assert_eq!(
        output.kinds()[..4],
        [
            TokenKind::Identifier,
            TokenKind::Eql,
            TokenKind::Integer,
            TokenKind::Nl
        ]
    );
}

#[test]
fn warnings_do_not_count_as_errors() {
    let output = scan("puts -1\n");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].severity, Severity::Warning);
    assert!(!output.has_errors());
    assert!(!output.diagnostics[0].message().is_empty());
}

#[test]
fn older_language_versions() {
    let source = SourceBuffer::new("old.rb", "x = ?a\ny = {:a => 1}\n").unwrap();
    let output = lex(&source, LexerConfig::new().with_version(18).unwrap()).unwrap();
    let pairs: Vec<(TokenKind, &str)> = output
        .tokens
        .iter()
        .map(|token| (token.kind, token.text.as_str()))
        .collect();
    assert_eq!(pairs[2], (TokenKind::Integer, "97"));
    assert!(output.diagnostics.is_empty());
}

#[test]
fn unsupported_version_is_rejected() {
    assert!(LexerConfig::new().with_version(17).is_err());
    assert!(LexerConfig::new().with_version(40).is_err());
}
