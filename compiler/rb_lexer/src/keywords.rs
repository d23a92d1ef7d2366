//! Reserved-word resolution.
//!
//! Every keyword has two token kinds: the one used where a statement may
//! begin (`if` is `kIF`) and the one used after a complete expression (`if`
//! is `kIF_MOD`). Only the modifier words and `rescue` differ between the
//! two. The keyword's class picks the scanner state that follows it.
//!
//! Lookup is length-bucketed like the identifier fast path: keywords are
//! 2-12 chars, so anything outside that range is rejected before any
//! comparison.

use rb_ir::TokenKind;

/// What a keyword leaves the scanner expecting.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum KeywordClass {
    /// `if`, `unless`, `while`, `until`: statement keyword or modifier.
    Modifier,
    /// Followed by a value: `then`, `else`, `and`, `do`, `class`, ...
    Value,
    /// `rescue`, `return`, `break`, `next`.
    Mid,
    /// `yield`, `super`, `not`, `defined?`.
    Arg,
    /// Complete values such as `self`, `nil` and `end`.
    End,
    /// `def`, `undef`, `alias`: a method name follows.
    Fname,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Keyword {
    pub class: KeywordClass,
    /// Kind at the beginning of a statement.
    pub begin: TokenKind,
    /// Kind after an expression.
    pub end: TokenKind,
}

impl Keyword {
    const fn same(class: KeywordClass, kind: TokenKind) -> Self {
        Keyword {
            class,
            begin: kind,
            end: kind,
        }
    }

    const fn split(class: KeywordClass, begin: TokenKind, end: TokenKind) -> Self {
        Keyword { class, begin, end }
    }
}

/// Look up a reserved word. `text` must be the whole word, including a
/// trailing `?` for `defined?`.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<Keyword> {
    use KeywordClass::{Arg, End, Fname, Mid, Modifier, Value};

    let len = text.len();
    if !(2..=12).contains(&len) {
        return None;
    }
    let first = text.as_bytes()[0];
    if !first.is_ascii_alphabetic() && first != b'_' {
        return None;
    }

    let keyword = match len {
        2 => match text {
            "do" => Keyword::same(Value, TokenKind::KwDo),
            "if" => Keyword::split(Modifier, TokenKind::KwIf, TokenKind::KwIfMod),
            "in" => Keyword::same(Value, TokenKind::KwIn),
            "or" => Keyword::same(Value, TokenKind::KwOr),
            _ => return None,
        },
        3 => match text {
            "and" => Keyword::same(Value, TokenKind::KwAnd),
            "def" => Keyword::same(Fname, TokenKind::KwDef),
            "end" => Keyword::same(End, TokenKind::KwEnd),
            "END" => Keyword::same(End, TokenKind::KwLEnd),
            "for" => Keyword::same(Value, TokenKind::KwFor),
            "nil" => Keyword::same(End, TokenKind::KwNil),
            "not" => Keyword::same(Arg, TokenKind::KwNot),
            _ => return None,
        },
        4 => match text {
            "case" => Keyword::same(Value, TokenKind::KwCase),
            "else" => Keyword::same(Value, TokenKind::KwElse),
            "next" => Keyword::same(Mid, TokenKind::KwNext),
            "redo" => Keyword::same(End, TokenKind::KwRedo),
            "self" => Keyword::same(End, TokenKind::KwSelf),
            "then" => Keyword::same(Value, TokenKind::KwThen),
            "true" => Keyword::same(End, TokenKind::KwTrue),
            "when" => Keyword::same(Value, TokenKind::KwWhen),
            _ => return None,
        },
        5 => match text {
            "alias" => Keyword::same(Fname, TokenKind::KwAlias),
            "begin" => Keyword::same(Value, TokenKind::KwBegin),
            "BEGIN" => Keyword::same(End, TokenKind::KwLBegin),
            "break" => Keyword::same(Mid, TokenKind::KwBreak),
            "class" => Keyword::same(Value, TokenKind::KwClass),
            "elsif" => Keyword::same(Value, TokenKind::KwElsif),
            "false" => Keyword::same(End, TokenKind::KwFalse),
            "retry" => Keyword::same(End, TokenKind::KwRetry),
            "super" => Keyword::same(Arg, TokenKind::KwSuper),
            "undef" => Keyword::same(Fname, TokenKind::KwUndef),
            "until" => Keyword::split(Modifier, TokenKind::KwUntil, TokenKind::KwUntilMod),
            "while" => Keyword::split(Modifier, TokenKind::KwWhile, TokenKind::KwWhileMod),
            "yield" => Keyword::same(Arg, TokenKind::KwYield),
            _ => return None,
        },
        6 => match text {
            "ensure" => Keyword::same(Value, TokenKind::KwEnsure),
            "module" => Keyword::same(Value, TokenKind::KwModule),
            "rescue" => Keyword::split(Mid, TokenKind::KwRescue, TokenKind::KwRescueMod),
            "return" => Keyword::same(Mid, TokenKind::KwReturn),
            "unless" => Keyword::split(Modifier, TokenKind::KwUnless, TokenKind::KwUnlessMod),
            _ => return None,
        },
        8 => match text {
            "__FILE__" => Keyword::same(End, TokenKind::KwFile),
            "__LINE__" => Keyword::same(End, TokenKind::KwLine),
            "defined?" => Keyword::same(Arg, TokenKind::KwDefined),
            _ => return None,
        },
        12 => match text {
            "__ENCODING__" => Keyword::same(End, TokenKind::KwEncoding),
            _ => return None,
        },
        _ => return None,
    };
    Some(keyword)
}

/// Words that may follow an expression as a statement modifier.
#[inline]
pub(crate) fn is_modifier(text: &str) -> bool {
    matches!(text, "if" | "unless" | "while" | "until" | "rescue")
}

#[cfg(test)]
mod tests;
