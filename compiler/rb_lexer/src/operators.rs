//! Operator and punctuation tables.
//!
//! Operators are matched longest-first from the current position. The same
//! text maps to different kinds at the beginning of an expression (`*` is a
//! splat there) and after one (`*` is multiplication).

use rb_ir::TokenKind;

/// Operators that may be defined as methods (`def +`, `:<=>`, `a.[]`).
const METHOD_OPERATORS: &[&str] = &[
    "[]=", "<=>", "===", "[]", "**", "=~", "!~", "==", "!=", "<=", ">=", "<<", ">>", "+@", "-@",
    "~@", "!@", "&", "|", "^", "+", "-", "*", "/", "%", "~", "!", "<", ">", "`",
];

/// Operators and punctuation recognized after an expression.
const OPERATORS: &[&str] = &[
    "**=", "<=>", "===", "...", "<<=", ">>=", "&&=", "||=", "**", "=~", "!~", "==", "!=", "<=",
    ">=", "<<", ">>", "&&", "||", "..", "::", "->", "=>", "&.", "&", "|", "^", "+", "-", "*",
    "/", "%", "~", "!", "<", ">", "=", ",", ".", ";", "?", ":", "(", ")", "[", "]", "{", "}",
];

fn longest_match(chars: &[char], pos: usize, table: &'static [&'static str]) -> Option<&'static str> {
    let rest = chars.get(pos..)?;
    table
        .iter()
        .filter(|op| op.len() <= rest.len() && op.chars().zip(rest).all(|(a, b)| a == *b))
        .max_by_key(|op| op.len())
        .copied()
}

/// Longest operator or punctuation at `pos`.
pub(crate) fn scan_operator(chars: &[char], pos: usize) -> Option<&'static str> {
    longest_match(chars, pos, OPERATORS)
}

/// Longest method-name operator at `pos`.
pub(crate) fn scan_method_operator(chars: &[char], pos: usize) -> Option<&'static str> {
    longest_match(chars, pos, METHOD_OPERATORS)
}

/// Operators that combine with a trailing `=` into an operator-assignment.
pub(crate) fn is_assignable(op: &str) -> bool {
    matches!(
        op,
        "&" | "|" | "&&" | "||" | "^" | "+" | "-" | "*" | "/" | "**" | "<<" | ">>" | "%"
    )
}

/// Kind of an operator after an expression.
pub(crate) fn punctuation(op: &str) -> Option<TokenKind> {
    let kind = match op {
        "=" => TokenKind::Eql,
        "&" => TokenKind::Amper2,
        "|" => TokenKind::Pipe,
        "!" | "!@" => TokenKind::Bang,
        "^" => TokenKind::Caret,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star2,
        "/" => TokenKind::Divide,
        "%" => TokenKind::Percent,
        "~" | "~@" => TokenKind::Tilde,
        "," => TokenKind::Comma,
        ";" => TokenKind::Semi,
        "." => TokenKind::Dot,
        ".." => TokenKind::Dot2,
        "..." => TokenKind::Dot3,
        "[" => TokenKind::Lbrack2,
        "]" => TokenKind::Rbrack,
        "(" => TokenKind::Lparen2,
        ")" => TokenKind::Rparen,
        "?" => TokenKind::Eh,
        ":" => TokenKind::Colon,
        "&&" => TokenKind::AndOp,
        "||" => TokenKind::OrOp,
        "-@" => TokenKind::Uminus,
        "+@" => TokenKind::Uplus,
        "**" => TokenKind::Pow,
        "->" => TokenKind::Lambda,
        "=~" => TokenKind::Match,
        "!~" => TokenKind::Nmatch,
        "==" => TokenKind::Eq,
        "!=" => TokenKind::Neq,
        ">" => TokenKind::Gt,
        ">>" => TokenKind::Rshft,
        ">=" => TokenKind::Geq,
        "<" => TokenKind::Lt,
        "<<" => TokenKind::Lshft,
        "<=" => TokenKind::Leq,
        "=>" => TokenKind::Assoc,
        "::" => TokenKind::Colon2,
        "===" => TokenKind::Eqq,
        "<=>" => TokenKind::Cmp,
        "[]" => TokenKind::Aref,
        "[]=" => TokenKind::Aset,
        "{" => TokenKind::Lcurly,
        "}" => TokenKind::Rcurly,
        "`" => TokenKind::BackRef2,
        "&." => TokenKind::AndDot,
        _ => return None,
    };
    Some(kind)
}

/// Kind of an operator at the beginning of an expression, where it differs.
pub(crate) fn punctuation_begin(op: &str) -> Option<TokenKind> {
    let kind = match op {
        "&" => TokenKind::Amper,
        "*" => TokenKind::Star,
        "**" => TokenKind::Dstar,
        "+" => TokenKind::Uplus,
        "-" => TokenKind::Uminus,
        "::" => TokenKind::Colon3,
        "(" => TokenKind::Lparen,
        "{" => TokenKind::Lbrace,
        "[" => TokenKind::Lbrack,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests;
