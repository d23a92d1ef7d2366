//! Comments collected alongside the token stream.
//!
//! Comments never appear in the token sequence. They are kept in their own
//! ordered list and associated with tokens only by range.

use std::fmt;

use super::Span;

/// A source comment: either a `#` line comment (without its newline) or a
/// whole `=begin`/`=end` embedded document.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Raw comment text, including the leading `#` or `=begin`.
    pub text: String,
    pub span: Span,
}

impl Comment {
    #[inline]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Comment {
            text: text.into(),
            span,
        }
    }

    /// Whether this comment is an embedded document.
    pub fn is_document(&self) -> bool {
        self.text.starts_with("=begin")
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.text, self.span)
    }
}
