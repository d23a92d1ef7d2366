//! Shared data types for the scanner: spans, tokens and comments.
//!
//! This crate carries no scanning logic. The scanner (`rb_lexer`) produces
//! these values; a grammar parser or any other tool consumes them.

mod comment;
mod span;
mod token;

pub use comment::Comment;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
