//! Low-level source access for the scanner.
//!
//! [`SourceBuffer`] holds the decoded codepoints of one source together with
//! the byte offset of every codepoint. [`Cursor`] walks those codepoints with
//! cheap lookahead and backtracking.

pub mod char_class;
mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::{SourceBuffer, SourceTooLarge};
