//! Immutable source buffer: codepoints plus a codepoint-to-byte offset map.
//!
//! The buffer is built once per source and never mutated. Scanning works on
//! codepoint indices; ranges reported to callers are converted back to byte
//! offsets through [`SourceBuffer::byte_offset`].

use std::fmt;

use crate::Cursor;

/// Source text exceeding the `u32` offset space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceTooLarge {
    pub len: usize,
}

impl fmt::Display for SourceTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source of {} bytes exceeds the maximum of {} bytes",
            self.len,
            u32::MAX
        )
    }
}

impl std::error::Error for SourceTooLarge {}

/// Decoded source with its identity.
///
/// # Layout
///
/// ```text
/// chars:        [c0, c1, c2, ...]          one entry per codepoint
/// byte_offsets: [b0, b1, b2, ..., len]     one extra entry for the end
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    name: String,
    text: String,
    chars: Vec<char>,
    byte_offsets: Vec<u32>,
}

impl SourceBuffer {
    /// Decode `text` into codepoints and record their byte offsets.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Result<Self, SourceTooLarge> {
        let text = text.into();
        let byte_len =
            u32::try_from(text.len()).map_err(|_| SourceTooLarge { len: text.len() })?;

        let mut chars = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            chars.push(c);
            // Bounded by `byte_len`, checked above.
            #[allow(clippy::cast_possible_truncation)]
            byte_offsets.push(offset as u32);
        }
        byte_offsets.push(byte_len);

        Ok(SourceBuffer {
            name: name.into(),
            text,
            chars,
            byte_offsets,
        })
    }

    /// Source identity used by consumers to attribute ranges.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of codepoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length of the source in bytes.
    #[inline]
    pub fn byte_len(&self) -> u32 {
        self.byte_offsets[self.chars.len()]
    }

    /// Codepoint at `index`, or `'\0'` past the end.
    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or('\0')
    }

    /// Byte offset of the codepoint at `index`. Indices past the end map to
    /// the end of the source.
    #[inline]
    pub fn byte_offset(&self, index: usize) -> u32 {
        let index = index.min(self.chars.len());
        self.byte_offsets[index]
    }

    /// Codepoint index starting at byte offset `byte`, if `byte` lies on a
    /// codepoint boundary (the end of the source counts as one).
    pub fn char_index(&self, byte: u32) -> Option<usize> {
        self.byte_offsets.binary_search(&byte).ok()
    }

    /// Source text between two codepoint indices.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        &self.text[self.byte_offsets[start] as usize..self.byte_offsets[end] as usize]
    }

    /// Index of the first `'\n'` at or after `index`, or the end of the
    /// source if there is none.
    pub fn line_end(&self, index: usize) -> usize {
        let from = self.byte_offset(index) as usize;
        match memchr::memchr(b'\n', &self.text.as_bytes()[from..]) {
            // `from + found` is the byte offset of an ASCII newline, which is
            // always a codepoint boundary.
            #[allow(clippy::cast_possible_truncation)]
            Some(found) => self
                .char_index((from + found) as u32)
                .unwrap_or(self.chars.len()),
            None => self.chars.len(),
        }
    }

    /// Create a [`Cursor`] positioned at codepoint 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.chars)
    }
}
