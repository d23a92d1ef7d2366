//! Cursor over a codepoint slice.
//!
//! Reads past the end yield `'\0'`, so lookahead never needs an explicit
//! bounds check. Whether a `'\0'` is the sentinel or a real NUL in the source
//! is decided by [`Cursor::is_eof`], which compares the position against the
//! length.

/// Cheap, copyable position in a codepoint slice.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    pub fn new(chars: &'a [char]) -> Self {
        Cursor { chars, pos: 0 }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move to an absolute position. Positions past the end clamp to it.
    #[inline]
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.chars.len());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    #[inline]
    pub fn current(&self) -> char {
        self.char_at(self.pos)
    }

    #[inline]
    pub fn peek(&self) -> char {
        self.char_at(self.pos + 1)
    }

    #[inline]
    pub fn peek2(&self) -> char {
        self.char_at(self.pos + 2)
    }

    /// Codepoint `n` positions ahead of the current one.
    #[inline]
    pub fn peek_at(&self, n: usize) -> char {
        self.char_at(self.pos + n)
    }

    /// Codepoint at an absolute index, `'\0'` past the end.
    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or('\0')
    }

    /// Codepoint just before the current position, `'\0'` at the start.
    #[inline]
    pub fn prev(&self) -> char {
        if self.pos == 0 {
            '\0'
        } else {
            self.char_at(self.pos - 1)
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    /// Advance while `pred` holds; returns the number of codepoints skipped.
    #[inline]
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let start = self.pos;
        while self.pos < self.chars.len() && pred(self.chars[self.pos]) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Whether the text at the current position starts with `s`.
    pub fn starts_with(&self, s: &str) -> bool {
        self.starts_with_at(self.pos, s)
    }

    /// Whether the text at `index` starts with `s`.
    pub fn starts_with_at(&self, index: usize, s: &str) -> bool {
        let mut i = index;
        for c in s.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Codepoints between two indices.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [char] {
        let end = end.min(self.chars.len());
        &self.chars[start.min(end)..end]
    }
}
