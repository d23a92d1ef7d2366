//! Token and comment sink.
//!
//! Scanner states work in codepoint positions; the emitter converts them to
//! the configured offset unit when a token is recorded.

use rb_ir::{Comment, Span, Token, TokenKind, TokenList};
use rb_lexer_core::SourceBuffer;

const TAB_WIDTH: usize = 8;

pub(crate) struct TokenEmitter<'src> {
    source: &'src SourceBuffer,
    force_utf32: bool,
    emit_comments: bool,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
}

impl<'src> TokenEmitter<'src> {
    pub(crate) fn new(source: &'src SourceBuffer, force_utf32: bool, emit_comments: bool) -> Self {
        TokenEmitter {
            source,
            force_utf32,
            emit_comments,
            tokens: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn offset(&self, pos: usize) -> u32 {
        if self.force_utf32 {
            // `SourceBuffer::new` rejects sources whose length overflows u32.
            #[allow(clippy::cast_possible_truncation)]
            let pos = pos.min(self.source.len()) as u32;
            pos
        } else {
            self.source.byte_offset(pos)
        }
    }

    #[inline]
    pub(crate) fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.offset(start), self.offset(end.max(start)))
    }

    pub(crate) fn emit(&mut self, kind: TokenKind, text: impl Into<String>, start: usize, end: usize) {
        let token = Token::new(kind, text, self.span(start, end));
        tracing::trace!(token = ?token, "emit");
        self.tokens.push(token);
    }

    /// Emit with the source text of the range as the token text.
    pub(crate) fn emit_source(&mut self, kind: TokenKind, start: usize, end: usize) {
        let text = self.source.slice(start, end).to_owned();
        self.emit(kind, text, start, end);
    }

    pub(crate) fn comment(&mut self, start: usize, end: usize) {
        if self.emit_comments {
            let text = self.source.slice(start, end).to_owned();
            self.comments.push(Comment::new(text, self.span(start, end)));
        }
    }

    /// Number of tokens emitted so far.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    pub(crate) fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }

    pub(crate) fn is_line_start(&self, pos: usize) -> bool {
        pos == 0 || self.source.char_at(pos - 1) == '\n'
    }

    /// Strip up to `level` columns of leading whitespace from content tokens.
    /// `lines` pairs a token index with the line start the token begins at.
    /// Tokens left empty are removed.
    pub(crate) fn dedent(&mut self, lines: &[(usize, usize)], level: usize) {
        let mut emptied = Vec::new();
        for &(index, line_start) in lines {
            let chars = self.source.chars().get(line_start..).unwrap_or_default();
            let remove = dedent_width(chars, level);
            if remove == 0 {
                continue;
            }
            let new_start = self.span(line_start + remove, line_start + remove).start;
            let Some(token) = self.tokens.get_mut(index) else {
                continue;
            };
            // Only raw whitespace is stripped; an escaped tab is content.
            let prefix: String = chars[..remove].iter().collect();
            if !token.text.starts_with(&prefix) {
                continue;
            }
            token.text.drain(..prefix.len());
            token.span = Span::new(new_start, token.span.end.max(new_start));
            if token.text.is_empty() {
                emptied.push(index);
            }
        }
        for index in emptied.into_iter().rev() {
            self.tokens.remove(index);
        }
    }

    pub(crate) fn take(&mut self) -> (TokenList, Vec<Comment>) {
        let tokens = std::mem::take(&mut self.tokens);
        (TokenList::from_vec(tokens), std::mem::take(&mut self.comments))
    }

    pub(crate) fn clear(&mut self) {
        self.tokens.clear();
        self.comments.clear();
    }
}

/// Indentation width of a heredoc line, or `None` for a blank line.
/// A tab advances to the next multiple of eight columns.
pub(crate) fn indent_level(line: &[char]) -> Option<usize> {
    let mut column = 0;
    for &c in line {
        match c {
            ' ' => column += 1,
            '\t' => column = (column / TAB_WIDTH + 1) * TAB_WIDTH,
            '\r' | '\n' => return None,
            _ => return Some(column),
        }
    }
    None
}

/// Number of leading whitespace characters to strip to remove `level`
/// columns without splitting a tab.
pub(crate) fn dedent_width(line: &[char], level: usize) -> usize {
    let mut column = 0;
    let mut remove = 0;
    for &c in line {
        if column >= level {
            break;
        }
        match c {
            ' ' => column += 1,
            '\t' => {
                let next = (column / TAB_WIDTH + 1) * TAB_WIDTH;
                if next > level {
                    break;
                }
                column = next;
            }
            _ => break,
        }
        remove += 1;
    }
    remove
}
