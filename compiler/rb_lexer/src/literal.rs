//! String-like literal bookkeeping.
//!
//! A [`Literal`] is pushed when an opener (`"`, `%w(`, `<<~EOS`, `:"`, `/`,
//! ...) is scanned and popped at its terminator. It owns the delimiter
//! nesting depth, the content buffer and the interpolation brace count. The
//! scanner drives it one codepoint at a time through [`Literal::feed`] and
//! performs whatever the returned [`LiteralAction`] asks for.
//!
//! A plain quoted string whose content never needs to be flushed early is
//! emitted as one `tSTRING` token ("monolithic"); every other literal is a
//! start token, content tokens, and an end token.

use rb_ir::TokenKind;
use rb_lexer_core::char_class::{is_ident_char, is_space};

use crate::emitter::{indent_level, TokenEmitter};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum LiteralKind {
    /// `'...'`
    SingleQuote,
    /// `<<'EOS'`
    HeredocSingle,
    /// `%q(...)`
    PercentQ,
    /// `"..."`
    DoubleQuote,
    /// `<<"EOS"` and `<<EOS`
    HeredocDouble,
    /// `%(...)`
    Percent,
    /// `%Q(...)`
    PercentUpperQ,
    /// `%w(...)`
    Words,
    /// `%W(...)`
    InterpWords,
    /// `%i(...)`
    Symbols,
    /// `%I(...)`
    InterpSymbols,
    /// `:'...'`
    SymbolSingle,
    /// `%s(...)`
    PercentS,
    /// `:"..."`
    SymbolDouble,
    /// `/.../`
    Regexp,
    /// `%r(...)`
    PercentR,
    /// `%x(...)`
    PercentX,
    /// `` `...` ``
    Backtick,
    /// ``<<`EOS` ``
    HeredocBacktick,
}

impl LiteralKind {
    /// Kind for an opener's type text, delimiter excluded (`%w`, `:"`, `<<'`).
    pub(crate) fn from_type(text: &str) -> Option<Self> {
        let kind = match text {
            "'" => LiteralKind::SingleQuote,
            "<<'" => LiteralKind::HeredocSingle,
            "%q" => LiteralKind::PercentQ,
            "\"" => LiteralKind::DoubleQuote,
            "<<\"" => LiteralKind::HeredocDouble,
            "%" => LiteralKind::Percent,
            "%Q" => LiteralKind::PercentUpperQ,
            "%w" => LiteralKind::Words,
            "%W" => LiteralKind::InterpWords,
            "%i" => LiteralKind::Symbols,
            "%I" => LiteralKind::InterpSymbols,
            ":'" => LiteralKind::SymbolSingle,
            "%s" => LiteralKind::PercentS,
            ":\"" => LiteralKind::SymbolDouble,
            "/" => LiteralKind::Regexp,
            "%r" => LiteralKind::PercentR,
            "%x" => LiteralKind::PercentX,
            "`" => LiteralKind::Backtick,
            "<<`" => LiteralKind::HeredocBacktick,
            _ => return None,
        };
        Some(kind)
    }

    pub(crate) fn start_token(self) -> TokenKind {
        match self {
            LiteralKind::SingleQuote
            | LiteralKind::HeredocSingle
            | LiteralKind::PercentQ
            | LiteralKind::DoubleQuote
            | LiteralKind::HeredocDouble
            | LiteralKind::Percent
            | LiteralKind::PercentUpperQ => TokenKind::StringBeg,
            LiteralKind::Words => TokenKind::QwordsBeg,
            LiteralKind::InterpWords => TokenKind::WordsBeg,
            LiteralKind::Symbols => TokenKind::QsymbolsBeg,
            LiteralKind::InterpSymbols => TokenKind::SymbolsBeg,
            LiteralKind::SymbolSingle | LiteralKind::PercentS | LiteralKind::SymbolDouble => {
                TokenKind::Symbeg
            }
            LiteralKind::Regexp | LiteralKind::PercentR => TokenKind::RegexpBeg,
            LiteralKind::PercentX | LiteralKind::Backtick | LiteralKind::HeredocBacktick => {
                TokenKind::XstringBeg
            }
        }
    }

    pub(crate) fn interpolates(self) -> bool {
        !matches!(
            self,
            LiteralKind::SingleQuote
                | LiteralKind::HeredocSingle
                | LiteralKind::PercentQ
                | LiteralKind::Words
                | LiteralKind::Symbols
                | LiteralKind::SymbolSingle
                | LiteralKind::PercentS
        )
    }

    pub(crate) fn is_words(self) -> bool {
        matches!(
            self,
            LiteralKind::Words
                | LiteralKind::InterpWords
                | LiteralKind::Symbols
                | LiteralKind::InterpSymbols
        )
    }

    pub(crate) fn is_regexp(self) -> bool {
        matches!(self, LiteralKind::Regexp | LiteralKind::PercentR)
    }

    fn is_quote(self) -> bool {
        matches!(self, LiteralKind::SingleQuote | LiteralKind::DoubleQuote)
    }
}

/// Closing partner of a bracketing delimiter.
fn closing_delimiter(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

/// What the scanner should do with the codepoint just fed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum LiteralAction {
    /// Ordinary content.
    Continue,
    /// A backslash escape starts here.
    Escape,
    /// A newline: content up to here becomes a token.
    FlushContent,
    /// Whitespace between words of a `%w`-style literal.
    WordSeparator,
    /// `#{`
    OpenInterpolation,
    /// `#@x`, `#@@x` or `#$x`.
    InterpolateVariable,
    /// The unnested end delimiter.
    CloseLiteral,
}

/// Heredoc-only state.
#[derive(Clone, Debug)]
pub(crate) struct Heredoc {
    pub identifier: String,
    /// `<<-` or `<<~`: the terminator may be indented.
    pub indent: bool,
    /// `<<~`: common indentation is removed from the body.
    pub squiggly: bool,
    /// Just past the opener, where scanning resumes after the terminator.
    pub resume: usize,
    /// Start of the body line being scanned.
    pub line_start: usize,
    /// Line start already checked for the terminator.
    pub checked_line: Option<usize>,
    pub dedent_level: Option<usize>,
    /// Content tokens that begin at a line start, with that line start.
    pub lines: Vec<(usize, usize)>,
}

impl Heredoc {
    pub(crate) fn new(identifier: String, indent: bool, squiggly: bool, resume: usize, body: usize) -> Self {
        Heredoc {
            identifier,
            indent,
            squiggly,
            resume,
            line_start: body,
            checked_line: None,
            dedent_level: None,
            lines: Vec::new(),
        }
    }

    /// `true` if `line` (without its newline) terminates the heredoc.
    pub(crate) fn is_terminator(&self, line: &str) -> bool {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if self.indent {
            line.trim_start_matches(|c: char| is_space(c)) == self.identifier
        } else {
            line == self.identifier
        }
    }

    /// Fold one raw body line into the common indentation.
    pub(crate) fn infer_indent(&mut self, line: &[char]) {
        if let Some(level) = indent_level(line) {
            self.dedent_level = Some(self.dedent_level.map_or(level, |l| l.min(level)));
        }
    }
}

/// How a literal was closed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Closed {
    /// Ended by its delimiter.
    Delimiter,
    /// Ended by `":`, making the literal a hash label.
    Label,
}

#[derive(Clone, Debug)]
pub(crate) struct Literal {
    pub kind: LiteralKind,
    start_delim: Option<char>,
    /// `None` for heredocs, which end at a terminator line.
    end_delim: Option<char>,
    nesting: u32,
    interp_braces: u32,
    /// Position of the opener.
    pub str_start: usize,
    /// Opener text, delimiter included.
    prefix: String,
    prefix_end: usize,
    pub label_allowed: bool,
    monolithic: bool,
    space_emitted: bool,
    buffer: Vec<u8>,
    buffer_start: Option<usize>,
    buffer_end: usize,
    pub heredoc: Option<Heredoc>,
    /// Pending heredoc body start stashed while an interpolation runs.
    pub saved_herebody: Option<usize>,
}

impl Literal {
    /// A delimited literal. `prefix` is the opener text ending in `delimiter`.
    pub(crate) fn new(
        kind: LiteralKind,
        prefix: String,
        delimiter: char,
        str_start: usize,
        prefix_end: usize,
        label_allowed: bool,
    ) -> Self {
        Literal {
            kind,
            start_delim: closing_delimiter(delimiter).map(|_| delimiter),
            end_delim: Some(closing_delimiter(delimiter).unwrap_or(delimiter)),
            nesting: 0,
            interp_braces: 0,
            str_start,
            prefix,
            prefix_end,
            label_allowed,
            monolithic: kind.is_quote(),
            space_emitted: true,
            buffer: Vec::new(),
            buffer_start: None,
            buffer_end: str_start,
            heredoc: None,
            saved_herebody: None,
        }
    }

    /// A heredoc whose opener spans `str_start..heredoc.resume`.
    pub(crate) fn heredoc(kind: LiteralKind, prefix: String, str_start: usize, heredoc: Heredoc) -> Self {
        let mut literal = Literal::new(kind, prefix, '\n', str_start, heredoc.resume, false);
        literal.end_delim = None;
        literal.monolithic = false;
        literal.heredoc = Some(heredoc);
        literal
    }

    /// Emit the start token unless the literal may still be monolithic.
    pub(crate) fn open(&mut self, out: &mut TokenEmitter<'_>) {
        if !self.monolithic {
            self.emit_start(out);
        }
    }

    fn emit_start(&self, out: &mut TokenEmitter<'_>) {
        out.emit(
            self.kind.start_token(),
            self.prefix.clone(),
            self.str_start,
            self.prefix_end,
        );
    }

    pub(crate) fn interpolates(&self) -> bool {
        self.kind.interpolates()
    }

    pub(crate) fn is_words(&self) -> bool {
        self.kind.is_words()
    }

    pub(crate) fn is_regexp(&self) -> bool {
        self.kind.is_regexp()
    }

    /// Classify the codepoint at `ahead[0]`; `ahead` holds the lookahead.
    pub(crate) fn feed(&mut self, ahead: &[char]) -> LiteralAction {
        let at = |i: usize| ahead.get(i).copied().unwrap_or('\0');
        let c = at(0);

        if Some(c) == self.end_delim {
            if self.nesting == 0 {
                return LiteralAction::CloseLiteral;
            }
            self.nesting -= 1;
            return LiteralAction::Continue;
        }
        if Some(c) == self.start_delim {
            self.nesting += 1;
            return LiteralAction::Continue;
        }

        match c {
            '\\' => LiteralAction::Escape,
            '#' if self.interpolates() => match (at(1), at(2), at(3)) {
                ('{', _, _) => LiteralAction::OpenInterpolation,
                // `#@1` is still an interpolation; the name is reported as invalid.
                ('@', '@', n) | ('@', n, _) if is_ident_char(n) => {
                    LiteralAction::InterpolateVariable
                }
                ('$', n, _) if is_ident_char(n) || is_gvar_punct(n) => {
                    LiteralAction::InterpolateVariable
                }
                _ => LiteralAction::Continue,
            },
            '\n' => LiteralAction::FlushContent,
            c if self.is_words() && is_space(c) => LiteralAction::WordSeparator,
            _ => LiteralAction::Continue,
        }
    }

    /// Escaped characters that stand for themselves without the backslash.
    /// Heredocs have no delimiter and never munge.
    pub(crate) fn munge_escape(&self, c: char) -> bool {
        let Some(end_delim) = self.end_delim else {
            return false;
        };
        (self.is_words() && matches!(c, ' ' | '\t' | '\x0b' | '\r' | '\x0c' | '\n'))
            || c == '\\'
            || Some(c) == self.start_delim
            || c == end_delim
    }

    pub(crate) fn extend_string(&mut self, bytes: &[u8], start: usize, end: usize) {
        self.buffer_start.get_or_insert(start);
        self.buffer_end = end;
        self.buffer.extend_from_slice(bytes);
    }

    pub(crate) fn flush_string(&mut self, out: &mut TokenEmitter<'_>) {
        if self.monolithic {
            self.emit_start(out);
            self.monolithic = false;
        }
        let Some(start) = self.buffer_start.take() else {
            return;
        };
        if self.buffer.is_empty() {
            return;
        }
        if let Some(heredoc) = self.heredoc.as_mut() {
            if heredoc.squiggly && out.is_line_start(start) {
                heredoc.lines.push((out.len(), start));
            }
        }
        let text = String::from_utf8_lossy(&self.buffer).into_owned();
        out.emit(TokenKind::StringContent, text, start, self.buffer_end);
        self.buffer.clear();
        self.space_emitted = false;
    }

    /// Whitespace between words.
    pub(crate) fn extend_space(&mut self, start: usize, end: usize, out: &mut TokenEmitter<'_>) {
        self.flush_string(out);
        if !self.space_emitted {
            out.emit(TokenKind::Space, "", start, end);
            self.space_emitted = true;
        }
    }

    /// Content other than plain text (an interpolation) started.
    pub(crate) fn extend_content(&mut self) {
        self.space_emitted = false;
    }

    pub(crate) fn start_interp_brace(&mut self) {
        self.interp_braces += 1;
    }

    /// Returns `true` when the brace closes the interpolation itself.
    pub(crate) fn end_interp_brace(&mut self) -> bool {
        self.interp_braces = self.interp_braces.saturating_sub(1);
        self.interp_braces == 0
    }

    pub(crate) fn in_interpolation(&self) -> bool {
        self.interp_braces > 0
    }

    /// Close at the end delimiter spanning `start..end`. With `label`, the
    /// literal and the colon after it form a `tLABEL_END`.
    pub(crate) fn close(
        &mut self,
        start: usize,
        end: usize,
        label: bool,
        out: &mut TokenEmitter<'_>,
    ) -> Closed {
        if self.is_words() {
            self.extend_space(start, start, out);
        }
        let delim = self.end_delim.map(String::from).unwrap_or_default();
        if label {
            self.flush_string(out);
            out.emit(TokenKind::LabelEnd, delim, start, end + 1);
            return Closed::Label;
        }
        if self.monolithic {
            let text = String::from_utf8_lossy(&self.buffer).into_owned();
            out.emit(TokenKind::String, text, self.str_start, end);
            self.buffer.clear();
            self.buffer_start = None;
        } else {
            self.flush_string(out);
            out.emit(TokenKind::StringEnd, delim, start, end);
        }
        Closed::Delimiter
    }
}

/// Punctuation that may follow `$` in a global variable name.
pub(crate) fn is_gvar_punct(c: char) -> bool {
    matches!(
        c,
        '`' | '\'' | '+' | '~' | '*' | '$' | '&' | '?' | '!' | '@' | '/' | '\\' | ';' | ',' | '.'
            | '=' | ':' | '<' | '>' | '"'
    )
}

#[cfg(test)]
mod tests;
